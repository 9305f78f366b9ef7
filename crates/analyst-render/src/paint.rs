//! Paint manager: owns the scene and drives the renderer's lifecycle.

use crate::renderer::{GraphicsContext, Renderer, RendererError, RendererFactory};
use analyst_core::{
    CoreError, Fields, NewVisual, PendingUpdates, Scene, SceneEditor, Visual, VisualKind,
    WidgetConfig, fields, is_special_key,
};
use kurbo::{Point, Rect};
use thiserror::Error;

/// Name of the FPS text overlay.
pub const FPS_VISUAL: &str = "fps";
/// Name of the navigation (zoom box) rectangle.
pub const NAVIGATION_RECTANGLE_VISUAL: &str = "navigation_rectangle";

/// Paint manager errors.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error(transparent)]
    Scene(#[from] CoreError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("Graphics are already initialized")]
    AlreadyInitialized,
    #[error("Graphics are not initialized")]
    NotInitialized,
    #[error("Graphics have been torn down")]
    TornDown,
}

/// Result type for paint operations.
pub type PaintResult<T> = Result<T, PaintError>;

/// Lifecycle of a paint manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintState {
    /// No renderer; field updates are buffered.
    #[default]
    Uninitialized,
    /// `initialize_graphics` is running user hooks and building the renderer.
    Initializing,
    /// Renderer attached; updates go straight to it.
    Active,
    /// `cleanup` was called; nothing more will be painted.
    TornDown,
}

/// Scene-building hooks, run by [`PaintManager::initialize_graphics`].
pub trait PaintHooks {
    /// Build the scene: add visuals, stage data.
    fn initialize(&mut self, _scene: &mut SceneEditor<'_>) -> PaintResult<()> {
        Ok(())
    }

    /// Runs after the default content has been added.
    fn finalize(&mut self, _scene: &mut SceneEditor<'_>) -> PaintResult<()> {
        Ok(())
    }
}

/// Hooks that add nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl PaintHooks for NoHooks {}

/// Defines what to render in the widget.
///
/// Visuals are declared up front, and field updates issued before the
/// renderer exists are buffered per visual. Once the renderer is attached,
/// each buffered entry is flushed exactly once and later updates go
/// straight to the renderer.
pub struct PaintManager {
    config: WidgetConfig,
    scene: Scene,
    pending: PendingUpdates,
    hooks: Box<dyn PaintHooks>,
    factory: Box<dyn RendererFactory>,
    context: Box<dyn GraphicsContext>,
    renderer: Option<Box<dyn Renderer>>,
    state: PaintState,
}

impl PaintManager {
    /// Create a paint manager with an empty scene.
    pub fn new(
        config: WidgetConfig,
        factory: impl RendererFactory + 'static,
        context: impl GraphicsContext + 'static,
    ) -> Self {
        let scene = Self::fresh_scene(&config);
        Self {
            config,
            scene,
            pending: PendingUpdates::new(),
            hooks: Box::new(NoHooks),
            factory: Box::new(factory),
            context: Box::new(context),
            renderer: None,
            state: PaintState::Uninitialized,
        }
    }

    /// Set the scene-building hooks.
    pub fn with_hooks(mut self, hooks: impl PaintHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    fn fresh_scene(config: &WidgetConfig) -> Scene {
        let mut scene = Scene::new(config.constrain_ratio);
        scene.set_rendering_options(fields! { "background_color" => config.background_color });
        scene
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> PaintState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Updates still waiting for a renderer.
    pub fn pending(&self) -> &PendingUpdates {
        &self.pending
    }

    /// Reset the scene.
    ///
    /// An attached renderer is cleaned up and dropped, so the manager is
    /// back to [`PaintState::Uninitialized`].
    pub fn reset(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            log::warn!("Resetting the scene with an attached renderer");
            renderer.cleanup();
        }
        self.scene = Self::fresh_scene(&self.config);
        self.pending.clear();
        self.state = PaintState::Uninitialized;
    }

    /// Set rendering options in the scene.
    pub fn set_rendering_options(&mut self, options: Fields) {
        self.scene.set_rendering_options(options);
    }

    /// Add a visual and return its name.
    ///
    /// Visuals added after the renderer was built are not known to it.
    pub fn add_visual(&mut self, desc: NewVisual) -> PaintResult<String> {
        let name = self.scene.add_visual(desc)?;
        if self.renderer.is_some() {
            log::warn!("Visual `{}` added after the renderer was built", name);
        }
        Ok(name)
    }

    /// All visuals in creation order.
    pub fn get_visuals(&self) -> impl Iterator<Item = &Visual> {
        self.scene.visuals()
    }

    pub fn get_visual(&self, name: &str) -> Option<&Visual> {
        self.scene.get_visual(name)
    }

    fn target(&self, visual: Option<&str>) -> String {
        match visual {
            Some(name) => name.to_string(),
            None => self.scene.default_visual_name(),
        }
    }

    /// Specify or change field values of a visual (the first visual when `None`).
    ///
    /// Without a renderer the values are merged into the pending buffer.
    /// With one they are uploaded right away, and the buffer entry for the
    /// visual, if any, is left empty.
    pub fn set_data(&mut self, visual: Option<&str>, fields: Fields) -> PaintResult<()> {
        let name = self.target(visual);
        if self.state == PaintState::TornDown {
            return Err(PaintError::TornDown);
        }
        match self.renderer.as_mut() {
            Some(renderer) => {
                renderer.set_data(&name, &fields)?;
                self.pending.mark_flushed(&name);
            }
            None => {
                log::debug!("Buffering {} field(s) for `{}`", fields.len(), name);
                self.pending.stage(&name, fields);
            }
        }
        Ok(())
    }

    /// Re-run a visual's initialization with new parameters and upload the result.
    ///
    /// Special keys (visibility, size, bounds, ...) bypass the visual's
    /// initialization and are uploaded as given. This allows structural
    /// changes such as resizing a point cloud without recreating the visual.
    pub fn reinitialize_visual(&mut self, visual: Option<&str>, params: Fields) -> PaintResult<()> {
        let name = self.target(visual);
        let (special, data): (Fields, Fields) =
            params.into_iter().partition(|(key, _)| is_special_key(key));

        let target = self
            .scene
            .get_visual_mut(&name)
            .ok_or_else(|| CoreError::VisualNotFound(name.clone()))?;
        target.reinit();
        target.initialize(&data)?;
        target.finalize()?;

        let mut updates = target.data_updating().clone();
        updates.extend(special);
        self.set_data(Some(&name), updates)
    }

    /// Add the content every widget gets: FPS overlay, navigation rectangle.
    fn initialize_default(&mut self) -> PaintResult<()> {
        if self.config.display_fps && !self.scene.contains(FPS_VISUAL) {
            self.scene.add_visual(
                NewVisual::new(VisualKind::Text)
                    .named(FPS_VISUAL)
                    .param("text", "FPS: 000")
                    .param("fontsize", 18.0)
                    .param("coordinates", Point::new(-0.80, 0.92))
                    .visible(false)
                    .is_static(true),
            )?;
        }
        if self.config.navigation_rectangle && !self.scene.contains(NAVIGATION_RECTANGLE_VISUAL) {
            self.scene.add_visual(
                NewVisual::new(VisualKind::Rectangles)
                    .named(NAVIGATION_RECTANGLE_VISUAL)
                    .param("coordinates", Rect::ZERO)
                    .param("color", self.config.navigation_rectangle_color)
                    .visible(false)
                    .is_static(true),
            )?;
        }
        Ok(())
    }

    /// Build the scene, create the renderer and flush buffered updates.
    ///
    /// On failure the scene and the pending buffer are restored to what
    /// they were before the call and the manager goes back to
    /// [`PaintState::Uninitialized`], so the call can be retried.
    pub fn initialize_graphics(&mut self) -> PaintResult<()> {
        if self.state != PaintState::Uninitialized {
            return Err(PaintError::AlreadyInitialized);
        }
        self.state = PaintState::Initializing;
        let scene = self.scene.clone();
        let pending = self.pending.clone();
        match self.attach_renderer() {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.state = PaintState::Active;
                Ok(())
            }
            Err(e) => {
                log::warn!("Graphics initialization failed: {}", e);
                self.scene = scene;
                self.pending = pending;
                self.state = PaintState::Uninitialized;
                Err(e)
            }
        }
    }

    fn attach_renderer(&mut self) -> PaintResult<Box<dyn Renderer>> {
        self.hooks
            .initialize(&mut SceneEditor::new(&mut self.scene, &mut self.pending))?;
        self.initialize_default()?;
        self.hooks
            .finalize(&mut SceneEditor::new(&mut self.scene, &mut self.pending))?;

        let mut renderer = self.factory.create(&self.scene)?;
        renderer.initialize()?;
        log::info!("Renderer initialized with {} visual(s)", self.scene.len());

        let flush = self.pending.take_for_flush(self.scene.visual_names());
        for name in &flush.orphaned {
            log::warn!("Dropping buffered updates for unknown visual `{}`", name);
        }
        for (name, fields) in &flush.updates {
            if let Err(e) = renderer.set_data(name, fields) {
                renderer.cleanup();
                return Err(e.into());
            }
        }
        Ok(renderer)
    }

    /// Paint one frame, then flush the graphics pipeline.
    pub fn paint_frame(&mut self) -> PaintResult<()> {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.paint()?;
        }
        self.context.flush();
        Ok(())
    }

    /// Resize the viewport, then flush the graphics pipeline.
    pub fn resize(&mut self, width: u32, height: u32) -> PaintResult<()> {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(width, height)?;
        }
        self.context.flush();
        Ok(())
    }

    /// Ask the host widget for a repaint.
    pub fn update_gl(&mut self) {
        self.context.request_redraw();
    }

    /// Release the renderer's resources.
    pub fn cleanup(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.cleanup();
            log::info!("Renderer cleaned up");
        }
        if self.state == PaintState::Active {
            self.state = PaintState::TornDown;
        }
    }

    /// Copy texture `src` into `dst` in a visual (the first visual when `None`).
    pub fn copy_texture(&mut self, src: &str, dst: &str, visual: Option<&str>) -> PaintResult<()> {
        let name = self.target(visual);
        match self.state {
            PaintState::TornDown => Err(PaintError::TornDown),
            _ => {
                let renderer = self.renderer.as_mut().ok_or(PaintError::NotInitialized)?;
                renderer.copy_texture(&name, src, dst)?;
                Ok(())
            }
        }
    }

    /// Update the FPS in the corresponding text visual.
    pub fn update_fps(&mut self, fps: f64) -> PaintResult<()> {
        let text = format!("FPS: {:03}", fps.max(0.0) as u64);
        self.set_data(Some(FPS_VISUAL), fields! { "text" => text, "visible" => true })
    }

    /// Show the navigation rectangle at `coordinates` (relative window coordinates).
    pub fn show_navigation_rectangle(&mut self, coordinates: Rect) -> PaintResult<()> {
        self.set_data(
            Some(NAVIGATION_RECTANGLE_VISUAL),
            fields! { "coordinates" => vec![coordinates], "visible" => true },
        )
    }

    pub fn hide_navigation_rectangle(&mut self) -> PaintResult<()> {
        self.set_data(Some(NAVIGATION_RECTANGLE_VISUAL), fields! { "visible" => false })
    }

    /// Exportable representation of the scene.
    pub fn serialize(&self) -> PaintResult<serde_json::Value> {
        Ok(self.scene.serialize()?)
    }
}

impl std::fmt::Debug for PaintManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintManager")
            .field("state", &self.state)
            .field("visuals", &self.scene.visual_names())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
