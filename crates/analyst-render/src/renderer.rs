//! Renderer trait abstraction.

use analyst_core::{Fields, Scene};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Unknown visual: {0}")]
    UnknownVisual(String),
    #[error("Unknown texture `{texture}` in visual `{visual}`")]
    UnknownTexture { visual: String, texture: String },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Trait for rendering backends.
///
/// A renderer is built from a scene snapshot and afterwards only learns
/// about changes through [`Renderer::set_data`].
pub trait Renderer {
    /// Allocate GPU resources for every visual of the scene.
    fn initialize(&mut self) -> RenderResult<()>;

    /// Draw one frame.
    fn paint(&mut self) -> RenderResult<()>;

    /// React to a viewport size change.
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Release GPU resources.
    fn cleanup(&mut self);

    /// Upload new values for fields of a visual.
    fn set_data(&mut self, visual: &str, fields: &Fields) -> RenderResult<()>;

    /// Copy texture `src` into texture `dst` within a visual.
    fn copy_texture(&mut self, visual: &str, src: &str, dst: &str) -> RenderResult<()>;
}

/// Builds a renderer from a scene snapshot.
pub trait RendererFactory {
    fn create(&self, scene: &Scene) -> RenderResult<Box<dyn Renderer>>;
}

impl<F> RendererFactory for F
where
    F: Fn(&Scene) -> RenderResult<Box<dyn Renderer>>,
{
    fn create(&self, scene: &Scene) -> RenderResult<Box<dyn Renderer>> {
        self(scene)
    }
}

/// The host's graphics context, bound to the thread that owns it.
pub trait GraphicsContext {
    /// Flush the graphics pipeline.
    fn flush(&mut self);

    /// Ask the host widget to schedule a repaint.
    fn request_redraw(&mut self) {}
}

/// Graphics context that does nothing, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullContext;

impl GraphicsContext for NullContext {
    fn flush(&mut self) {}
}
