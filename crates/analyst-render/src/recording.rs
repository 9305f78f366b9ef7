//! Headless renderer that records what it is asked to do.

use crate::renderer::{RenderResult, Renderer, RendererError, RendererFactory};
use analyst_core::{FieldValue, Fields, Scene};
use std::cell::{RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

/// A call received by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Initialize,
    Paint,
    Resize { width: u32, height: u32 },
    Cleanup,
    SetData { visual: String, fields: Fields },
    CopyTexture { visual: String, src: String, dst: String },
}

#[derive(Debug, Default)]
struct Recorded {
    calls: Vec<RenderCall>,
    /// Current field values per visual, seeded from the scene.
    visuals: HashMap<String, Fields>,
}

/// Shared view of everything a [`RecordingRenderer`] received.
///
/// Clones observe the same log, so a test can keep one while the renderer
/// is owned by a paint manager. Not shareable across threads.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    inner: Rc<RefCell<Recorded>>,
}

impl RenderLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RefMut<'_, Recorded> {
        self.inner.borrow_mut()
    }

    /// All calls so far, oldest first.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.lock().calls.clone()
    }

    /// Field maps passed to `set_data` for one visual, oldest first.
    pub fn set_data_calls(&self, visual: &str) -> Vec<Fields> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::SetData { visual: v, fields } if v == visual => Some(fields.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of `paint` calls.
    pub fn frames(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, RenderCall::Paint))
            .count()
    }

    /// Current value of a field as the renderer sees it.
    pub fn field(&self, visual: &str, field: &str) -> Option<FieldValue> {
        self.lock().visuals.get(visual)?.get(field).cloned()
    }

    fn record(&self, call: RenderCall) {
        self.lock().calls.push(call);
    }
}

/// Renderer that draws nothing and records every call into a [`RenderLog`].
#[derive(Debug)]
pub struct RecordingRenderer {
    log: RenderLog,
}

impl RecordingRenderer {
    /// Create a renderer for `scene`, seeding field state from its visuals.
    pub fn new(scene: &Scene, log: RenderLog) -> Self {
        {
            let mut recorded = log.lock();
            recorded.visuals = scene
                .visuals()
                .map(|visual| {
                    let mut fields = visual.fields.clone();
                    fields.insert("visible".to_string(), visual.visible.into());
                    (visual.name.clone(), fields)
                })
                .collect();
        }
        Self { log }
    }

    /// A factory producing recording renderers that all write to `log`.
    pub fn factory(log: RenderLog) -> impl RendererFactory {
        move |scene: &Scene| -> RenderResult<Box<dyn Renderer>> {
            Ok(Box::new(RecordingRenderer::new(scene, log.clone())))
        }
    }
}

impl Renderer for RecordingRenderer {
    fn initialize(&mut self) -> RenderResult<()> {
        self.log.record(RenderCall::Initialize);
        Ok(())
    }

    fn paint(&mut self) -> RenderResult<()> {
        self.log.record(RenderCall::Paint);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.log.record(RenderCall::Resize { width, height });
        Ok(())
    }

    fn cleanup(&mut self) {
        self.log.record(RenderCall::Cleanup);
    }

    fn set_data(&mut self, visual: &str, fields: &Fields) -> RenderResult<()> {
        let mut recorded = self.log.lock();
        let current = recorded
            .visuals
            .get_mut(visual)
            .ok_or_else(|| RendererError::UnknownVisual(visual.to_string()))?;
        current.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        recorded.calls.push(RenderCall::SetData {
            visual: visual.to_string(),
            fields: fields.clone(),
        });
        Ok(())
    }

    /// Textures are the visual's fields: `dst` takes the current value of `src`.
    fn copy_texture(&mut self, visual: &str, src: &str, dst: &str) -> RenderResult<()> {
        let mut recorded = self.log.lock();
        let current = recorded
            .visuals
            .get_mut(visual)
            .ok_or_else(|| RendererError::UnknownVisual(visual.to_string()))?;
        let texture = current
            .get(src)
            .cloned()
            .ok_or_else(|| RendererError::UnknownTexture {
                visual: visual.to_string(),
                texture: src.to_string(),
            })?;
        current.insert(dst.to_string(), texture);
        recorded.calls.push(RenderCall::CopyTexture {
            visual: visual.to_string(),
            src: src.to_string(),
            dst: dst.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyst_core::{NewVisual, VisualKind, fields};

    fn scene() -> Scene {
        let mut scene = Scene::new(false);
        scene
            .add_visual(NewVisual::new(VisualKind::Text).named("label").param("text", "a"))
            .unwrap();
        scene
    }

    #[test]
    fn test_seeded_from_scene() {
        let log = RenderLog::new();
        let _renderer = RecordingRenderer::new(&scene(), log.clone());
        assert_eq!(log.field("label", "text"), Some(FieldValue::from("a")));
        assert_eq!(log.field("label", "visible"), Some(FieldValue::from(true)));
    }

    #[test]
    fn test_set_data_updates_state() {
        let log = RenderLog::new();
        let mut renderer = RecordingRenderer::new(&scene(), log.clone());
        renderer.set_data("label", &fields! { "text" => "b" }).unwrap();

        assert_eq!(log.field("label", "text"), Some(FieldValue::from("b")));
        assert_eq!(log.set_data_calls("label").len(), 1);
    }

    #[test]
    fn test_unknown_visual() {
        let log = RenderLog::new();
        let mut renderer = RecordingRenderer::new(&scene(), log.clone());
        let result = renderer.set_data("missing", &Fields::new());
        assert!(matches!(result, Err(RendererError::UnknownVisual(_))));
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_copy_texture_copies_field() {
        let log = RenderLog::new();
        let mut renderer = RecordingRenderer::new(&scene(), log.clone());
        renderer.copy_texture("label", "text", "backup").unwrap();
        assert_eq!(log.field("label", "backup"), Some(FieldValue::from("a")));

        let result = renderer.copy_texture("label", "missing", "backup");
        assert!(matches!(
            result,
            Err(RendererError::UnknownTexture { ref texture, .. }) if texture == "missing"
        ));
    }

    #[test]
    fn test_factory_shares_log() {
        let log = RenderLog::new();
        let factory = RecordingRenderer::factory(log.clone());
        let mut renderer = factory.create(&scene()).unwrap();
        renderer.paint().unwrap();
        renderer.paint().unwrap();
        assert_eq!(log.frames(), 2);
    }
}
