//! Scene editing surface handed to scene-building hooks.

use crate::error::CoreResult;
use crate::pending::PendingUpdates;
use crate::scene::Scene;
use crate::value::Fields;
use crate::visual::{NewVisual, Visual};

/// Edits a scene while no renderer exists yet.
///
/// Field updates go to the pending buffer and reach the renderer once it
/// is attached.
pub struct SceneEditor<'a> {
    scene: &'a mut Scene,
    pending: &'a mut PendingUpdates,
}

impl<'a> SceneEditor<'a> {
    pub fn new(scene: &'a mut Scene, pending: &'a mut PendingUpdates) -> Self {
        Self { scene, pending }
    }

    /// Add a visual to the scene.
    pub fn add_visual(&mut self, desc: NewVisual) -> CoreResult<String> {
        self.scene.add_visual(desc)
    }

    /// Stage field values for a visual (the first visual when `None`).
    pub fn set_data(&mut self, visual: Option<&str>, fields: Fields) {
        let name = match visual {
            Some(name) => name.to_string(),
            None => self.scene.default_visual_name(),
        };
        self.pending.stage(&name, fields);
    }

    pub fn set_rendering_options(&mut self, options: Fields) {
        self.scene.set_rendering_options(options);
    }

    pub fn get_visual(&self, name: &str) -> Option<&Visual> {
        self.scene.get_visual(name)
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::visual::VisualKind;

    #[test]
    fn test_set_data_targets_first_visual() {
        let mut scene = Scene::new(false);
        let mut pending = PendingUpdates::new();
        let mut editor = SceneEditor::new(&mut scene, &mut pending);

        editor
            .add_visual(NewVisual::new(VisualKind::Plot).named("curve"))
            .unwrap();
        editor.set_data(None, fields! { "visible" => false });

        assert_eq!(pending.get("curve").map(Fields::len), Some(1));
    }
}
