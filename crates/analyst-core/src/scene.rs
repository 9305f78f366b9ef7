//! Scene description: named visuals plus renderer options.

use crate::error::{CoreError, CoreResult};
use crate::names::VisualNameAllocator;
use crate::value::Fields;
use crate::visual::{NewVisual, Visual};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Everything a renderer needs to know to draw one frame-producing context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Unique scene identifier.
    pub id: String,
    /// Whether new visuals keep the aspect ratio unless told otherwise.
    pub constrain_ratio: bool,
    /// All visuals, keyed by name.
    visuals: HashMap<String, Visual>,
    /// Visual names in creation order.
    order: Vec<String>,
    /// Free-form options handed to the renderer.
    renderer_options: Fields,
    names: VisualNameAllocator,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new(constrain_ratio: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            constrain_ratio,
            visuals: HashMap::new(),
            order: Vec::new(),
            renderer_options: Fields::new(),
            names: VisualNameAllocator::new(),
        }
    }

    /// Add a visual and return its name.
    ///
    /// Unnamed visuals get the next `visualN` name. A name that is already
    /// taken is rejected rather than overwritten.
    pub fn add_visual(&mut self, desc: NewVisual) -> CoreResult<String> {
        let name = match desc.name.clone() {
            Some(name) => name,
            None => {
                let visuals = &self.visuals;
                self.names.allocate(|n| visuals.contains_key(n))
            }
        };
        if self.visuals.contains_key(&name) {
            return Err(CoreError::DuplicateVisual(name));
        }

        let visual = Visual::build(name.clone(), desc, self.constrain_ratio)?;
        log::debug!(
            "Added {} visual `{}` ({} vertices)",
            visual.kind.name(),
            name,
            visual.size
        );
        self.order.push(name.clone());
        self.visuals.insert(name.clone(), visual);
        Ok(name)
    }

    /// Check if a visual exists.
    pub fn contains(&self, name: &str) -> bool {
        self.visuals.contains_key(name)
    }

    /// Get a visual by name.
    pub fn get_visual(&self, name: &str) -> Option<&Visual> {
        self.visuals.get(name)
    }

    /// Get a mutable reference to a visual by name.
    pub fn get_visual_mut(&mut self, name: &str) -> Option<&mut Visual> {
        self.visuals.get_mut(name)
    }

    /// Visuals in creation order.
    pub fn visuals(&self) -> impl Iterator<Item = &Visual> {
        self.order.iter().filter_map(|name| self.visuals.get(name))
    }

    /// Visual names in creation order.
    pub fn visual_names(&self) -> &[String] {
        &self.order
    }

    /// The visual targeted when a caller names none: the first one created.
    pub fn default_visual_name(&self) -> String {
        self.order
            .first()
            .cloned()
            .unwrap_or_else(VisualNameAllocator::first)
    }

    pub fn renderer_options(&self) -> &Fields {
        &self.renderer_options
    }

    /// Merge options into the renderer options. Keys are not validated.
    pub fn set_rendering_options(&mut self, options: Fields) {
        self.renderer_options.extend(options);
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    /// Exportable representation of the scene.
    pub fn serialize(&self) -> CoreResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::VisualKind;

    #[test]
    fn test_scene_creation() {
        let scene = Scene::new(true);
        assert!(scene.is_empty());
        assert!(scene.constrain_ratio);
        assert_eq!(scene.default_visual_name(), "visual0");
    }

    #[test]
    fn test_default_names() {
        let mut scene = Scene::new(false);
        let first = scene.add_visual(NewVisual::new(VisualKind::Grid)).unwrap();
        let second = scene.add_visual(NewVisual::new(VisualKind::Text)).unwrap();
        assert_eq!(first, "visual0");
        assert_eq!(second, "visual1");
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_default_name_skips_explicit_names() {
        let mut scene = Scene::new(false);
        scene
            .add_visual(NewVisual::new(VisualKind::Grid).named("visual0"))
            .unwrap();
        let name = scene.add_visual(NewVisual::new(VisualKind::Grid)).unwrap();
        assert_eq!(name, "visual1");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut scene = Scene::new(false);
        scene
            .add_visual(NewVisual::new(VisualKind::Text).named("fps"))
            .unwrap();
        let result = scene.add_visual(NewVisual::new(VisualKind::Grid).named("fps"));
        assert!(matches!(result, Err(CoreError::DuplicateVisual(name)) if name == "fps"));
        assert_eq!(scene.get_visual("fps").map(|v| v.kind), Some(VisualKind::Text));
    }

    #[test]
    fn test_default_visual_is_first_created() {
        let mut scene = Scene::new(false);
        scene
            .add_visual(NewVisual::new(VisualKind::Rectangles).named("box"))
            .unwrap();
        scene.add_visual(NewVisual::new(VisualKind::Grid)).unwrap();
        assert_eq!(scene.default_visual_name(), "box");
    }

    #[test]
    fn test_missing_visual_is_none() {
        let scene = Scene::new(false);
        assert!(scene.get_visual("nope").is_none());
    }

    #[test]
    fn test_visuals_in_creation_order() {
        let mut scene = Scene::new(false);
        for name in ["c", "a", "b"] {
            scene
                .add_visual(NewVisual::new(VisualKind::Grid).named(name))
                .unwrap();
        }
        let names: Vec<_> = scene.visuals().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_rendering_options_merge() {
        let mut scene = Scene::new(false);
        scene.set_rendering_options(crate::fields! { "antialiasing" => true, "depth" => 16 });
        scene.set_rendering_options(crate::fields! { "depth" => 24 });
        assert_eq!(scene.renderer_options()["antialiasing"].as_bool(), Some(true));
        assert_eq!(scene.renderer_options()["depth"].as_int(), Some(24));
    }

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let mut scene = Scene::new(false);
        scene
            .add_visual(NewVisual::new(VisualKind::Text).named("title").param("text", "hi"))
            .unwrap();
        scene.add_visual(NewVisual::new(VisualKind::Grid)).unwrap();

        let json = scene.to_json().unwrap();
        let loaded = Scene::from_json(&json).unwrap();
        assert_eq!(loaded.id, scene.id);
        assert_eq!(loaded.visual_names(), scene.visual_names());
        assert_eq!(loaded.get_visual("title").map(|v| v.size), Some(2));
    }

    #[test]
    fn test_serialize_exports_visuals() {
        let mut scene = Scene::new(false);
        scene
            .add_visual(NewVisual::new(VisualKind::Text).named("fps"))
            .unwrap();
        let value = scene.serialize().unwrap();
        assert!(value["visuals"]["fps"].is_object());
        assert_eq!(value["order"][0], "fps");
    }
}
