//! Visual descriptors.
//!
//! A visual is one homogeneous batch of primitives drawn with a single
//! rendering call: a text string, a set of rectangles, a grid, a point set.
//! A set of points plus a set of rectangles is two visuals, never one.

mod grid;
mod plot;
mod rectangles;
mod text;

use crate::error::{CoreError, CoreResult};
use crate::value::{FieldValue, Fields};
use serde::{Deserialize, Serialize};

/// Keys that describe the visual itself rather than its data.
///
/// `reinitialize_visual` forwards these untouched instead of feeding them to
/// the visual's initialization logic.
pub const SPECIAL_KEYS: [&str; 6] = [
    "visible",
    "size",
    "bounds",
    "primitive_type",
    "constrain_ratio",
    "constrain_navigation",
];

/// Check whether a field key is one of [`SPECIAL_KEYS`].
pub fn is_special_key(key: &str) -> bool {
    SPECIAL_KEYS.contains(&key)
}

/// Built-in visual types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualKind {
    /// A text string, one point sprite per character.
    Text,
    /// Axis-aligned rectangles.
    Rectangles,
    /// Background grid lines.
    Grid,
    /// A line plot or scatter plot over a point list.
    Plot,
}

impl VisualKind {
    /// Get display name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            VisualKind::Text => "Text",
            VisualKind::Rectangles => "Rectangles",
            VisualKind::Grid => "Grid",
            VisualKind::Plot => "Plot",
        }
    }

    fn layout(self, params: &Fields) -> CoreResult<Layout> {
        match self {
            VisualKind::Text => text::layout(params),
            VisualKind::Rectangles => rectangles::layout(params),
            VisualKind::Grid => grid::layout(params),
            VisualKind::Plot => plot::layout(params),
        }
    }
}

/// GPU primitive used to draw a visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Result of running a kind's initialization logic over its parameters.
struct Layout {
    size: usize,
    primitive_type: PrimitiveType,
    fields: Fields,
}

/// Read an optional parameter, failing if it has the wrong type.
fn read<T>(
    params: &Fields,
    key: &str,
    expected: &'static str,
    get: impl FnOnce(&FieldValue) -> Option<T>,
) -> CoreResult<Option<T>> {
    match params.get(key) {
        None => Ok(None),
        Some(value) => get(value).map(Some).ok_or_else(|| CoreError::InvalidField {
            field: key.to_string(),
            expected,
            actual: value.type_name(),
        }),
    }
}

/// Every per-vertex field must have one entry per vertex.
fn check_vertex_counts(visual: &str, size: usize, fields: &Fields) -> CoreResult<()> {
    for (field, value) in fields {
        match value.vertex_len() {
            Some(len) if len != size => {
                return Err(CoreError::SizeMismatch {
                    visual: visual.to_string(),
                    field: field.clone(),
                    expected: size,
                    actual: len,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Description of a visual to add to a scene.
#[derive(Debug, Clone)]
pub struct NewVisual {
    pub kind: VisualKind,
    /// Visual name; allocated by the scene when `None`.
    pub name: Option<String>,
    /// Initialization parameters.
    pub params: Fields,
    pub visible: bool,
    pub is_static: bool,
    /// Falls back to the scene-wide setting when `None`.
    pub constrain_ratio: Option<bool>,
    pub constrain_navigation: bool,
}

impl NewVisual {
    /// Create a visible, non-static visual description of the given kind.
    pub fn new(kind: VisualKind) -> Self {
        Self {
            kind,
            name: None,
            params: Fields::new(),
            visible: true,
            is_static: false,
            constrain_ratio: None,
            constrain_navigation: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set one initialization parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merge several initialization parameters.
    pub fn params(mut self, params: Fields) -> Self {
        self.params.extend(params);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn is_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn constrain_ratio(mut self, constrain: bool) -> Self {
        self.constrain_ratio = Some(constrain);
        self
    }

    pub fn constrain_navigation(mut self, constrain: bool) -> Self {
        self.constrain_navigation = constrain;
        self
    }
}

/// A named, homogeneous batch of primitives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visual {
    pub name: String,
    pub kind: VisualKind,
    /// Vertex count.
    pub size: usize,
    pub primitive_type: PrimitiveType,
    pub visible: bool,
    /// Static visuals ignore navigation (pan/zoom) transforms.
    pub is_static: bool,
    pub constrain_ratio: bool,
    pub constrain_navigation: bool,
    /// Vertex offsets splitting the batch into sub-primitives, `[0, size]` by default.
    pub bounds: Vec<usize>,
    /// Field values produced by the last initialization.
    pub fields: Fields,
    #[serde(skip)]
    params: Fields,
    #[serde(skip)]
    data_updating: Fields,
}

impl Visual {
    /// Build and initialize a visual from its description.
    pub(crate) fn build(name: String, desc: NewVisual, scene_constrain_ratio: bool) -> CoreResult<Self> {
        let mut visual = Self {
            name,
            kind: desc.kind,
            size: 0,
            primitive_type: PrimitiveType::Points,
            visible: desc.visible,
            is_static: desc.is_static,
            constrain_ratio: desc.constrain_ratio.unwrap_or(scene_constrain_ratio),
            constrain_navigation: desc.constrain_navigation,
            bounds: Vec::new(),
            fields: Fields::new(),
            params: Fields::new(),
            data_updating: Fields::new(),
        };
        visual.initialize(&desc.params)?;
        visual.finalize()?;
        visual.reinit();
        Ok(visual)
    }

    /// Forget which fields the previous initialization produced.
    pub fn reinit(&mut self) {
        self.data_updating.clear();
    }

    /// Run the kind's initialization logic.
    ///
    /// `params` are merged over the parameters of earlier initializations.
    /// Every produced field lands in [`Visual::data_updating`], plus `size`
    /// when the vertex count changed. Per-vertex fields are checked against
    /// the new vertex count first; on error the visual is left untouched.
    pub fn initialize(&mut self, params: &Fields) -> CoreResult<()> {
        let mut merged = self.params.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        let layout = self.kind.layout(&merged)?;

        let mut fields = self.fields.clone();
        fields.extend(layout.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        check_vertex_counts(&self.name, layout.size, &fields)?;

        self.params = merged;
        if layout.size != self.size {
            self.data_updating
                .insert("size".to_string(), FieldValue::from(layout.size));
        }
        self.size = layout.size;
        self.primitive_type = layout.primitive_type;
        self.data_updating.extend(layout.fields);
        self.fields = fields;
        Ok(())
    }

    /// Validate per-vertex fields against the vertex count and fix up bounds.
    pub fn finalize(&mut self) -> CoreResult<()> {
        check_vertex_counts(&self.name, self.size, &self.fields)?;
        if self.bounds.last().is_none_or(|&end| end != self.size) {
            self.bounds = vec![0, self.size];
        }
        Ok(())
    }

    /// Fields produced since the last [`Visual::reinit`].
    pub fn data_updating(&self) -> &Fields {
        &self.data_updating
    }

    /// Parameters accumulated over all initializations.
    pub fn params(&self) -> &Fields {
        &self.params
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Rect};

    fn build(desc: NewVisual) -> Visual {
        Visual::build("visual0".to_string(), desc, false).unwrap()
    }

    #[test]
    fn test_text_size_follows_text() {
        let visual = build(NewVisual::new(VisualKind::Text).param("text", "FPS: 000"));
        assert_eq!(visual.size, 8);
        assert_eq!(visual.primitive_type, PrimitiveType::Points);
        assert_eq!(visual.bounds, vec![0, 8]);
        assert!(visual.data_updating().is_empty());
    }

    #[test]
    fn test_single_rectangle_has_four_vertices() {
        let visual = build(
            NewVisual::new(VisualKind::Rectangles).param("coordinates", Rect::new(0.0, 0.0, 1.0, 1.0)),
        );
        assert_eq!(visual.size, 4);
        assert_eq!(visual.primitive_type, PrimitiveType::TriangleStrip);
    }

    #[test]
    fn test_reinitialize_resizes_point_cloud() {
        let mut visual = build(
            NewVisual::new(VisualKind::Plot)
                .param("position", vec![Point::ZERO, Point::new(1.0, 1.0)])
                .param("scatter", true),
        );
        assert_eq!(visual.size, 2);

        visual.reinit();
        let position = vec![Point::ZERO; 5];
        visual.initialize(&crate::fields! { "position" => position }).unwrap();
        visual.finalize().unwrap();

        assert_eq!(visual.size, 5);
        assert_eq!(visual.primitive_type, PrimitiveType::Points);
        assert_eq!(visual.data_updating()["size"].as_int(), Some(5));
        assert!(visual.data_updating().contains_key("position"));
        assert_eq!(visual.bounds, vec![0, 5]);
    }

    #[test]
    fn test_wrong_param_type_rejected() {
        let result = Visual::build(
            "visual0".to_string(),
            NewVisual::new(VisualKind::Text).param("text", 3),
            false,
        );
        assert!(matches!(result, Err(CoreError::InvalidField { .. })));
    }

    #[test]
    fn test_failed_initialize_keeps_params() {
        let mut visual = build(NewVisual::new(VisualKind::Text).param("text", "abc"));
        let result = visual.initialize(&crate::fields! { "fontsize" => "large" });
        assert!(result.is_err());
        assert_eq!(visual.params().get("fontsize"), None);
        assert_eq!(visual.size, 3);
    }

    #[test]
    fn test_size_mismatch_leaves_visual_untouched() {
        let colors = vec![crate::SerializableColor::white(); 2];
        let mut visual = build(
            NewVisual::new(VisualKind::Plot)
                .param("position", vec![Point::ZERO; 2])
                .param("color", colors),
        );

        visual.reinit();
        let result = visual.initialize(&crate::fields! { "position" => vec![Point::ZERO; 5] });
        assert!(matches!(result, Err(CoreError::SizeMismatch { expected: 5, actual: 2, .. })));
        assert_eq!(visual.size, 2);
        assert_eq!(visual.field("position").and_then(FieldValue::vertex_len), Some(2));
        assert_eq!(visual.params()["position"].vertex_len(), Some(2));
        assert!(visual.data_updating().is_empty());
    }

    #[test]
    fn test_per_vertex_colors_must_match_size() {
        let result = Visual::build(
            "cloud".to_string(),
            NewVisual::new(VisualKind::Plot)
                .param("position", vec![Point::ZERO; 3])
                .param("color", vec![crate::SerializableColor::white(); 2]),
            false,
        );
        assert!(matches!(result, Err(CoreError::SizeMismatch { expected: 3, actual: 2, .. })));
    }

    #[test]
    fn test_constrain_ratio_defaults_to_scene() {
        let visual = Visual::build("v".to_string(), NewVisual::new(VisualKind::Grid), true).unwrap();
        assert!(visual.constrain_ratio);
        let visual = Visual::build(
            "v".to_string(),
            NewVisual::new(VisualKind::Grid).constrain_ratio(false),
            true,
        )
        .unwrap();
        assert!(!visual.constrain_ratio);
    }

    #[test]
    fn test_special_keys() {
        assert!(is_special_key("visible"));
        assert!(is_special_key("primitive_type"));
        assert!(!is_special_key("color"));
    }
}
