//! Field values carried by visuals and field updates.

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named field values, keyed by field name.
///
/// Ordered so that exports and logs are deterministic.
pub type Fields = BTreeMap<String, FieldValue>;

/// Build a [`Fields`] map from `key => value` pairs.
///
/// Values go through `FieldValue::from`, so anything with a `From` impl works:
///
/// ```
/// use analyst_core::fields;
///
/// let fields = fields! { "text" => "FPS: 000", "visible" => false };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::FieldValue::from($value));
        )+
        fields
    }};
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::white()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Color(SerializableColor),
    Point(Point),
    Rect(Rect),
    /// One float per vertex (or a flat float buffer).
    Floats(Vec<f64>),
    Points(Vec<Point>),
    Rects(Vec<Rect>),
    Colors(Vec<SerializableColor>),
}

impl FieldValue {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
            FieldValue::Color(_) => "color",
            FieldValue::Point(_) => "point",
            FieldValue::Rect(_) => "rect",
            FieldValue::Floats(_) => "floats",
            FieldValue::Points(_) => "points",
            FieldValue::Rects(_) => "rects",
            FieldValue::Colors(_) => "colors",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value; floats with no fractional part are accepted too.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<SerializableColor> {
        match self {
            FieldValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            FieldValue::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_points(&self) -> Option<&[Point]> {
        match self {
            FieldValue::Points(points) => Some(points),
            _ => None,
        }
    }

    /// Rectangles, accepting a single rect as a one-element list.
    pub fn as_rects(&self) -> Option<Vec<Rect>> {
        match self {
            FieldValue::Rect(r) => Some(vec![*r]),
            FieldValue::Rects(rects) => Some(rects.clone()),
            _ => None,
        }
    }

    /// Number of per-vertex entries, for array-valued fields.
    pub fn vertex_len(&self) -> Option<usize> {
        match self {
            FieldValue::Floats(v) => Some(v.len()),
            FieldValue::Points(v) => Some(v.len()),
            FieldValue::Colors(v) => Some(v.len()),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<SerializableColor> for FieldValue {
    fn from(value: SerializableColor) -> Self {
        FieldValue::Color(value)
    }
}

impl From<Color> for FieldValue {
    fn from(value: Color) -> Self {
        FieldValue::Color(value.into())
    }
}

impl From<Point> for FieldValue {
    fn from(value: Point) -> Self {
        FieldValue::Point(value)
    }
}

impl From<Rect> for FieldValue {
    fn from(value: Rect) -> Self {
        FieldValue::Rect(value)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(value: Vec<f64>) -> Self {
        FieldValue::Floats(value)
    }
}

impl From<Vec<Point>> for FieldValue {
    fn from(value: Vec<Point>) -> Self {
        FieldValue::Points(value)
    }
}

impl From<Vec<Rect>> for FieldValue {
    fn from(value: Vec<Rect>) -> Self {
        FieldValue::Rects(value)
    }
}

impl From<Vec<SerializableColor>> for FieldValue {
    fn from(value: Vec<SerializableColor>) -> Self {
        FieldValue::Colors(value)
    }
}
