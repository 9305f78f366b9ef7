//! Rectangles visual.

use super::{Layout, PrimitiveType, read};
use crate::error::CoreResult;
use crate::value::{FieldValue, Fields, SerializableColor};

/// Vertices of a lone rectangle drawn as a triangle strip.
const STRIP_VERTICES: usize = 4;
/// Vertices per rectangle when several are drawn as triangle pairs.
const TRIANGLE_VERTICES: usize = 6;

pub(super) fn layout(params: &Fields) -> CoreResult<Layout> {
    let rects = read(params, "coordinates", "rect or rects", FieldValue::as_rects)?.unwrap_or_default();
    let color = read(params, "color", "color", FieldValue::as_color)?.unwrap_or_else(SerializableColor::white);

    let (size, primitive_type) = match rects.len() {
        1 => (STRIP_VERTICES, PrimitiveType::TriangleStrip),
        n => (n * TRIANGLE_VERTICES, PrimitiveType::Triangles),
    };

    Ok(Layout {
        size,
        primitive_type,
        fields: crate::fields! {
            "coordinates" => rects,
            "color" => color,
        },
    })
}
