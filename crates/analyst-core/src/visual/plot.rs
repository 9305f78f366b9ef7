//! Plot visual: a line strip or a scatter of points.

use super::{Layout, PrimitiveType, read};
use crate::error::CoreResult;
use crate::value::{FieldValue, Fields, SerializableColor};

pub(super) fn layout(params: &Fields) -> CoreResult<Layout> {
    let position = read(params, "position", "points", |v| v.as_points().map(<[_]>::to_vec))?
        .unwrap_or_default();
    let scatter = read(params, "scatter", "bool", FieldValue::as_bool)?.unwrap_or(false);
    // A single color, or one color per point.
    let color = match params.get("color") {
        Some(value @ (FieldValue::Color(_) | FieldValue::Colors(_))) => value.clone(),
        Some(other) => {
            return Err(crate::CoreError::InvalidField {
                field: "color".to_string(),
                expected: "color or colors",
                actual: other.type_name(),
            });
        }
        None => FieldValue::Color(SerializableColor::white()),
    };

    let primitive_type = if scatter {
        PrimitiveType::Points
    } else {
        PrimitiveType::LineStrip
    };

    let mut fields = crate::fields! { "position" => position.clone() };
    fields.insert("color".to_string(), color);

    Ok(Layout {
        size: position.len(),
        primitive_type,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_line_strip_by_default() {
        let layout = layout(&crate::fields! { "position" => vec![Point::ZERO; 4] }).unwrap();
        assert_eq!(layout.size, 4);
        assert_eq!(layout.primitive_type, PrimitiveType::LineStrip);
    }

    #[test]
    fn test_rejects_text_color() {
        assert!(layout(&crate::fields! { "color" => "red" }).is_err());
    }
}
