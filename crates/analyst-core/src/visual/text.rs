//! Text visual.

use super::{Layout, PrimitiveType, read};
use crate::error::CoreResult;
use crate::value::{FieldValue, Fields, SerializableColor};
use kurbo::Point;

/// Font size used when none is given.
pub const DEFAULT_FONTSIZE: f64 = 24.0;

/// One point sprite per character, anchored at `coordinates`.
pub(super) fn layout(params: &Fields) -> CoreResult<Layout> {
    let text = read(params, "text", "text", |v| v.as_str().map(str::to_string))?.unwrap_or_default();
    let coordinates = read(params, "coordinates", "point", FieldValue::as_point)?.unwrap_or(Point::ZERO);
    let fontsize = read(params, "fontsize", "float", FieldValue::as_f64)?.unwrap_or(DEFAULT_FONTSIZE);
    let color = read(params, "color", "color", FieldValue::as_color)?.unwrap_or_else(SerializableColor::white);

    Ok(Layout {
        size: text.chars().count(),
        primitive_type: PrimitiveType::Points,
        fields: crate::fields! {
            "text" => text,
            "coordinates" => coordinates,
            "fontsize" => fontsize,
            "color" => color,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let layout = layout(&Fields::new()).unwrap();
        assert_eq!(layout.size, 0);
        assert_eq!(layout.fields["fontsize"].as_f64(), Some(DEFAULT_FONTSIZE));
        assert_eq!(layout.fields["coordinates"].as_point(), Some(Point::ZERO));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let layout = layout(&crate::fields! { "text" => "héllo" }).unwrap();
        assert_eq!(layout.size, 5);
    }
}
