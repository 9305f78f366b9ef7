//! Grid visual.

use super::{Layout, PrimitiveType, read};
use crate::error::{CoreError, CoreResult};
use crate::value::{FieldValue, Fields, SerializableColor};

/// Ticks per axis when none are given.
pub const DEFAULT_NTICKS: usize = 10;

/// Grid lines: `nticks` vertical and `nticks` horizontal lines, two vertices each.
pub(super) fn layout(params: &Fields) -> CoreResult<Layout> {
    let nticks = match read(params, "nticks", "int", FieldValue::as_int)? {
        Some(n) => usize::try_from(n).map_err(|_| CoreError::InvalidField {
            field: "nticks".to_string(),
            expected: "non-negative int",
            actual: "negative int",
        })?,
        None => DEFAULT_NTICKS,
    };
    let color = read(params, "color", "color", FieldValue::as_color)?
        .unwrap_or(SerializableColor::new(255, 255, 255, 77));

    Ok(Layout {
        size: nticks * 4,
        primitive_type: PrimitiveType::Lines,
        fields: crate::fields! {
            "nticks" => nticks,
            "color" => color,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ticks() {
        let layout = layout(&Fields::new()).unwrap();
        assert_eq!(layout.size, DEFAULT_NTICKS * 4);
    }

    #[test]
    fn test_negative_ticks_rejected() {
        let result = layout(&crate::fields! { "nticks" => -1 });
        assert!(matches!(result, Err(CoreError::InvalidField { .. })));
    }
}
