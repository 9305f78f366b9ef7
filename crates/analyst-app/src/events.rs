//! Event identifiers and parameters.

use analyst_core::Fields;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event emitted by the built-in navigation processor's caller to show the zoom box.
pub const NAVIGATION_RECTANGLE_EVENT: &str = "NavigationRectangle";

/// Identifies an event a processor can register a handler for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKey {
    /// No event: nothing is happening, or an interaction just finished.
    Idle,
    /// A named interaction event.
    Named(String),
}

impl EventKey {
    pub fn named(name: impl Into<String>) -> Self {
        EventKey::Named(name.into())
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EventKey::Idle)
    }
}

impl From<&str> for EventKey {
    fn from(name: &str) -> Self {
        EventKey::Named(name.to_string())
    }
}

impl From<String> for EventKey {
    fn from(name: String) -> Self {
        EventKey::Named(name)
    }
}

impl<T: Into<EventKey>> From<Option<T>> for EventKey {
    fn from(event: Option<T>) -> Self {
        event.map_or(EventKey::Idle, Into::into)
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKey::Idle => f.write_str("<idle>"),
            EventKey::Named(name) => f.write_str(name),
        }
    }
}

/// Data attached to an event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum EventParameter {
    #[default]
    None,
    Scalar(f64),
    Point(Point),
    Delta(Vec2),
    Rect(Rect),
    Text(String),
    Fields(Fields),
}

impl EventParameter {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            EventParameter::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            EventParameter::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_delta(&self) -> Option<Vec2> {
        match self {
            EventParameter::Delta(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            EventParameter::Rect(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            EventParameter::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_maps_to_idle() {
        assert_eq!(EventKey::from(None::<&str>), EventKey::Idle);
        assert_eq!(EventKey::from(Some("Pan")), EventKey::named("Pan"));
    }

    #[test]
    fn test_display() {
        assert_eq!(EventKey::Idle.to_string(), "<idle>");
        assert_eq!(EventKey::from("Zoom").to_string(), "Zoom");
    }
}
