//! Built-in processors.

use crate::error::ProcessError;
use crate::events::NAVIGATION_RECTANGLE_EVENT;
use crate::processor::{Cursor, EventProcessor, Handler};
use std::cell::Cell;
use std::rc::Rc;

/// Name under which [`navigation_rectangle_processor`] is usually added.
pub const NAVIGATION_PROCESSOR: &str = "navigation";

/// Show the navigation rectangle while a zoom box is being dragged.
///
/// The rectangle follows the `NavigationRectangle` event's rect parameter
/// and is hidden on the next idle event.
pub fn navigation_rectangle_processor(processor: &mut EventProcessor) {
    let shown = Rc::new(Cell::new(false));

    let on_drag = shown.clone();
    processor.register(
        NAVIGATION_RECTANGLE_EVENT,
        Handler::native(move |processor, ctx, parameter| {
            let rect = parameter.as_rect().ok_or_else(|| {
                ProcessError::Handler(format!(
                    "{} expects a rectangle, got {:?}",
                    NAVIGATION_RECTANGLE_EVENT, parameter
                ))
            })?;
            ctx.paint_manager().show_navigation_rectangle(rect)?;
            processor.set_cursor(Some(Cursor::Cross));
            on_drag.set(true);
            Ok(())
        }),
    );

    processor.register(
        None::<&str>,
        Handler::native(move |processor, ctx, _| {
            if shown.replace(false) {
                ctx.paint_manager().hide_navigation_rectangle()?;
                processor.set_cursor(None);
            }
            Ok(())
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventParameter;
    use crate::interaction::InteractionManager;
    use analyst_core::{FieldValue, WidgetConfig};
    use analyst_render::{
        NAVIGATION_RECTANGLE_VISUAL, NullContext, PaintManager, RecordingRenderer, RenderLog,
    };
    use kurbo::Rect;

    fn manager() -> (InteractionManager, RenderLog) {
        let log = RenderLog::new();
        let config = WidgetConfig {
            navigation_rectangle: true,
            ..WidgetConfig::default()
        };
        let mut paint = PaintManager::new(config, RecordingRenderer::factory(log.clone()), NullContext);
        paint.initialize_graphics().unwrap();
        let mut manager = InteractionManager::new(paint);
        manager
            .add_processor(NAVIGATION_PROCESSOR, navigation_rectangle_processor)
            .unwrap();
        (manager, log)
    }

    fn visible(log: &RenderLog) -> Option<FieldValue> {
        log.field(NAVIGATION_RECTANGLE_VISUAL, "visible")
    }

    #[test]
    fn test_rectangle_shown_then_hidden() {
        let (mut manager, log) = manager();
        assert_eq!(visible(&log), Some(FieldValue::from(false)));

        let rect = Rect::new(-0.5, -0.25, 0.5, 0.25);
        manager
            .process_event(NAVIGATION_RECTANGLE_EVENT, EventParameter::Rect(rect))
            .unwrap();
        assert_eq!(visible(&log), Some(FieldValue::from(true)));
        assert_eq!(
            log.field(NAVIGATION_RECTANGLE_VISUAL, "coordinates"),
            Some(FieldValue::from(vec![rect]))
        );
        let cursor = manager.get_processor(NAVIGATION_PROCESSOR).unwrap().cursor();
        assert_eq!(cursor, Some(Cursor::Cross));

        manager.process_none().unwrap();
        assert_eq!(visible(&log), Some(FieldValue::from(false)));
        assert_eq!(manager.get_processor(NAVIGATION_PROCESSOR).unwrap().cursor(), None);
    }

    #[test]
    fn test_idle_without_rectangle_does_nothing() {
        let (mut manager, log) = manager();
        let before = log.set_data_calls(NAVIGATION_RECTANGLE_VISUAL).len();
        manager.process_none().unwrap();
        assert_eq!(log.set_data_calls(NAVIGATION_RECTANGLE_VISUAL).len(), before);
    }

    #[test]
    fn test_non_rect_parameter_rejected() {
        let (mut manager, _log) = manager();
        let result = manager.process_event(NAVIGATION_RECTANGLE_EVENT, EventParameter::Scalar(1.0));
        assert!(matches!(result, Err(ProcessError::Handler(_))));
    }
}
