//! Event processors.
//!
//! An event processor owns the handlers of one interaction mode (navigation,
//! selection, ...). Handlers are tagged at registration time:
//! - [`Handler::Native`] handlers are written against the processor and the
//!   interaction context, and get both;
//! - [`Handler::External`] handlers are written against a plotting figure,
//!   and get a [`FigureBridge`] exposing the paint and interaction surface
//!   next to the figure.

use crate::error::ProcessResult;
use crate::events::{EventKey, EventParameter};
use crate::figure::FigureBridge;
use crate::interaction::InteractionContext;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Handler bound to the processor and interaction context.
pub type NativeHandler =
    Rc<dyn Fn(&mut EventProcessor, &mut InteractionContext<'_>, &EventParameter) -> ProcessResult<()>>;

/// Handler written against an external figure.
pub type ExternalHandler = Rc<dyn Fn(&mut FigureBridge<'_, '_>, &EventParameter) -> ProcessResult<()>>;

/// A registered event handler and its calling convention.
#[derive(Clone)]
pub enum Handler {
    Native(NativeHandler),
    External(ExternalHandler),
}

impl Handler {
    pub fn native<F>(handler: F) -> Self
    where
        F: Fn(&mut EventProcessor, &mut InteractionContext<'_>, &EventParameter) -> ProcessResult<()>
            + 'static,
    {
        Handler::Native(Rc::new(handler))
    }

    pub fn external<F>(handler: F) -> Self
    where
        F: Fn(&mut FigureBridge<'_, '_>, &EventParameter) -> ProcessResult<()> + 'static,
    {
        Handler::External(Rc::new(handler))
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Handler::Native(_))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Native(_) => f.write_str("Handler::Native"),
            Handler::External(_) => f.write_str("Handler::External"),
        }
    }
}

/// Cursor a processor would like the host widget to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Arrow,
    Cross,
    OpenHand,
    ClosedHand,
    Pointing,
    Wait,
}

/// Processes several related events.
#[derive(Debug)]
pub struct EventProcessor {
    name: String,
    handlers: HashMap<EventKey, Handler>,
    activated: bool,
    cursor: Option<Cursor>,
}

impl EventProcessor {
    /// Create an active processor and let `initialize` register its handlers.
    pub fn new(name: impl Into<String>, initialize: impl FnOnce(&mut EventProcessor)) -> Self {
        let mut processor = Self {
            name: name.into(),
            handlers: HashMap::new(),
            activated: true,
            cursor: None,
        };
        initialize(&mut processor);
        processor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Activate or deactivate the processor.
    pub fn activate(&mut self, activated: bool) {
        self.activated = activated;
    }

    pub fn deactivate(&mut self) {
        self.activated = false;
    }

    pub fn is_active(&self) -> bool {
        self.activated
    }

    /// Register a handler for the event, replacing any previous one.
    pub fn register(&mut self, event: impl Into<EventKey>, handler: Handler) {
        self.handlers.insert(event.into(), handler);
    }

    /// Whether a handler is registered for the event.
    pub fn registered(&self, event: &EventKey) -> bool {
        self.handlers.contains_key(event)
    }

    pub fn set_cursor(&mut self, cursor: Option<Cursor>) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Process an event by calling the registered handler, if there is one.
    ///
    /// Returns whether a handler ran. Inactive processors and unknown
    /// events are silently ignored.
    pub fn process(
        &mut self,
        event: &EventKey,
        parameter: &EventParameter,
        ctx: &mut InteractionContext<'_>,
    ) -> ProcessResult<bool> {
        if !self.activated {
            return Ok(false);
        }
        let Some(handler) = self.handlers.get(event).cloned() else {
            return Ok(false);
        };
        log::debug!("{}: handling {} ({:?})", self.name, event, handler);

        match handler {
            Handler::Native(handler) => handler(self, ctx, parameter)?,
            Handler::External(handler) => {
                let mut bridge = FigureBridge::attach(self, ctx, event)?;
                handler(&mut bridge, parameter)?;
            }
        }
        Ok(true)
    }

    /// Process the idle event, sent when there is no event or one just finished.
    pub fn process_none(&mut self, ctx: &mut InteractionContext<'_>) -> ProcessResult<bool> {
        self.process(&EventKey::Idle, &EventParameter::None, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::FigureSlot;
    use analyst_core::WidgetConfig;
    use analyst_render::{NullContext, PaintManager, RecordingRenderer, RenderLog};
    use std::cell::Cell;
    use std::collections::VecDeque;

    fn paint() -> PaintManager {
        PaintManager::new(
            WidgetConfig::default(),
            RecordingRenderer::factory(RenderLog::new()),
            NullContext,
        )
    }

    fn counting(counter: &Rc<Cell<u32>>) -> Handler {
        let counter = counter.clone();
        Handler::native(move |_, _, _| {
            counter.set(counter.get() + 1);
            Ok(())
        })
    }

    #[test]
    fn test_new_processor_is_active() {
        let processor = EventProcessor::new("nav", |_| {});
        assert!(processor.is_active());
        assert_eq!(processor.name(), "nav");
        assert_eq!(processor.cursor(), None);
    }

    #[test]
    fn test_initializer_registers() {
        let processor = EventProcessor::new("nav", |p| {
            p.register("Pan", Handler::native(|_, _, _| Ok(())));
        });
        assert!(processor.registered(&EventKey::from("Pan")));
        assert!(!processor.registered(&EventKey::from("Zoom")));
        assert!(!processor.registered(&EventKey::Idle));
    }

    #[test]
    fn test_last_registration_wins() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut processor = EventProcessor::new("nav", |_| {});
        processor.register("Pan", counting(&first));
        processor.register("Pan", counting(&second));

        let mut paint = paint();
        let mut figure = FigureSlot::default();
        let mut queue = VecDeque::new();
        let mut ctx = InteractionContext::detached(&mut paint, &mut figure, &mut queue);
        assert!(processor.process(&"Pan".into(), &EventParameter::None, &mut ctx).unwrap());

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_deactivated_processor_drops_events() {
        let calls = Rc::new(Cell::new(0));
        let mut processor = EventProcessor::new("nav", |_| {});
        processor.register("Pan", counting(&calls));
        processor.deactivate();

        let mut paint = paint();
        let mut figure = FigureSlot::default();
        let mut queue = VecDeque::new();
        let mut ctx = InteractionContext::detached(&mut paint, &mut figure, &mut queue);
        assert!(!processor.process(&"Pan".into(), &EventParameter::None, &mut ctx).unwrap());
        assert_eq!(calls.get(), 0);

        processor.activate(true);
        assert!(processor.process(&"Pan".into(), &EventParameter::None, &mut ctx).unwrap());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_unregistered_event_ignored() {
        let mut processor = EventProcessor::new("nav", |_| {});
        let mut paint = paint();
        let mut figure = FigureSlot::default();
        let mut queue = VecDeque::new();
        let mut ctx = InteractionContext::detached(&mut paint, &mut figure, &mut queue);
        assert!(!processor.process(&"Zoom".into(), &EventParameter::Scalar(2.0), &mut ctx).unwrap());
    }

    #[test]
    fn test_process_none_reaches_idle_handler() {
        let calls = Rc::new(Cell::new(0));
        let mut processor = EventProcessor::new("nav", |_| {});
        processor.register(None::<&str>, counting(&calls));

        let mut paint = paint();
        let mut figure = FigureSlot::default();
        let mut queue = VecDeque::new();
        let mut ctx = InteractionContext::detached(&mut paint, &mut figure, &mut queue);
        assert!(processor.process_none(&mut ctx).unwrap());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_native_handler_gets_processor_and_parameter() {
        let mut processor = EventProcessor::new("grab", |p| {
            p.register(
                "Grab",
                Handler::native(|processor, _, parameter| {
                    if parameter.as_point().is_some() {
                        processor.set_cursor(Some(Cursor::ClosedHand));
                    }
                    Ok(())
                }),
            );
        });

        let mut paint = paint();
        let mut figure = FigureSlot::default();
        let mut queue = VecDeque::new();
        let mut ctx = InteractionContext::detached(&mut paint, &mut figure, &mut queue);
        processor
            .process(&"Grab".into(), &EventParameter::Point(kurbo::Point::ZERO), &mut ctx)
            .unwrap();
        assert_eq!(processor.cursor(), Some(Cursor::ClosedHand));
    }
}
