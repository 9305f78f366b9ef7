//! Interaction manager: owns the processors and dispatches events to them.

use crate::error::{ProcessError, ProcessResult};
use crate::events::{EventKey, EventParameter};
use crate::processor::EventProcessor;
use analyst_core::{Fields, NewVisual, Visual};
use analyst_render::PaintManager;
use std::any::Any;
use std::collections::VecDeque;

/// Maximum number of interactions handlers may chain from one event.
pub const MAX_CHAINED_INTERACTIONS: usize = 64;

/// An interaction chained by a handler, waiting to be dispatched.
pub type QueuedInteraction = (EventKey, EventParameter);

/// Holds the external figure object handed to external handlers.
#[derive(Default)]
pub struct FigureSlot {
    figure: Option<Box<dyn Any>>,
    /// Set the first time an external handler ran against this figure.
    bridged: bool,
}

impl FigureSlot {
    pub fn new(figure: impl Any) -> Self {
        Self {
            figure: Some(Box::new(figure)),
            bridged: false,
        }
    }

    /// Replace the figure. The new figure has not been bridged yet.
    pub fn set(&mut self, figure: impl Any) {
        self.figure = Some(Box::new(figure));
        self.bridged = false;
    }

    pub fn is_attached(&self) -> bool {
        self.figure.is_some()
    }

    pub fn is_bridged(&self) -> bool {
        self.bridged
    }

    /// Mark the figure bridged; returns true the first time only.
    pub(crate) fn mark_bridged(&mut self) -> bool {
        !std::mem::replace(&mut self.bridged, true)
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.figure.as_ref()?.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.figure.as_mut()?.downcast_mut()
    }
}

impl std::fmt::Debug for FigureSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigureSlot")
            .field("attached", &self.is_attached())
            .field("bridged", &self.bridged)
            .finish()
    }
}

/// The processors other than the one currently handling an event.
#[derive(Default)]
pub struct Siblings<'a> {
    before: &'a mut [EventProcessor],
    after: &'a mut [EventProcessor],
}

impl<'a> Siblings<'a> {
    pub fn get(&self, name: &str) -> Option<&EventProcessor> {
        self.before
            .iter()
            .chain(self.after.iter())
            .find(|p| p.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut EventProcessor> {
        self.before
            .iter_mut()
            .chain(self.after.iter_mut())
            .find(|p| p.name() == name)
    }
}

/// What a handler can reach while an event is being dispatched.
pub struct InteractionContext<'a> {
    paint: &'a mut PaintManager,
    pub(crate) figure: &'a mut FigureSlot,
    siblings: Siblings<'a>,
    queue: &'a mut VecDeque<QueuedInteraction>,
}

impl<'a> InteractionContext<'a> {
    /// A context for a processor driven outside of an [`InteractionManager`].
    pub fn detached(
        paint: &'a mut PaintManager,
        figure: &'a mut FigureSlot,
        queue: &'a mut VecDeque<QueuedInteraction>,
    ) -> Self {
        Self {
            paint,
            figure,
            siblings: Siblings::default(),
            queue,
        }
    }

    pub fn paint_manager(&mut self) -> &mut PaintManager {
        &mut *self.paint
    }

    /// `PaintManager::set_data`.
    pub fn set_data(&mut self, visual: Option<&str>, fields: Fields) -> ProcessResult<()> {
        Ok(self.paint.set_data(visual, fields)?)
    }

    pub fn get_visual(&self, name: &str) -> Option<&Visual> {
        self.paint.get_visual(name)
    }

    /// Add a visual unless one with the same name already exists.
    pub fn add_visual(&mut self, desc: NewVisual) -> ProcessResult<String> {
        if let Some(name) = desc.name.as_deref() {
            if self.paint.get_visual(name).is_some() {
                return Ok(name.to_string());
            }
        }
        Ok(self.paint.add_visual(desc)?)
    }

    /// Look up another processor by name.
    ///
    /// The processor running the handler is not found here: native handlers
    /// get it as their first argument. [`crate::FigureBridge::get_processor`]
    /// covers both, since external handlers have no such argument.
    pub fn get_processor(&mut self, name: &str) -> Option<&mut EventProcessor> {
        self.siblings.get_mut(name)
    }

    /// Queue an interaction, dispatched once the current event is done.
    pub fn process_interaction(&mut self, event: impl Into<EventKey>, parameter: EventParameter) {
        self.queue.push_back((event.into(), parameter));
    }

    pub fn figure<T: Any>(&self) -> Option<&T> {
        self.figure.get()
    }
}

/// Owns the paint manager, the event processors and the figure.
///
/// Events go to every processor in registration order. Interactions queued
/// by handlers are dispatched afterwards, first in first out.
#[derive(Debug)]
pub struct InteractionManager {
    paint: PaintManager,
    processors: Vec<EventProcessor>,
    figure: FigureSlot,
    queue: VecDeque<QueuedInteraction>,
}

impl InteractionManager {
    pub fn new(paint: PaintManager) -> Self {
        Self {
            paint,
            processors: Vec::new(),
            figure: FigureSlot::default(),
            queue: VecDeque::new(),
        }
    }

    /// Attach the figure external handlers are written against.
    pub fn with_figure(mut self, figure: impl Any) -> Self {
        self.figure.set(figure);
        self
    }

    pub fn set_figure(&mut self, figure: impl Any) {
        self.figure.set(figure);
    }

    pub fn figure<T: Any>(&self) -> Option<&T> {
        self.figure.get()
    }

    pub fn figure_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.figure.get_mut()
    }

    pub fn is_figure_bridged(&self) -> bool {
        self.figure.is_bridged()
    }

    pub fn paint_manager(&self) -> &PaintManager {
        &self.paint
    }

    pub fn paint_manager_mut(&mut self) -> &mut PaintManager {
        &mut self.paint
    }

    /// Create a processor and let `initialize` register its handlers.
    pub fn add_processor(
        &mut self,
        name: &str,
        initialize: impl FnOnce(&mut EventProcessor),
    ) -> ProcessResult<&mut EventProcessor> {
        if self.get_processor(name).is_some() {
            return Err(ProcessError::DuplicateProcessor(name.to_string()));
        }
        self.processors.push(EventProcessor::new(name, initialize));
        let index = self.processors.len() - 1;
        Ok(&mut self.processors[index])
    }

    /// Return a processor from its name.
    pub fn get_processor(&self, name: &str) -> Option<&EventProcessor> {
        self.processors.iter().find(|p| p.name() == name)
    }

    pub fn get_processor_mut(&mut self, name: &str) -> Option<&mut EventProcessor> {
        self.processors.iter_mut().find(|p| p.name() == name)
    }

    /// Processor names in registration order.
    pub fn processor_names(&self) -> impl Iterator<Item = &str> {
        self.processors.iter().map(EventProcessor::name)
    }

    /// Activate or deactivate a processor by name.
    pub fn activate_processor(&mut self, name: &str, activated: bool) -> ProcessResult<()> {
        let processor = self
            .get_processor_mut(name)
            .ok_or_else(|| ProcessError::ProcessorNotFound(name.to_string()))?;
        processor.activate(activated);
        Ok(())
    }

    /// Dispatch an event, then every interaction the handlers chained from it.
    pub fn process_event(
        &mut self,
        event: impl Into<EventKey>,
        parameter: EventParameter,
    ) -> ProcessResult<()> {
        self.queue.push_back((event.into(), parameter));
        let mut dispatched = 0;
        while let Some((event, parameter)) = self.queue.pop_front() {
            if dispatched > MAX_CHAINED_INTERACTIONS {
                self.queue.clear();
                return Err(ProcessError::InteractionOverflow(MAX_CHAINED_INTERACTIONS));
            }
            dispatched += 1;
            if let Err(e) = self.dispatch(&event, &parameter) {
                self.queue.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Dispatch the idle event.
    pub fn process_none(&mut self) -> ProcessResult<()> {
        self.process_event(EventKey::Idle, EventParameter::None)
    }

    fn dispatch(&mut self, event: &EventKey, parameter: &EventParameter) -> ProcessResult<()> {
        for index in 0..self.processors.len() {
            let (before, rest) = self.processors.split_at_mut(index);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            let mut ctx = InteractionContext {
                paint: &mut self.paint,
                figure: &mut self.figure,
                siblings: Siblings { before, after },
                queue: &mut self.queue,
            };
            current.process(event, parameter, &mut ctx)?;
        }
        Ok(())
    }
}
