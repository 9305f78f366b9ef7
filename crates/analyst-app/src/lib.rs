//! Analyst App Library
//!
//! Event processing for the analyst plotting widget: processors and their
//! handlers, the interaction manager dispatching events to them, and the
//! bridge handing external figures to handlers written against them.

mod error;
mod events;
mod figure;
mod interaction;
mod navigation;
mod processor;

pub use error::{ProcessError, ProcessResult};
pub use events::{EventKey, EventParameter, NAVIGATION_RECTANGLE_EVENT};
pub use figure::FigureBridge;
pub use interaction::{
    FigureSlot, InteractionContext, InteractionManager, MAX_CHAINED_INTERACTIONS,
    QueuedInteraction, Siblings,
};
pub use navigation::{NAVIGATION_PROCESSOR, navigation_rectangle_processor};
pub use processor::{Cursor, EventProcessor, ExternalHandler, Handler, NativeHandler};
