//! Bridge between external handlers and the widget.
//!
//! External handlers are written against a plotting figure object rather
//! than against the widget. The bridge hands them that figure together with
//! the paint and interaction operations they are allowed to call.

use crate::error::{ProcessError, ProcessResult};
use crate::events::{EventKey, EventParameter};
use crate::interaction::InteractionContext;
use crate::processor::EventProcessor;
use analyst_core::{Fields, Visual};
use std::any::Any;

/// Figure plus widget surface, as seen by an external handler.
pub struct FigureBridge<'p, 'c> {
    processor: &'p mut EventProcessor,
    ctx: &'p mut InteractionContext<'c>,
}

impl<'p, 'c> FigureBridge<'p, 'c> {
    pub(crate) fn attach(
        processor: &'p mut EventProcessor,
        ctx: &'p mut InteractionContext<'c>,
        event: &EventKey,
    ) -> ProcessResult<Self> {
        if !ctx.figure.is_attached() {
            return Err(ProcessError::UnsupportedHandler {
                processor: processor.name().to_string(),
                event: event.clone(),
                reason: "no figure attached",
            });
        }
        if ctx.figure.mark_bridged() {
            log::debug!("Figure bridged for processor `{}`", processor.name());
        }
        Ok(Self { processor, ctx })
    }

    /// The figure, if it is a `T`.
    pub fn figure<T: Any>(&self) -> Option<&T> {
        self.ctx.figure.get()
    }

    pub fn figure_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.ctx.figure.get_mut()
    }

    /// The processor running the handler.
    pub fn processor(&mut self) -> &mut EventProcessor {
        &mut *self.processor
    }

    pub fn set_data(&mut self, visual: Option<&str>, fields: Fields) -> ProcessResult<()> {
        self.ctx.set_data(visual, fields)
    }

    pub fn copy_texture(&mut self, src: &str, dst: &str, visual: Option<&str>) -> ProcessResult<()> {
        Ok(self.ctx.paint_manager().copy_texture(src, dst, visual)?)
    }

    pub fn set_rendering_options(&mut self, options: Fields) {
        self.ctx.paint_manager().set_rendering_options(options);
    }

    pub fn get_visual(&self, name: &str) -> Option<&Visual> {
        self.ctx.get_visual(name)
    }

    /// Look up a processor by name, including the one running the handler.
    pub fn get_processor(&mut self, name: &str) -> Option<&mut EventProcessor> {
        if self.processor.name() == name {
            return Some(&mut *self.processor);
        }
        self.ctx.get_processor(name)
    }

    pub fn process_interaction(&mut self, event: impl Into<EventKey>, parameter: EventParameter) {
        self.ctx.process_interaction(event, parameter);
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: u32, height: u32) -> ProcessResult<()> {
        Ok(self.ctx.paint_manager().resize(width, height)?)
    }

    /// Ask the host widget for a repaint.
    pub fn update(&mut self) {
        self.ctx.paint_manager().update_gl();
    }
}
