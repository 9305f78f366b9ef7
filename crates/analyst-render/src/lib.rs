//! Analyst Render Library
//!
//! Renderer abstraction and the paint manager that drives it. The GPU
//! renderer itself lives outside this workspace; a headless recording
//! renderer is provided for tests and tooling.

mod paint;
mod recording;
mod renderer;

pub use paint::{
    FPS_VISUAL, NAVIGATION_RECTANGLE_VISUAL, NoHooks, PaintError, PaintHooks, PaintManager,
    PaintResult, PaintState,
};
pub use recording::{RecordingRenderer, RenderCall, RenderLog};
pub use renderer::{
    GraphicsContext, NullContext, RenderResult, Renderer, RendererError, RendererFactory,
};
