//! Analyst Core Library
//!
//! Scene description, visual descriptors and staged field updates for the
//! analyst plotting widget. Nothing in this crate talks to the GPU.

pub mod config;
pub mod editor;
pub mod error;
pub mod names;
pub mod pending;
pub mod scene;
pub mod value;
pub mod visual;

pub use config::WidgetConfig;
pub use editor::SceneEditor;
pub use error::{CoreError, CoreResult};
pub use names::VisualNameAllocator;
pub use pending::{Flush, PendingUpdates};
pub use scene::Scene;
pub use value::{FieldValue, Fields, SerializableColor};
pub use visual::{NewVisual, PrimitiveType, SPECIAL_KEYS, Visual, VisualKind, is_special_key};
