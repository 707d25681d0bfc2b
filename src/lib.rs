//! Drag-and-drop state engine for a kanban board.
//!
//! Columns and tasks live in two flat ordered sequences owned by
//! [`BoardStore`]. Drag gestures are tracked by a [`DragSession`] and turned
//! into moves by the pure functions in [`resolver`]. [`BoardEngine`] ties the
//! pieces together for a renderer.

pub mod config;
pub mod engine;
pub mod ids;
pub mod logging;
pub mod model;
pub mod resolver;
pub mod script;
pub mod session;
pub mod store;

pub use config::BoardConfig;
pub use engine::{BoardEngine, EditLock};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use model::{Board, BoardError, Column, DropTarget, EntityKind, Id, Task};
pub use resolver::{ColumnDropPlacement, ColumnReorder, TaskMove};
pub use session::{DragOutcome, DragSession, DragState, IgnoreReason};
pub use store::{BoardStore, TitleTemplates};
