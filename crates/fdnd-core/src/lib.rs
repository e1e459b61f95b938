#![forbid(unsafe_code)]

//! Core: drag lock protocol, reorder transform, and render identifiers.
//!
//! # Role in FrankenDnD
//! `fdnd-core` owns the two pieces of mutable state the rest of the
//! workspace relies on: the single drag lock of a list and the identifier
//! counter used while rendering draggable regions.
//!
//! # Primary responsibilities
//! - **DragDropContext**: capability-based lock state machine
//!   (`Idle → Pending → Dragging → Idle`).
//! - **DragEngine**: seam to whatever performs the physical move, with a
//!   logical [`SnapListEngine`](engine::SnapListEngine) for single-axis lists.
//! - **reorder**: pure list transform applied after a drop.
//! - **IdContext**: deterministic, resettable render identifiers.
//!
//! # How it fits in the system
//! `fdnd-render` draws lists using [`IdContext`](id_context::IdContext);
//! `fdnd-controls` drives the lock protocol from a control panel and commits
//! drop results through [`reorder::apply_drop`].

pub mod config;
pub mod context;
pub mod engine;
pub mod id_context;
pub mod item;
pub mod reorder;

pub use config::{ConfigError, DndConfig, IdConfig, ListConfig};
pub use context::{
    DragDropContext, DragDropContextBuilder, DragStart, DragUpdate, DropReason, DropResult,
    ListPublisher, LockId, Phase, PreDragActions, SensorApi, SnapDragActions,
};
pub use engine::{Axis, Direction, DragEngine, ListShape, MoveOutcome, SnapListEngine};
pub use id_context::{IdContext, RenderPass};
pub use item::{Draggable, DraggableEntry, DraggableItem};
pub use reorder::{apply_drop, reorder};
