#![forbid(unsafe_code)]

//! FrankenDnD public facade crate.
//!
//! Re-exports the lock protocol, reorder transform and render identifiers
//! from `fdnd-core`, the markup renderer from `fdnd-render`, and (with the
//! default `controls` feature) the control panel from `fdnd-controls`.

// --- Core re-exports -------------------------------------------------------

pub use fdnd_core::{
    Axis, ConfigError, Direction, DndConfig, DragDropContext, DragDropContextBuilder, DragEngine,
    DragStart, DragUpdate, Draggable, DraggableEntry, DraggableItem, DropReason, DropResult,
    IdConfig, IdContext, ListConfig, ListPublisher, ListShape, LockId, MoveOutcome, Phase,
    PreDragActions, RenderPass, SensorApi, SnapDragActions, SnapListEngine, apply_drop, reorder,
};

// --- Render re-exports -----------------------------------------------------

pub use fdnd_render::{
    DragDropRoot, DroppableList, Labeled, Markup, Render, RenderCx, render_isolated,
    render_to_static_markup, render_to_string,
};

// --- Controls re-exports ---------------------------------------------------

#[cfg(feature = "controls")]
pub use fdnd_controls::{
    ControlError, ControlPanel, ControlProps, ControlsView, ReorderApp, ReorderAppBuilder,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for FrankenDnD hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[cfg(feature = "controls")]
    #[error(transparent)]
    Control(#[from] ControlError),
}

/// Standard result type for FrankenDnD APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Direction, DndConfig, DragDropContext, DropResult, Error, IdContext, MoveOutcome,
        PreDragActions, Render, Result, SensorApi, SnapDragActions, apply_drop, render_to_string,
    };

    #[cfg(feature = "controls")]
    pub use crate::{ControlPanel, ReorderApp, controls};

    pub use crate::{core, render};
}

pub use fdnd_core as core;
pub use fdnd_render as render;

#[cfg(feature = "controls")]
pub use fdnd_controls as controls;
