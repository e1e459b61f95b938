#![forbid(unsafe_code)]

//! Programmatic drag controls.
//!
//! # Role in FrankenDnD
//! `fdnd-controls` is a consumer of the lock protocol in `fdnd-core`. A
//! [`ControlPanel`] lifts an item through a captured sensor handle, moves
//! it with arrow presses, and drops it; [`ReorderApp`] hosts the list and
//! commits the resulting [`DropResult`](fdnd_core::DropResult).
//!
//! ```
//! use fdnd_controls::ReorderApp;
//!
//! let mut app = ReorderApp::new(vec!["A", "B", "C"]);
//! app.select("B");
//! assert!(app.press_lift().unwrap());
//! app.press_arrow(fdnd_core::Direction::Up);
//! app.press_drop();
//! assert_eq!(app.item_ids(), ["B", "A", "C"]);
//! ```

pub mod app;
pub mod error;
pub mod panel;

pub use app::{ReorderApp, ReorderAppBuilder};
pub use error::{ControlError, Result};
pub use panel::{ControlPanel, ControlProps, ControlsView};
