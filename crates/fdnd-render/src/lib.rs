#![forbid(unsafe_code)]

//! Markup rendering for draggable lists.
//!
//! # Role in FrankenDnD
//! `fdnd-render` turns a list and its drag state into escaped markup. Every
//! draggable and droppable region draws one identifier from the
//! [`IdContext`](fdnd_core::IdContext) of the pass, so server output is
//! reproducible once the context is reset.
//!
//! # Example
//! ```
//! use fdnd_core::IdContext;
//! use fdnd_render::{render_to_string, DragDropRoot, DroppableList};
//!
//! let ids = IdContext::new();
//! let items = ["A", "B", "C"];
//! let app = DragDropRoot::new(DroppableList::new("list", &items));
//!
//! ids.reset();
//! let first = render_to_string(&app, &ids);
//! ids.reset();
//! assert_eq!(first, render_to_string(&app, &ids));
//! ```

pub mod markup;
pub mod region;
pub mod server;

pub use markup::{Markup, escape};
pub use region::{DragDropRoot, DroppableList, Labeled, Render, RenderCx};
pub use server::{render_isolated, render_to_static_markup, render_to_string};
