#![forbid(unsafe_code)]

//! Server-style render entry points.
//!
//! Neither [`render_to_string`] nor [`render_to_static_markup`] resets the
//! identifier context. Callers that need two renders of the same input to
//! match reset first, or use [`render_isolated`].

use fdnd_core::id_context::IdContext;

use crate::markup::Markup;
use crate::region::{Render, RenderCx};

/// Attribute marking the top element of a hydratable render.
pub const ROOT_ATTR: &str = "data-fdnd-root";

/// Render for hydration: the first element carries [`ROOT_ATTR`].
pub fn render_to_string(root: &impl Render, ids: &IdContext) -> String {
    render_with(Markup::new().with_root_attr(ROOT_ATTR, ""), root, ids)
}

/// Render plain markup with no hydration marker.
pub fn render_to_static_markup(root: &impl Render, ids: &IdContext) -> String {
    render_with(Markup::new(), root, ids)
}

/// Reset `ids`, then [`render_to_string`] inside one render pass.
pub fn render_isolated(root: &impl Render, ids: &IdContext) -> String {
    let pass = ids.begin_pass();
    render_to_string(root, &pass)
}

fn render_with(markup: Markup, root: &impl Render, ids: &IdContext) -> String {
    let mut cx = RenderCx::new(markup, ids);
    root.render(&mut cx);
    let out = cx.finish();
    tracing::trace!(bytes = out.len(), issued = ids.issued(), "rendered");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{DragDropRoot, DroppableList};

    #[test]
    fn static_markup_has_no_root_marker() {
        let ids = IdContext::new();
        let items = ["A"];
        let out = render_to_static_markup(&DragDropRoot::new(DroppableList::new("l", &items)), &ids);
        assert!(!out.contains(ROOT_ATTR));
        assert!(out.starts_with(r#"<div data-fdnd-context-id="context-0">"#));
    }

    #[test]
    fn root_marker_precedes_context_id() {
        let ids = IdContext::new();
        let items = ["A"];
        let out = render_to_string(&DragDropRoot::new(DroppableList::new("l", &items)), &ids);
        assert!(out.starts_with(r#"<div data-fdnd-root="" data-fdnd-context-id="context-0">"#));
        assert_eq!(out.matches(ROOT_ATTR).count(), 1);
    }

    #[test]
    fn isolated_renders_match() {
        let ids = IdContext::new();
        let items = ["A", "B"];
        let app = DragDropRoot::new(DroppableList::new("l", &items));
        let first = render_isolated(&app, &ids);
        let second = render_isolated(&app, &ids);
        assert_eq!(first, second);
        assert_eq!(ids.generation(), 2);
    }
}
