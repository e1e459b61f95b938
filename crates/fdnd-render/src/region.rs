#![forbid(unsafe_code)]

//! Draggable and droppable regions.
//!
//! Each region asks the pass's [`IdContext`] for exactly one identifier when
//! it renders, in document order. That is the only source of variation
//! between two renders of the same input, which is what makes a reset
//! render reproducible.

use std::borrow::Cow;

use fdnd_core::id_context::IdContext;
use fdnd_core::item::{Draggable, DraggableItem};

use crate::markup::Markup;

/// Attribute naming the context a region belongs to.
pub const CONTEXT_ID_ATTR: &str = "data-fdnd-context-id";
/// Attribute carrying a droppable's host id.
pub const DROPPABLE_ID_ATTR: &str = "data-fdnd-droppable-id";
/// Attribute carrying a draggable's host id.
pub const DRAGGABLE_ID_ATTR: &str = "data-fdnd-draggable-id";
/// Attribute carrying the per-pass region identifier.
pub const REGION_ATTR: &str = "data-fdnd-region";

// ---------------------------------------------------------------------------
// Render plumbing
// ---------------------------------------------------------------------------

/// Per-pass rendering state.
#[derive(Debug)]
pub struct RenderCx<'a> {
    pub markup: Markup,
    ids: &'a IdContext,
    context_id: Option<String>,
}

impl<'a> RenderCx<'a> {
    #[must_use]
    pub fn new(markup: Markup, ids: &'a IdContext) -> Self {
        Self {
            markup,
            ids,
            context_id: None,
        }
    }

    /// Issue the next region identifier for this pass.
    pub fn next_id(&self, scope_key: &str) -> String {
        self.ids.next_id(scope_key)
    }

    /// Id of the enclosing [`DragDropRoot`], if any.
    #[must_use]
    pub fn context_id(&self) -> Option<&str> {
        self.context_id.as_deref()
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.markup.finish()
    }
}

/// Something that writes markup during a render pass.
pub trait Render {
    fn render(&self, cx: &mut RenderCx<'_>);
}

impl<R: Render + ?Sized> Render for &R {
    fn render(&self, cx: &mut RenderCx<'_>) {
        (**self).render(cx);
    }
}

/// Siblings, rendered left to right.
impl<A: Render, B: Render> Render for (A, B) {
    fn render(&self, cx: &mut RenderCx<'_>) {
        self.0.render(cx);
        self.1.render(cx);
    }
}

/// Visible text of a list item.
pub trait Labeled: Draggable {
    fn label(&self) -> Cow<'_, str>;
}

impl Labeled for DraggableItem {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }
}

impl Labeled for String {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Labeled for &str {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }
}

// ---------------------------------------------------------------------------
// DragDropRoot
// ---------------------------------------------------------------------------

/// Outermost region; every draggable and droppable nested in it shares its
/// context id.
pub struct DragDropRoot<C> {
    pub children: C,
}

impl<C: Render> DragDropRoot<C> {
    pub fn new(children: C) -> Self {
        Self { children }
    }
}

impl<C: Render> Render for DragDropRoot<C> {
    fn render(&self, cx: &mut RenderCx<'_>) {
        let context_id = cx.next_id("context");
        cx.markup.open("div", &[(CONTEXT_ID_ATTR, context_id.as_str())]);
        let outer = cx.context_id.replace(context_id);
        self.children.render(cx);
        cx.context_id = outer;
        cx.markup.close();
    }
}

// ---------------------------------------------------------------------------
// DroppableList
// ---------------------------------------------------------------------------

/// A droppable region rendering its draggables in order.
pub struct DroppableList<'a, T> {
    pub droppable_id: &'a str,
    pub items: &'a [T],
    /// Item currently being dragged, if any.
    pub dragging: Option<&'a str>,
    pub drop_disabled: bool,
}

impl<'a, T: Labeled> DroppableList<'a, T> {
    pub fn new(droppable_id: &'a str, items: &'a [T]) -> Self {
        Self {
            droppable_id,
            items,
            dragging: None,
            drop_disabled: false,
        }
    }

    #[must_use]
    pub fn dragging(mut self, draggable_id: Option<&'a str>) -> Self {
        self.dragging = draggable_id;
        self
    }

    #[must_use]
    pub fn drop_disabled(mut self, disabled: bool) -> Self {
        self.drop_disabled = disabled;
        self
    }
}

impl<T: Labeled> Render for DroppableList<'_, T> {
    fn render(&self, cx: &mut RenderCx<'_>) {
        let context_id = cx.context_id().unwrap_or_default().to_string();
        if context_id.is_empty() {
            tracing::warn!(
                droppable_id = self.droppable_id,
                "droppable rendered outside a drag drop root"
            );
        }
        let region = cx.next_id("droppable");
        let mut attrs = vec![
            (DROPPABLE_ID_ATTR, self.droppable_id),
            (CONTEXT_ID_ATTR, context_id.as_str()),
            (REGION_ATTR, region.as_str()),
        ];
        if self.drop_disabled {
            attrs.push(("data-fdnd-drop-disabled", "true"));
        }
        cx.markup.open("div", &attrs);
        for item in self.items {
            render_draggable(cx, &context_id, item, self.dragging);
        }
        cx.markup.close();
    }
}

fn render_draggable<T: Labeled>(
    cx: &mut RenderCx<'_>,
    context_id: &str,
    item: &T,
    dragging: Option<&str>,
) {
    let region = cx.next_id("draggable");
    let id = item.draggable_id();
    let mut attrs = vec![
        (DRAGGABLE_ID_ATTR, id),
        (CONTEXT_ID_ATTR, context_id),
        (REGION_ATTR, region.as_str()),
        ("tabindex", "0"),
        ("role", "button"),
    ];
    if dragging == Some(id) {
        attrs.push(("data-fdnd-dragging", "true"));
    }
    cx.markup.element("div", &attrs, &item.label());
}
