#![forbid(unsafe_code)]

//! Draggable items as seen by the lock protocol.
//!
//! Hosts own their list items. The protocol only ever reads an item's id,
//! so any type can take part by implementing [`Draggable`].

/// Anything that can be registered as a draggable region.
pub trait Draggable {
    /// Id unique within its list and stable across renders of the same
    /// logical state.
    fn draggable_id(&self) -> &str;
}

/// Minimal draggable carrying only an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DraggableItem {
    pub id: String,
}

impl DraggableItem {
    /// Create an item with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Draggable for DraggableItem {
    fn draggable_id(&self) -> &str {
        &self.id
    }
}

impl Draggable for String {
    fn draggable_id(&self) -> &str {
        self
    }
}

impl Draggable for &str {
    fn draggable_id(&self) -> &str {
        self
    }
}

// ---------------------------------------------------------------------------
// DraggableEntry
// ---------------------------------------------------------------------------

/// Registry record for one draggable in the published list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggableEntry {
    pub id: String,
    /// Disabled draggables are listed but can never be locked.
    pub drag_disabled: bool,
}

impl DraggableEntry {
    /// Create an enabled entry.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            drag_disabled: false,
        }
    }

    /// Mark the entry as drag-disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.drag_disabled = true;
        self
    }
}

impl<T: Draggable> From<&T> for DraggableEntry {
    fn from(item: &T) -> Self {
        Self::new(item.draggable_id())
    }
}

/// Build registry entries for an ordered slice of items.
#[must_use]
pub fn entries_for<T: Draggable>(items: &[T]) -> Vec<DraggableEntry> {
    items.iter().map(DraggableEntry::from).collect()
}
