#![forbid(unsafe_code)]

//! Button panel that drives one drag through held capabilities.
//!
//! The panel keeps the [`SnapDragActions`] returned by a lift and routes
//! button presses to it. Lifting itself is delegated to the host, which
//! owns the sensor handle and knows whether a drag is already running.

use fdnd_core::{Direction, DropResult, MoveOutcome, SnapDragActions};
use fdnd_render::{Render, RenderCx};

/// What the host tells the panel before it is drawn or pressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlProps {
    /// Ids offered in the selector, in list order.
    pub items: Vec<String>,
    /// False while any drag (panel or otherwise) is running.
    pub can_lift: bool,
    /// True while the panel's own drag is running.
    pub is_dragging: bool,
}

/// Snapshot of the panel for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub lift_enabled: bool,
    pub drop_enabled: bool,
    pub arrows_enabled: bool,
}

/// Selector, lift/drop buttons and four arrows.
#[derive(Debug, Default)]
pub struct ControlPanel {
    selected: Option<String>,
    actions: Option<SnapDragActions>,
}

impl ControlPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the item the next lift targets.
    pub fn select(&mut self, draggable_id: impl Into<String>) {
        self.selected = Some(draggable_id.into());
    }

    /// Selected id if still offered, otherwise the first option.
    #[must_use]
    pub fn selection<'a>(&'a self, props: &'a ControlProps) -> Option<&'a str> {
        match &self.selected {
            Some(id) if props.items.iter().any(|item| item == id) => Some(id.as_str()),
            _ => props.items.first().map(String::as_str),
        }
    }

    /// True while the panel holds the actions of a drag.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.actions.is_some()
    }

    /// Press "lift".
    ///
    /// `lift` asks the host for drag actions on the selected id. Returns
    /// whether the panel now holds a drag. Pressing while the button is
    /// disabled does nothing.
    pub fn lift<E>(
        &mut self,
        props: &ControlProps,
        lift: impl FnOnce(&str) -> Result<Option<SnapDragActions>, E>,
    ) -> Result<bool, E> {
        if !props.can_lift {
            tracing::trace!("lift pressed while disabled");
            return Ok(false);
        }
        let Some(id) = self.selection(props).map(str::to_owned) else {
            return Ok(false);
        };
        let actions = lift(&id)?;
        let holding = actions.is_some();
        self.actions = actions;
        Ok(holding)
    }

    /// Press "drop". The held actions are released before dropping.
    pub fn drop(&mut self) -> Option<DropResult> {
        let actions = self.actions.take()?;
        actions.drop()
    }

    /// Press an arrow. `None` when no drag is held.
    pub fn move_in_direction(&self, direction: Direction) -> Option<MoveOutcome> {
        self.actions
            .as_ref()
            .map(|actions| actions.move_in_direction(direction))
    }

    #[must_use]
    pub fn view(&self, props: &ControlProps) -> ControlsView {
        ControlsView {
            options: props.items.clone(),
            selected: self.selection(props).map(str::to_owned),
            lift_enabled: props.can_lift,
            drop_enabled: props.is_dragging,
            arrows_enabled: props.is_dragging,
        }
    }
}

const ARROWS: [(Direction, &str); 4] = [
    (Direction::Up, "\u{2191}"),
    (Direction::Left, "\u{2190}"),
    (Direction::Down, "\u{2193}"),
    (Direction::Right, "\u{2192}"),
];

fn button(cx: &mut RenderCx<'_>, action: &str, label: &str, enabled: bool) {
    let mut attrs = vec![("type", "button"), ("data-fdnd-action", action)];
    if !enabled {
        attrs.push(("disabled", ""));
    }
    cx.markup.element("button", &attrs, label);
}

impl Render for ControlsView {
    fn render(&self, cx: &mut RenderCx<'_>) {
        cx.markup.open("div", &[("data-fdnd-controls", "")]);

        let select_attrs: &[(&str, &str)] = if self.lift_enabled {
            &[]
        } else {
            &[("disabled", "")]
        };
        cx.markup.open("select", select_attrs);
        for option in &self.options {
            let label = format!("id: {option}");
            let mut attrs = vec![("value", option.as_str())];
            if self.selected.as_ref() == Some(option) {
                attrs.push(("selected", ""));
            }
            cx.markup.element("option", &attrs, &label);
        }
        cx.markup.close();

        button(cx, "lift", "Lift", self.lift_enabled);
        button(cx, "drop", "Drop", self.drop_enabled);
        for (direction, glyph) in ARROWS {
            button(cx, direction.as_str(), glyph, self.arrows_enabled);
        }
        cx.markup.close();
    }
}
