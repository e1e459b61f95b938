#![forbid(unsafe_code)]

//! A reorderable list wired to a [`ControlPanel`].
//!
//! [`ReorderApp`] plays the host role: it owns the list, registers a sensor
//! whose only job is to keep the [`SensorApi`], tracks whether a drag is
//! running, and commits every drop through [`apply_drop`].
//!
//! Two flags drive the panel:
//!
//! - `is_dragging` follows the context: set by `on_drag_start`, cleared by
//!   `on_drag_end`. While it is set the lift button is disabled.
//! - `is_control_dragging` is set when the panel's own lift succeeds and
//!   cleared by `on_drag_end`. It enables the drop and arrow buttons.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fdnd_core::{
    Direction, DndConfig, DragDropContext, DropResult, ListConfig, ListPublisher, MoveOutcome,
    Phase, SensorApi, SnapDragActions, apply_drop,
};
use fdnd_render::{DragDropRoot, DroppableList, Labeled, Render, RenderCx};
use tracing::{debug, error, trace};

use crate::error::{ControlError, Result};
use crate::panel::{ControlPanel, ControlProps, ControlsView};

struct AppState<T> {
    items: Vec<T>,
    is_dragging: bool,
    is_control_dragging: bool,
    dragging_id: Option<String>,
    drops: Vec<DropResult>,
}

/// Host side of the lift: the captured sensor and the shared flags.
struct Host<T> {
    state: Rc<RefCell<AppState<T>>>,
    sensor: Rc<RefCell<Option<SensorApi>>>,
    fault_logged: Cell<bool>,
}

impl<T> Host<T> {
    fn lift(&self, draggable_id: &str) -> Result<Option<SnapDragActions>> {
        if self.state.borrow().is_dragging {
            trace!(draggable_id, "lift refused while a drag is running");
            return Ok(None);
        }
        let Some(api) = self.sensor.borrow().clone() else {
            if !self.fault_logged.replace(true) {
                error!(draggable_id, "unable to find sensor api");
            }
            return Err(ControlError::SensorUnavailable);
        };
        let Some(pre_drag) = api.try_get_lock(draggable_id) else {
            debug!(draggable_id, "unable to start capturing");
            return Ok(None);
        };
        let actions = pre_drag.snap_lift();
        if actions.is_some() {
            self.state.borrow_mut().is_control_dragging = true;
        }
        Ok(actions)
    }
}

/// Builder for [`ReorderApp`].
pub struct ReorderAppBuilder<T> {
    items: Vec<T>,
    list: ListConfig,
    control_sensor: bool,
}

impl<T> ReorderAppBuilder<T>
where
    T: Labeled + Clone + 'static,
{
    #[must_use]
    pub fn list(mut self, list: ListConfig) -> Self {
        self.list = list;
        self
    }

    /// Whether to register the sensor the panel lifts through (default on).
    ///
    /// Hosts that drive the list only through their own sensors turn it
    /// off; panel lifts then fail with [`ControlError::SensorUnavailable`].
    #[must_use]
    pub fn control_sensor(mut self, enabled: bool) -> Self {
        self.control_sensor = enabled;
        self
    }

    pub fn build(self) -> ReorderApp<T> {
        let state = Rc::new(RefCell::new(AppState {
            items: self.items,
            is_dragging: false,
            is_control_dragging: false,
            dragging_id: None,
            drops: Vec::new(),
        }));
        let sensor = Rc::new(RefCell::new(None));
        let publisher: Rc<RefCell<Option<ListPublisher>>> = Rc::new(RefCell::new(None));

        let mut builder = DragDropContext::builder()
            .list(self.list)
            .items(&state.borrow().items);
        if self.control_sensor {
            let slot = Rc::clone(&sensor);
            builder = builder.sensor(move |api| {
                *slot.borrow_mut() = Some(api);
            });
        }

        let on_start = Rc::clone(&state);
        let on_end = Rc::clone(&state);
        let end_publisher = Rc::clone(&publisher);
        let context = builder
            .on_drag_start(move |start| {
                let mut state = on_start.borrow_mut();
                state.is_dragging = true;
                state.dragging_id = Some(start.draggable_id.clone());
            })
            .on_drag_end(move |result| {
                let next = {
                    let mut state = on_end.borrow_mut();
                    state.is_dragging = false;
                    state.is_control_dragging = false;
                    state.dragging_id = None;
                    state.drops.push(result.clone());
                    let next = apply_drop(&state.items, result);
                    if let Some(next) = &next {
                        state.items.clone_from(next);
                    }
                    next
                };
                let Some(next) = next else {
                    return;
                };
                if let Some(publisher) = end_publisher.borrow().as_ref() {
                    publisher.publish(&next);
                }
            })
            .build();
        *publisher.borrow_mut() = Some(context.publisher());

        ReorderApp {
            context,
            host: Host {
                state,
                sensor,
                fault_logged: Cell::new(false),
            },
            panel: ControlPanel::new(),
        }
    }
}

/// A list, its drag drop context, and the control panel driving it.
pub struct ReorderApp<T> {
    context: DragDropContext,
    host: Host<T>,
    panel: ControlPanel,
}

impl<T> ReorderApp<T>
where
    T: Labeled + Clone + 'static,
{
    #[must_use]
    pub fn builder(items: Vec<T>) -> ReorderAppBuilder<T> {
        ReorderAppBuilder {
            items,
            list: ListConfig::default(),
            control_sensor: true,
        }
    }

    /// App with default list settings.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self::builder(items).build()
    }

    /// App using the list section of a loaded configuration.
    #[must_use]
    pub fn with_config(items: Vec<T>, config: &DndConfig) -> Self {
        Self::builder(items).list(config.list.clone()).build()
    }

    /// Current list order.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.host.state.borrow().items.clone()
    }

    /// Ids in current list order.
    #[must_use]
    pub fn item_ids(&self) -> Vec<String> {
        self.host
            .state
            .borrow()
            .items
            .iter()
            .map(|item| item.draggable_id().to_string())
            .collect()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.host.state.borrow().is_dragging
    }

    #[must_use]
    pub fn is_control_dragging(&self) -> bool {
        self.host.state.borrow().is_control_dragging
    }

    /// Every drop result delivered so far, oldest first.
    #[must_use]
    pub fn drop_results(&self) -> Vec<DropResult> {
        self.host.state.borrow().drops.clone()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.context.phase()
    }

    #[must_use]
    pub fn context(&self) -> &DragDropContext {
        &self.context
    }

    /// Request the lock on `draggable_id` and lift it.
    ///
    /// `Ok(None)` when a drag is already running or the lock is refused.
    pub fn lift(&self, draggable_id: &str) -> Result<Option<SnapDragActions>> {
        self.host.lift(draggable_id)
    }

    /// Replace the list, e.g. after an edit outside any drag.
    pub fn set_items(&self, items: Vec<T>) {
        self.context.publish(&items);
        self.host.state.borrow_mut().items = items;
    }

    // -- panel ---------------------------------------------------------------

    #[must_use]
    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    #[must_use]
    pub fn control_props(&self) -> ControlProps {
        let state = self.host.state.borrow();
        ControlProps {
            items: state
                .items
                .iter()
                .map(|item| item.draggable_id().to_string())
                .collect(),
            can_lift: !state.is_dragging,
            is_dragging: state.is_control_dragging,
        }
    }

    #[must_use]
    pub fn controls_view(&self) -> ControlsView {
        self.panel.view(&self.control_props())
    }

    /// Pick the item the lift button targets.
    pub fn select(&mut self, draggable_id: impl Into<String>) {
        self.panel.select(draggable_id);
    }

    /// Press "lift". Returns whether the panel now holds a drag.
    pub fn press_lift(&mut self) -> Result<bool> {
        let props = self.control_props();
        let Self { panel, host, .. } = self;
        panel.lift(&props, |id| host.lift(id))
    }

    /// Press an arrow. `None` when the panel holds no drag.
    pub fn press_arrow(&self, direction: Direction) -> Option<MoveOutcome> {
        self.panel.move_in_direction(direction)
    }

    /// Press "drop".
    pub fn press_drop(&mut self) -> Option<DropResult> {
        self.panel.drop()
    }
}

impl<T> Render for ReorderApp<T>
where
    T: Labeled + Clone + 'static,
{
    fn render(&self, cx: &mut RenderCx<'_>) {
        let list_config = self.context.list_config();
        let view = self.controls_view();
        let state = self.host.state.borrow();
        let list = DroppableList::new(&list_config.droppable_id, &state.items)
            .dragging(state.dragging_id.as_deref())
            .drop_disabled(list_config.drop_disabled);
        DragDropRoot::new((list, view)).render(cx);
    }
}
