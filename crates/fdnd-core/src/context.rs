#![forbid(unsafe_code)]

//! Lock protocol and drag-action state machine.
//!
//! A [`DragDropContext`] controls one reorderable list. Sensors (pointer,
//! keyboard, or plain code) receive a [`SensorApi`] at setup time and use it
//! to request the single lock. A granted lock comes back as a
//! [`PreDragActions`] capability, which can be lifted into a
//! [`SnapDragActions`] capability that moves the item and finally drops it.
//!
//! # State Machine
//!
//! ```text
//!            try_get_lock            snap_lift
//!   Idle ───────────────▶ Pending ───────────────▶ Dragging
//!    ▲                      │                          │
//!    │   abort / release    │      drop / cancel       │
//!    └──────────────────────┴──────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. At most one lock is outstanding per context.
//! 2. Every lock gets a fresh [`LockId`]; a capability only acts while the
//!    machine still holds the lock it was issued for, in the phase it expects.
//! 3. A capability is single use. After its upgrading or terminal call it
//!    rejects (`None`) or no-ops ([`MoveOutcome::Stale`]) forever.
//! 4. Drop and every kind of cancellation go through one terminal transition,
//!    so the lock is always released and the engine always reset.
//! 5. Responders run after the machine has committed its new state, never
//!    while it is borrowed. Notifications raised from inside a responder are
//!    queued and delivered in order.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Outcome |
//! |---------|-------|---------|
//! | Lock already held | Second sensor, or a queued click | `try_get_lock` returns `None` |
//! | Unknown or disabled draggable | Stale id from the caller | `try_get_lock` returns `None` |
//! | Stale capability | Drag already dropped or cancelled | `None` / `MoveOutcome::Stale` |
//! | Context dropped | Host tore down the list | All handles behave as stale |
//! | Locked item unpublished | Host removed the item mid-drag | Lock force-released as a cancel |
//! | Locked item shifted | Host republished with the item at another index | Lock force-released as a cancel |
//! | Capability dropped unused | Caller discarded its handle | Pending lock abandoned, live drag cancelled |

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::config::ListConfig;
use crate::engine::{Direction, DragEngine, ListShape, MoveOutcome, SnapListEngine};
use crate::item::{Draggable, DraggableEntry};

// ---------------------------------------------------------------------------
// Public value types
// ---------------------------------------------------------------------------

/// Identity of one granted lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LockId(u64);

impl LockId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lock#{}", self.0)
    }
}

/// Coarse machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No lock outstanding.
    Idle,
    /// Lock held, not lifted yet.
    Pending,
    /// Gesture in progress.
    Dragging,
}

/// Why a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Drop,
    Cancel,
}

/// Final outcome of a gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    pub draggable_id: String,
    pub droppable_id: String,
    /// Position of the item when the lock was acquired.
    pub source_index: usize,
    /// Final position, or `None` when there was no valid placement.
    pub destination_index: Option<usize>,
    pub reason: DropReason,
}

/// Payload of `on_drag_start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStart {
    pub draggable_id: String,
    pub droppable_id: String,
    pub source_index: usize,
}

/// Payload of `on_drag_update`, sent after every successful move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragUpdate {
    pub draggable_id: String,
    pub droppable_id: String,
    pub source_index: usize,
    pub destination_index: Option<usize>,
}

/// Why a lock request was turned down. Only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockRejection {
    AlreadyClaimed,
    UnknownDraggable,
    DragDisabled,
}

impl LockRejection {
    fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyClaimed => "lock already claimed",
            Self::UnknownDraggable => "unknown draggable",
            Self::DragDisabled => "draggable is disabled",
        }
    }
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

type ForceStop = Box<dyn FnOnce()>;

struct LockRecord {
    id: LockId,
    draggable_id: String,
    source_index: usize,
    on_force_stop: Option<ForceStop>,
}

enum MachineState {
    Idle,
    Pending(LockRecord),
    Dragging(LockRecord),
}

/// Who is asking for the terminal transition.
#[derive(Debug, Clone, Copy)]
enum Initiator {
    /// The capability holding `lock`, which expects the machine in `phase`.
    Holder { lock: LockId, phase: Phase },
    /// Anyone else: cancellation signals, forced release, unpublishing.
    External,
}

struct Termination {
    result: Option<DropResult>,
    force_stop: Option<ForceStop>,
}

struct Machine {
    list: ListConfig,
    entries: Vec<DraggableEntry>,
    state: MachineState,
    next_lock: u64,
    engine: Box<dyn DragEngine>,
}

impl Machine {
    fn phase(&self) -> Phase {
        match self.state {
            MachineState::Idle => Phase::Idle,
            MachineState::Pending(_) => Phase::Pending,
            MachineState::Dragging(_) => Phase::Dragging,
        }
    }

    fn shape(&self) -> ListShape {
        ListShape {
            len: self.entries.len(),
            axis: self.list.axis,
            drop_disabled: self.list.drop_disabled,
        }
    }

    fn record(&self) -> Option<&LockRecord> {
        match &self.state {
            MachineState::Idle => None,
            MachineState::Pending(record) | MachineState::Dragging(record) => Some(record),
        }
    }

    fn holds(&self, lock: LockId, phase: Phase) -> bool {
        self.phase() == phase && self.record().is_some_and(|r| r.id == lock)
    }

    fn acquire(
        &mut self,
        draggable_id: &str,
        on_force_stop: Option<ForceStop>,
    ) -> Result<LockId, LockRejection> {
        if !matches!(self.state, MachineState::Idle) {
            return Err(LockRejection::AlreadyClaimed);
        }
        let (source_index, entry) = self
            .entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.id == draggable_id)
            .ok_or(LockRejection::UnknownDraggable)?;
        if entry.drag_disabled {
            return Err(LockRejection::DragDisabled);
        }
        self.next_lock += 1;
        let id = LockId(self.next_lock);
        self.state = MachineState::Pending(LockRecord {
            id,
            draggable_id: draggable_id.to_string(),
            source_index,
            on_force_stop,
        });
        Ok(id)
    }

    fn lift(&mut self, lock: LockId) -> Option<DragStart> {
        if !self.holds(lock, Phase::Pending) {
            return None;
        }
        let MachineState::Pending(record) =
            std::mem::replace(&mut self.state, MachineState::Idle)
        else {
            return None;
        };
        let shape = self.shape();
        self.engine.lift(shape, record.source_index);
        let start = DragStart {
            draggable_id: record.draggable_id.clone(),
            droppable_id: self.list.droppable_id.clone(),
            source_index: record.source_index,
        };
        self.state = MachineState::Dragging(record);
        Some(start)
    }

    fn move_item(&mut self, lock: LockId, direction: Direction) -> (MoveOutcome, Option<DragUpdate>) {
        if !self.holds(lock, Phase::Dragging) {
            return (MoveOutcome::Stale, None);
        }
        let shape = self.shape();
        let outcome = self.engine.move_in_direction(shape, direction);
        if !outcome.moved() {
            return (outcome, None);
        }
        let update = self.record().map(|record| DragUpdate {
            draggable_id: record.draggable_id.clone(),
            droppable_id: self.list.droppable_id.clone(),
            source_index: record.source_index,
            destination_index: self.engine.destination(shape),
        });
        (outcome, update)
    }

    fn terminate(&mut self, who: Initiator, reason: DropReason) -> Option<Termination> {
        match who {
            Initiator::Holder { lock, phase } if !self.holds(lock, phase) => return None,
            _ => {}
        }
        let external = matches!(who, Initiator::External);
        let shape = self.shape();
        match std::mem::replace(&mut self.state, MachineState::Idle) {
            MachineState::Idle => None,
            MachineState::Pending(record) => {
                self.engine.reset();
                debug!(
                    lock = %record.id,
                    draggable_id = %record.draggable_id,
                    external,
                    "lock released before lift"
                );
                Some(Termination {
                    result: None,
                    force_stop: record.on_force_stop.filter(|_| external),
                })
            }
            MachineState::Dragging(record) => {
                let destination_index = match reason {
                    DropReason::Drop => self.engine.destination(shape),
                    DropReason::Cancel => None,
                };
                self.engine.reset();
                let result = DropResult {
                    draggable_id: record.draggable_id,
                    droppable_id: self.list.droppable_id.clone(),
                    source_index: record.source_index,
                    destination_index,
                    reason,
                };
                debug!(
                    lock = %record.id,
                    draggable_id = %result.draggable_id,
                    source = result.source_index,
                    destination = ?result.destination_index,
                    reason = ?reason,
                    external,
                    "gesture finished"
                );
                Some(Termination {
                    result: Some(result),
                    force_stop: record.on_force_stop.filter(|_| external),
                })
            }
        }
    }

    /// Replace the registered entries. Returns true when the locked item is
    /// no longer present or no longer sits at the index it was locked at.
    fn publish(&mut self, entries: Vec<DraggableEntry>) -> bool {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut unique = Vec::with_capacity(entries.len());
        for entry in entries {
            if seen.insert(entry.id.clone()) {
                unique.push(entry);
            } else {
                warn!(draggable_id = %entry.id, "duplicate draggable id ignored");
            }
        }
        self.entries = unique;
        self.record().is_some_and(|r| {
            self.entries.get(r.source_index).map(|e| e.id.as_str()) != Some(r.draggable_id.as_str())
        })
    }
}

// ---------------------------------------------------------------------------
// Responders
// ---------------------------------------------------------------------------

type StartResponder = Box<dyn FnMut(&DragStart)>;
type UpdateResponder = Box<dyn FnMut(&DragUpdate)>;
type EndResponder = Box<dyn FnMut(&DropResult)>;

#[derive(Default)]
struct Responders {
    on_drag_start: Option<StartResponder>,
    on_drag_update: Option<UpdateResponder>,
    on_drag_end: Option<EndResponder>,
}

enum Notice {
    Start(DragStart),
    Update(DragUpdate),
    End(DropResult),
}

impl Responders {
    fn deliver(&mut self, notice: &Notice) {
        match notice {
            Notice::Start(start) => {
                if let Some(f) = self.on_drag_start.as_mut() {
                    f(start);
                }
            }
            Notice::Update(update) => {
                if let Some(f) = self.on_drag_update.as_mut() {
                    f(update);
                }
            }
            Notice::End(result) => {
                if let Some(f) = self.on_drag_end.as_mut() {
                    f(result);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Shared core
// ---------------------------------------------------------------------------

struct Shared {
    machine: RefCell<Machine>,
    responders: RefCell<Responders>,
    queue: RefCell<VecDeque<Notice>>,
    delivering: Cell<bool>,
}

/// Clears the delivery flag even if a responder unwinds.
struct DeliveryGuard<'a>(&'a Cell<bool>);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Shared {
    fn notify(&self, notice: Notice) {
        self.queue.borrow_mut().push_back(notice);
        if self.delivering.replace(true) {
            return;
        }
        let _guard = DeliveryGuard(&self.delivering);
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(notice) = next else {
                break;
            };
            self.responders.borrow_mut().deliver(&notice);
        }
    }

    fn try_get_lock(&self, draggable_id: &str, on_force_stop: Option<ForceStop>) -> Option<LockId> {
        let acquired = self
            .machine
            .borrow_mut()
            .acquire(draggable_id, on_force_stop);
        match acquired {
            Ok(lock) => {
                debug!(%lock, draggable_id, "lock acquired");
                Some(lock)
            }
            Err(rejection) => {
                debug!(draggable_id, reason = rejection.as_str(), "lock rejected");
                None
            }
        }
    }

    fn terminate(&self, who: Initiator, reason: DropReason) -> Option<DropResult> {
        let termination = self.machine.borrow_mut().terminate(who, reason)?;
        if let Some(stop) = termination.force_stop {
            stop();
        }
        let result = termination.result?;
        self.notify(Notice::End(result.clone()));
        Some(result)
    }

    fn publish(&self, entries: Vec<DraggableEntry>) {
        let displaced = self.machine.borrow_mut().publish(entries);
        if displaced {
            debug!("locked draggable unpublished or moved, cancelling");
            self.terminate(Initiator::External, DropReason::Cancel);
        }
    }
}

// ---------------------------------------------------------------------------
// DragDropContext
// ---------------------------------------------------------------------------

/// Owner of the lock protocol for one list.
///
/// The context is single-threaded (`!Send`). Handles given out by it hold
/// weak references, so dropping the context turns them all stale.
pub struct DragDropContext {
    shared: Rc<Shared>,
}

impl fmt::Debug for DragDropContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let machine = self.shared.machine.borrow();
        f.debug_struct("DragDropContext")
            .field("droppable_id", &machine.list.droppable_id)
            .field("phase", &machine.phase())
            .field("items", &machine.entries.len())
            .finish()
    }
}

impl DragDropContext {
    /// Start building a context.
    #[must_use]
    pub fn builder() -> DragDropContextBuilder {
        DragDropContextBuilder::default()
    }

    /// Current machine phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shared.machine.borrow().phase()
    }

    /// Configuration of the controlled list.
    #[must_use]
    pub fn list_config(&self) -> ListConfig {
        self.shared.machine.borrow().list.clone()
    }

    /// Ids of the registered draggables, in list order.
    #[must_use]
    pub fn draggable_ids(&self) -> Vec<String> {
        self.shared
            .machine
            .borrow()
            .entries
            .iter()
            .map(|e| e.id.clone())
            .collect()
    }

    /// Register the current list order (all items enabled).
    pub fn publish<T: Draggable>(&self, items: &[T]) {
        self.publish_entries(crate::item::entries_for(items));
    }

    /// Register the current list order with explicit entries.
    pub fn publish_entries(&self, entries: Vec<DraggableEntry>) {
        self.shared.publish(entries);
    }

    /// Handle for republishing from inside responders.
    #[must_use]
    pub fn publisher(&self) -> ListPublisher {
        ListPublisher {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Force the terminal transition from any non-idle phase.
    ///
    /// Returns the drop result when a gesture was in progress.
    pub fn cancel(&self) -> Option<DropResult> {
        self.shared.terminate(Initiator::External, DropReason::Cancel)
    }
}

/// Builder for [`DragDropContext`].
#[derive(Default)]
pub struct DragDropContextBuilder {
    list: ListConfig,
    entries: Vec<DraggableEntry>,
    engine: Option<Box<dyn DragEngine>>,
    sensors: Vec<Box<dyn FnOnce(SensorApi)>>,
    responders: Responders,
}

impl DragDropContextBuilder {
    #[must_use]
    pub fn list(mut self, list: ListConfig) -> Self {
        self.list = list;
        self
    }

    /// Initial list order.
    #[must_use]
    pub fn items<T: Draggable>(mut self, items: &[T]) -> Self {
        self.entries = crate::item::entries_for(items);
        self
    }

    #[must_use]
    pub fn entries(mut self, entries: Vec<DraggableEntry>) -> Self {
        self.entries = entries;
        self
    }

    /// Replace the default [`SnapListEngine`].
    #[must_use]
    pub fn engine(mut self, engine: impl DragEngine + 'static) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    /// Register a sensor. It is called once, at build time.
    #[must_use]
    pub fn sensor(mut self, sensor: impl FnOnce(SensorApi) + 'static) -> Self {
        self.sensors.push(Box::new(sensor));
        self
    }

    #[must_use]
    pub fn on_drag_start(mut self, f: impl FnMut(&DragStart) + 'static) -> Self {
        self.responders.on_drag_start = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drag_update(mut self, f: impl FnMut(&DragUpdate) + 'static) -> Self {
        self.responders.on_drag_update = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drag_end(mut self, f: impl FnMut(&DropResult) + 'static) -> Self {
        self.responders.on_drag_end = Some(Box::new(f));
        self
    }

    pub fn build(self) -> DragDropContext {
        let mut machine = Machine {
            list: self.list,
            entries: Vec::new(),
            state: MachineState::Idle,
            next_lock: 0,
            engine: self
                .engine
                .unwrap_or_else(|| Box::new(SnapListEngine::new())),
        };
        machine.publish(self.entries);
        let shared = Rc::new(Shared {
            machine: RefCell::new(machine),
            responders: RefCell::new(self.responders),
            queue: RefCell::new(VecDeque::new()),
            delivering: Cell::new(false),
        });
        let sensors = self.sensors.len();
        for sensor in self.sensors {
            sensor(SensorApi {
                shared: Rc::downgrade(&shared),
            });
        }
        debug!(sensors, "drag drop context ready");
        DragDropContext { shared }
    }
}

// ---------------------------------------------------------------------------
// SensorApi / ListPublisher
// ---------------------------------------------------------------------------

/// Handle a sensor uses to request the lock.
///
/// There is no "could I get the lock" query: sensors find out by asking,
/// and rejection is routine.
#[derive(Clone)]
pub struct SensorApi {
    shared: Weak<Shared>,
}

impl fmt::Debug for SensorApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorApi")
            .field("attached", &(self.shared.strong_count() > 0))
            .finish()
    }
}

impl SensorApi {
    /// Request exclusive control over `draggable_id`.
    #[must_use]
    pub fn try_get_lock(&self, draggable_id: &str) -> Option<PreDragActions> {
        self.acquire(draggable_id, None)
    }

    /// Like [`try_get_lock`](Self::try_get_lock), and run `on_force_stop`
    /// if the lock is later released by someone other than its holder.
    #[must_use]
    pub fn try_get_lock_with_stop(
        &self,
        draggable_id: &str,
        on_force_stop: impl FnOnce() + 'static,
    ) -> Option<PreDragActions> {
        self.acquire(draggable_id, Some(Box::new(on_force_stop)))
    }

    /// Force-release whatever lock is outstanding. Returns true if one was.
    pub fn try_release_lock(&self) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        let was_locked = shared.machine.borrow().phase() != Phase::Idle;
        shared.terminate(Initiator::External, DropReason::Cancel);
        was_locked
    }

    fn acquire(&self, draggable_id: &str, on_force_stop: Option<ForceStop>) -> Option<PreDragActions> {
        let Some(shared) = self.shared.upgrade() else {
            trace!(draggable_id, "lock requested after context was dropped");
            return None;
        };
        let lock = shared.try_get_lock(draggable_id, on_force_stop)?;
        Some(PreDragActions {
            shared: self.shared.clone(),
            lock,
            draggable_id: draggable_id.to_string(),
            consumed: Cell::new(false),
        })
    }
}

/// Weak handle for republishing the list order.
#[derive(Clone)]
pub struct ListPublisher {
    shared: Weak<Shared>,
}

impl ListPublisher {
    /// Register a new list order. Returns false if the context is gone.
    pub fn publish<T: Draggable>(&self, items: &[T]) -> bool {
        self.publish_entries(crate::item::entries_for(items))
    }

    pub fn publish_entries(&self, entries: Vec<DraggableEntry>) -> bool {
        match self.shared.upgrade() {
            Some(shared) => {
                shared.publish(entries);
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Capability for a held lock that has not been lifted yet.
///
/// Dropping it unused abandons the lock.
#[must_use = "dropping PreDragActions releases the lock"]
pub struct PreDragActions {
    shared: Weak<Shared>,
    lock: LockId,
    draggable_id: String,
    consumed: Cell<bool>,
}

impl fmt::Debug for PreDragActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreDragActions")
            .field("lock", &self.lock)
            .field("draggable_id", &self.draggable_id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl PreDragActions {
    #[must_use]
    pub fn lock_id(&self) -> LockId {
        self.lock
    }

    #[must_use]
    pub fn draggable_id(&self) -> &str {
        &self.draggable_id
    }

    /// Whether this capability still holds the pending lock.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.consumed.get()
            && self
                .shared
                .upgrade()
                .is_some_and(|s| s.machine.borrow().holds(self.lock, Phase::Pending))
    }

    /// Upgrade into a live gesture.
    ///
    /// Returns `None` if this capability was already used or its lock was
    /// released in the meantime.
    pub fn snap_lift(&self) -> Option<SnapDragActions> {
        if self.consumed.get() {
            trace!(lock = %self.lock, "lift on consumed capability");
            return None;
        }
        let shared = self.shared.upgrade()?;
        let start = shared.machine.borrow_mut().lift(self.lock);
        let Some(start) = start else {
            trace!(lock = %self.lock, "lift on released lock");
            self.consumed.set(true);
            return None;
        };
        self.consumed.set(true);
        debug!(lock = %self.lock, draggable_id = %self.draggable_id, "lifted");
        shared.notify(Notice::Start(start));
        Some(SnapDragActions {
            shared: self.shared.clone(),
            lock: self.lock,
            draggable_id: self.draggable_id.clone(),
            consumed: Cell::new(false),
        })
    }

    /// Give the lock back without starting a drag.
    pub fn abort(&self) {
        if self.consumed.replace(true) {
            return;
        }
        if let Some(shared) = self.shared.upgrade() {
            shared.terminate(
                Initiator::Holder {
                    lock: self.lock,
                    phase: Phase::Pending,
                },
                DropReason::Cancel,
            );
        }
    }
}

impl Drop for PreDragActions {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Capability for a live gesture.
///
/// Dropping it while the gesture is live cancels the gesture.
#[must_use = "dropping SnapDragActions cancels the drag"]
pub struct SnapDragActions {
    shared: Weak<Shared>,
    lock: LockId,
    draggable_id: String,
    consumed: Cell<bool>,
}

impl fmt::Debug for SnapDragActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapDragActions")
            .field("lock", &self.lock)
            .field("draggable_id", &self.draggable_id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl SnapDragActions {
    #[must_use]
    pub fn lock_id(&self) -> LockId {
        self.lock
    }

    #[must_use]
    pub fn draggable_id(&self) -> &str {
        &self.draggable_id
    }

    /// Whether the gesture this capability controls is still live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.consumed.get()
            && self
                .shared
                .upgrade()
                .is_some_and(|s| s.machine.borrow().holds(self.lock, Phase::Dragging))
    }

    /// Move the controlled item one logical step.
    ///
    /// Stale capabilities are tolerated: the call does nothing and reports
    /// [`MoveOutcome::Stale`].
    pub fn move_in_direction(&self, direction: Direction) -> MoveOutcome {
        if self.consumed.get() {
            trace!(lock = %self.lock, direction = direction.as_str(), "move on consumed capability");
            return MoveOutcome::Stale;
        }
        let Some(shared) = self.shared.upgrade() else {
            return MoveOutcome::Stale;
        };
        let (outcome, update) = shared.machine.borrow_mut().move_item(self.lock, direction);
        trace!(lock = %self.lock, direction = direction.as_str(), ?outcome, "move");
        if let Some(update) = update {
            shared.notify(Notice::Update(update));
        }
        outcome
    }

    pub fn move_up(&self) -> MoveOutcome {
        self.move_in_direction(Direction::Up)
    }

    pub fn move_down(&self) -> MoveOutcome {
        self.move_in_direction(Direction::Down)
    }

    pub fn move_left(&self) -> MoveOutcome {
        self.move_in_direction(Direction::Left)
    }

    pub fn move_right(&self) -> MoveOutcome {
        self.move_in_direction(Direction::Right)
    }

    /// Finish the gesture at the current position.
    ///
    /// Returns `None` if the gesture already ended.
    pub fn drop(&self) -> Option<DropResult> {
        self.finish(DropReason::Drop)
    }

    /// Abandon the gesture; the result has no destination.
    pub fn cancel(&self) -> Option<DropResult> {
        self.finish(DropReason::Cancel)
    }

    fn finish(&self, reason: DropReason) -> Option<DropResult> {
        if self.consumed.replace(true) {
            trace!(lock = %self.lock, ?reason, "terminal call on consumed capability");
            return None;
        }
        self.shared.upgrade()?.terminate(
            Initiator::Holder {
                lock: self.lock,
                phase: Phase::Dragging,
            },
            reason,
        )
    }
}

impl Drop for SnapDragActions {
    fn drop(&mut self) {
        if !self.consumed.get() {
            self.finish(DropReason::Cancel);
        }
    }
}
