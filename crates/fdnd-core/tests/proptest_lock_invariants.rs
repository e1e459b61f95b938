//! Property-based invariant tests for the drag lock protocol.
//!
//! 1. At most one capability holds the live lock at any instant
//! 2. The machine is idle exactly when no capability is live
//! 3. Stale capabilities never change state
//! 4. Drop destinations match a clamped one-step model of the moves

use std::cell::RefCell;
use std::rc::Rc;

use fdnd_core::{
    Direction, DragDropContext, DropReason, MoveOutcome, Phase, PreDragActions, SensorApi,
    SnapDragActions,
};
use proptest::prelude::*;

const IDS: [&str; 5] = ["A", "B", "C", "D", "E"];

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Acquire(usize),
    Lift(usize),
    Abort(usize),
    Move(usize, Direction),
    Drop(usize),
    Cancel(usize),
    Release,
    ExternalCancel,
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..7).prop_map(Op::Acquire),
        3 => (0usize..8).prop_map(Op::Lift),
        1 => (0usize..8).prop_map(Op::Abort),
        4 => ((0usize..8), direction_strategy()).prop_map(|(h, d)| Op::Move(h, d)),
        2 => (0usize..8).prop_map(Op::Drop),
        1 => (0usize..8).prop_map(Op::Cancel),
        1 => Just(Op::Release),
        1 => Just(Op::ExternalCancel),
    ]
}

// ── Harness ─────────────────────────────────────────────────────────────

struct Harness {
    ctx: DragDropContext,
    api: SensorApi,
    pres: Vec<PreDragActions>,
    drags: Vec<SnapDragActions>,
    /// Model position of the live drag.
    position: Option<usize>,
}

impl Harness {
    fn new() -> Self {
        let slot = Rc::new(RefCell::new(None));
        let captured = slot.clone();
        let ctx = DragDropContext::builder()
            .items(&IDS)
            .sensor(move |api| *captured.borrow_mut() = Some(api))
            .build();
        let api = slot.borrow_mut().take().expect("sensor registered");
        Self {
            ctx,
            api,
            pres: Vec::new(),
            drags: Vec::new(),
            position: None,
        }
    }

    fn live_count(&self) -> usize {
        self.pres.iter().filter(|p| p.is_active()).count()
            + self.drags.iter().filter(|d| d.is_active()).count()
    }

    fn pick<T>(items: &[T], index: usize) -> Option<&T> {
        if items.is_empty() {
            None
        } else {
            items.get(index % items.len())
        }
    }

    fn apply(&mut self, op: &Op) -> Result<(), TestCaseError> {
        match op {
            Op::Acquire(i) => {
                let was_idle = self.ctx.phase() == Phase::Idle;
                let id = IDS.get(*i).copied().unwrap_or("missing");
                let known = IDS.contains(&id);
                match self.api.try_get_lock(id) {
                    Some(pre) => {
                        prop_assert!(was_idle && known);
                        self.pres.push(pre);
                    }
                    None => prop_assert!(!was_idle || !known),
                }
            }
            Op::Lift(h) => {
                if let Some(pre) = Self::pick(&self.pres, *h) {
                    let was_active = pre.is_active();
                    let source = IDS.iter().position(|id| *id == pre.draggable_id());
                    match pre.snap_lift() {
                        Some(drag) => {
                            prop_assert!(was_active);
                            self.position = source;
                            self.drags.push(drag);
                        }
                        None => prop_assert!(!was_active),
                    }
                }
            }
            Op::Abort(h) => {
                if let Some(pre) = Self::pick(&self.pres, *h) {
                    let before = self.ctx.phase();
                    let was_active = pre.is_active();
                    pre.abort();
                    if !was_active {
                        prop_assert_eq!(self.ctx.phase(), before);
                    }
                }
            }
            Op::Move(h, dir) => {
                if let Some(drag) = Self::pick(&self.drags, *h) {
                    let was_active = drag.is_active();
                    let outcome = drag.move_in_direction(*dir);
                    if !was_active {
                        prop_assert_eq!(outcome, MoveOutcome::Stale);
                        return Ok(());
                    }
                    let pos = self.position.expect("live drag has a position");
                    let expected = match dir {
                        Direction::Left | Direction::Right => MoveOutcome::Unsupported,
                        Direction::Up if pos == 0 => MoveOutcome::Clamped { index: 0 },
                        Direction::Up => MoveOutcome::Moved { index: pos - 1 },
                        Direction::Down if pos + 1 == IDS.len() => {
                            MoveOutcome::Clamped { index: pos }
                        }
                        Direction::Down => MoveOutcome::Moved { index: pos + 1 },
                    };
                    prop_assert_eq!(outcome, expected);
                    if let MoveOutcome::Moved { index } = outcome {
                        self.position = Some(index);
                    }
                }
            }
            Op::Drop(h) | Op::Cancel(h) => {
                let dropping = matches!(op, Op::Drop(_));
                if let Some(drag) = Self::pick(&self.drags, *h) {
                    let was_active = drag.is_active();
                    let result = if dropping { drag.drop() } else { drag.cancel() };
                    match result {
                        Some(result) => {
                            prop_assert!(was_active);
                            if dropping {
                                prop_assert_eq!(result.reason, DropReason::Drop);
                                prop_assert_eq!(result.destination_index, self.position);
                            } else {
                                prop_assert_eq!(result.destination_index, None);
                            }
                            self.position = None;
                        }
                        None => prop_assert!(!was_active),
                    }
                }
            }
            Op::Release => {
                let was_locked = self.ctx.phase() != Phase::Idle;
                prop_assert_eq!(self.api.try_release_lock(), was_locked);
                self.position = None;
            }
            Op::ExternalCancel => {
                let was_dragging = self.ctx.phase() == Phase::Dragging;
                prop_assert_eq!(self.ctx.cancel().is_some(), was_dragging);
                self.position = None;
            }
        }
        Ok(())
    }
}

proptest! {
    #[test]
    fn at_most_one_live_capability(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut harness = Harness::new();
        for op in &ops {
            harness.apply(op)?;
            let live = harness.live_count();
            prop_assert!(live <= 1, "more than one live capability after {:?}", op);
            prop_assert_eq!(live == 0, harness.ctx.phase() == Phase::Idle);
        }
    }

    #[test]
    fn second_acquire_always_rejected(first in 0usize..5, second in 0usize..5) {
        let harness = Harness::new();
        let _held = harness.api.try_get_lock(IDS[first]).expect("idle machine grants lock");
        prop_assert!(harness.api.try_get_lock(IDS[second]).is_none());
    }
}
