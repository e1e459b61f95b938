#![no_main]

use std::cell::RefCell;
use std::rc::Rc;

use arbitrary::Arbitrary;
use fdnd_core::{
    Direction, DragDropContext, MoveOutcome, Phase, PreDragActions, SensorApi, SnapDragActions,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Acquire(u8),
    Lift(u8),
    Move(u8, u8),
    Drop(u8),
    Cancel(u8),
    Abort(u8),
    Release,
    ForgetPre(u8),
    ForgetDrag(u8),
    Republish(u8),
}

const DIRECTIONS: [Direction; 4] = Direction::ALL;

fuzz_target!(|ops: Vec<Op>| {
    if ops.len() > 256 {
        return;
    }
    let ids = ["A", "B", "C", "D"];
    let slot = Rc::new(RefCell::new(None::<SensorApi>));
    let capture = slot.clone();
    let ctx = DragDropContext::builder()
        .items(&ids)
        .sensor(move |api| *capture.borrow_mut() = Some(api))
        .build();
    let Some(api) = slot.borrow_mut().take() else {
        return;
    };

    let mut pre: Vec<PreDragActions> = Vec::new();
    let mut drags: Vec<SnapDragActions> = Vec::new();

    for op in ops {
        match op {
            Op::Acquire(i) => {
                let id = ids[usize::from(i) % ids.len()];
                let was_idle = ctx.phase() == Phase::Idle;
                let granted = api.try_get_lock(id);
                // A lock is only granted from idle.
                assert!(was_idle || granted.is_none());
                pre.extend(granted);
            }
            Op::Lift(i) => {
                if let Some(p) = pre.get(usize::from(i) % pre.len().max(1)) {
                    drags.extend(p.snap_lift());
                }
            }
            Op::Move(i, d) => {
                if let Some(s) = drags.get(usize::from(i) % drags.len().max(1)) {
                    let outcome = s.move_in_direction(DIRECTIONS[usize::from(d) % 4]);
                    if !s.is_active() {
                        assert_eq!(outcome, MoveOutcome::Stale);
                    }
                }
            }
            Op::Drop(i) => {
                if let Some(s) = drags.get(usize::from(i) % drags.len().max(1)) {
                    let first = s.drop();
                    assert!(s.drop().is_none());
                    if let Some(result) = first {
                        assert!(result.destination_index.is_none_or(|d| d < ids.len()));
                    }
                }
            }
            Op::Cancel(i) => {
                if let Some(s) = drags.get(usize::from(i) % drags.len().max(1)) {
                    if let Some(result) = s.cancel() {
                        assert!(result.destination_index.is_none());
                    }
                }
            }
            Op::Abort(i) => {
                if let Some(p) = pre.get(usize::from(i) % pre.len().max(1)) {
                    p.abort();
                }
            }
            Op::Release => {
                api.try_release_lock();
                assert_eq!(ctx.phase(), Phase::Idle);
            }
            Op::ForgetPre(i) => {
                if !pre.is_empty() {
                    pre.remove(usize::from(i) % pre.len());
                }
            }
            Op::ForgetDrag(i) => {
                if !drags.is_empty() {
                    drags.remove(usize::from(i) % drags.len());
                }
            }
            Op::Republish(n) => {
                let keep = usize::from(n) % (ids.len() + 1);
                ctx.publish(&ids[..keep]);
            }
        }

        // At most one capability is live, and only while the machine is busy.
        let live = pre.iter().filter(|p| p.is_active()).count()
            + drags.iter().filter(|s| s.is_active()).count();
        assert!(live <= 1, "{live} live capabilities");
        if ctx.phase() == Phase::Idle {
            assert_eq!(live, 0);
        }
    }
});
