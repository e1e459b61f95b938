#![forbid(unsafe_code)]

//! Drag engine seam.
//!
//! The lock protocol never performs hit-testing or geometry itself. It asks
//! a [`DragEngine`] to relocate the controlled item one logical position and,
//! at drop time, where the item ended up. [`SnapListEngine`] is the stock
//! engine for single-axis lists: it snaps the item one slot at a time and
//! clamps at both ends.
//!
//! # Invariants
//!
//! 1. An engine only tracks a position between [`DragEngine::lift`] and
//!    [`DragEngine::reset`].
//! 2. Directions outside the list's [`Axis`] are defined no-ops
//!    ([`MoveOutcome::Unsupported`]), never errors.
//! 3. Moves at a boundary never wrap ([`MoveOutcome::Clamped`]).

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Direction / Axis
// ---------------------------------------------------------------------------

/// One logical step a controlled item can be asked to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in button order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Axis this direction moves along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Index delta along the direction's axis.
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Self::Up | Self::Left => -1,
            Self::Down | Self::Right => 1,
        }
    }

    /// Lowercase name used in logs and scripts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Layout axis a list supports for keyboard-style moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    /// Whether a move in `direction` is meaningful on this axis.
    #[must_use]
    pub const fn supports(self, direction: Direction) -> bool {
        matches!(
            (self, direction.axis()),
            (Self::Vertical, Axis::Vertical) | (Self::Horizontal, Axis::Horizontal)
        )
    }
}

// ---------------------------------------------------------------------------
// MoveOutcome
// ---------------------------------------------------------------------------

/// What a directional move request did.
///
/// Every variant other than [`MoveOutcome::Moved`] left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The item now sits at `index`.
    Moved { index: usize },
    /// Already at the boundary in that direction.
    Clamped { index: usize },
    /// The direction is outside the list's axis.
    Unsupported,
    /// The capability no longer holds the live lock.
    Stale,
}

impl MoveOutcome {
    /// True if the item changed position.
    #[must_use]
    pub const fn moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

// ---------------------------------------------------------------------------
// DragEngine
// ---------------------------------------------------------------------------

/// Shape of the list the engine is asked to work on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListShape {
    pub len: usize,
    pub axis: Axis,
    pub drop_disabled: bool,
}

/// The physical side of a drag, driven by the lock protocol.
pub trait DragEngine {
    /// Begin tracking the item lifted at `source_index`.
    fn lift(&mut self, shape: ListShape, source_index: usize);

    /// Move the tracked item one step in `direction`.
    fn move_in_direction(&mut self, shape: ListShape, direction: Direction) -> MoveOutcome;

    /// Where the item would land if dropped now. `None` means no valid target.
    fn destination(&self, shape: ListShape) -> Option<usize>;

    /// Forget the tracked item.
    fn reset(&mut self);
}

/// Logical snapping engine for single-axis lists.
#[derive(Debug, Clone, Default)]
pub struct SnapListEngine {
    current: Option<usize>,
}

impl SnapListEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the tracked item, if a drag is in progress.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }
}

impl DragEngine for SnapListEngine {
    fn lift(&mut self, _shape: ListShape, source_index: usize) {
        self.current = Some(source_index);
    }

    fn move_in_direction(&mut self, shape: ListShape, direction: Direction) -> MoveOutcome {
        let Some(index) = self.current else {
            return MoveOutcome::Stale;
        };
        if !shape.axis.supports(direction) {
            return MoveOutcome::Unsupported;
        }
        let last = shape.len.saturating_sub(1);
        let target = match direction.delta() {
            d if d < 0 => index.checked_sub(1),
            _ => (index < last).then_some(index + 1),
        };
        match target {
            Some(next) => {
                self.current = Some(next);
                MoveOutcome::Moved { index: next }
            }
            None => MoveOutcome::Clamped { index },
        }
    }

    fn destination(&self, shape: ListShape) -> Option<usize> {
        if shape.drop_disabled {
            return None;
        }
        self.current.filter(|&index| index < shape.len)
    }

    fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical(len: usize) -> ListShape {
        ListShape {
            len,
            axis: Axis::Vertical,
            drop_disabled: false,
        }
    }

    #[test]
    fn direction_axes() {
        assert_eq!(Direction::Up.axis(), Axis::Vertical);
        assert_eq!(Direction::Right.axis(), Axis::Horizontal);
        assert!(Axis::Vertical.supports(Direction::Down));
        assert!(!Axis::Vertical.supports(Direction::Left));
        assert!(Axis::Horizontal.supports(Direction::Left));
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert!("diagonal".parse::<Direction>().is_err());
    }

    #[test]
    fn moves_without_lift_are_stale() {
        let mut engine = SnapListEngine::new();
        assert_eq!(
            engine.move_in_direction(vertical(3), Direction::Up),
            MoveOutcome::Stale
        );
    }

    #[test]
    fn snaps_one_step_and_clamps() {
        let mut engine = SnapListEngine::new();
        engine.lift(vertical(3), 1);
        assert_eq!(
            engine.move_in_direction(vertical(3), Direction::Up),
            MoveOutcome::Moved { index: 0 }
        );
        assert_eq!(
            engine.move_in_direction(vertical(3), Direction::Up),
            MoveOutcome::Clamped { index: 0 }
        );
        engine.move_in_direction(vertical(3), Direction::Down);
        engine.move_in_direction(vertical(3), Direction::Down);
        assert_eq!(
            engine.move_in_direction(vertical(3), Direction::Down),
            MoveOutcome::Clamped { index: 2 }
        );
        assert_eq!(engine.destination(vertical(3)), Some(2));
    }

    #[test]
    fn cross_axis_is_unsupported() {
        let mut engine = SnapListEngine::new();
        engine.lift(vertical(3), 1);
        assert_eq!(
            engine.move_in_direction(vertical(3), Direction::Left),
            MoveOutcome::Unsupported
        );
        assert_eq!(engine.current(), Some(1));
    }

    #[test]
    fn horizontal_list_moves_on_left_right() {
        let shape = ListShape {
            len: 2,
            axis: Axis::Horizontal,
            drop_disabled: false,
        };
        let mut engine = SnapListEngine::new();
        engine.lift(shape, 0);
        assert!(engine.move_in_direction(shape, Direction::Right).moved());
        assert_eq!(
            engine.move_in_direction(shape, Direction::Down),
            MoveOutcome::Unsupported
        );
    }

    #[test]
    fn disabled_drop_has_no_destination() {
        let mut engine = SnapListEngine::new();
        let shape = ListShape {
            drop_disabled: true,
            ..vertical(3)
        };
        engine.lift(shape, 1);
        assert_eq!(engine.destination(shape), None);
    }

    #[test]
    fn reset_forgets_position() {
        let mut engine = SnapListEngine::new();
        engine.lift(vertical(3), 2);
        engine.reset();
        assert_eq!(engine.current(), None);
        assert_eq!(engine.destination(vertical(3)), None);
    }
}
