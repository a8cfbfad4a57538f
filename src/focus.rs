//! Focus tracking for relative addressing.
//!
//! In relative mode the only way to reach a pane is to move focus there one
//! step at a time, so synthesis has to know where focus is after every
//! keystroke. [`FocusTracker`] keeps that state: the session ring (the order
//! "next" and "previous" walk through), each pane's rectangle (for spatial
//! moves), and the focused pane.
//!
//! Ring rules:
//!
//! - splitting a pane inserts the new pane directly after it and focuses it
//! - "next" and "previous" wrap around the ends of the ring
//! - "down" moves to the pane below, wrapping from the bottom edge to the top

use crate::topology::{FocusDirection, FocusOp, Orientation, PaneId};

const EPSILON: f64 = 1e-9;

/// Unit-square rectangle of a pane.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    const FULL: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 1.0,
        h: 1.0,
    };

    /// Halve the rectangle; the split pane keeps the left or top half.
    fn split(self, orientation: Orientation) -> (Rect, Rect) {
        match orientation {
            Orientation::Vertical => {
                let w = self.w / 2.0;
                (Rect { w, ..self }, Rect { x: self.x + w, w, ..self })
            }
            Orientation::Horizontal => {
                let h = self.h / 2.0;
                (Rect { h, ..self }, Rect { y: self.y + h, h, ..self })
            }
        }
    }

    fn bottom(&self) -> f64 {
        self.y + self.h
    }

    fn spans_x(&self, x: f64) -> bool {
        self.x <= x && x < self.x + self.w
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    pane: PaneId,
    rect: Rect,
}

/// Computes focus walks between panes of a ring.
///
/// The walker never wraps: a pane ahead of the focus is reached with "next"
/// steps and a pane behind it with "previous" steps, even when going round
/// the other way would be shorter.
///
/// ```
/// use panescript::focus::PaneWalker;
/// use panescript::topology::FocusDirection;
///
/// let walker = PaneWalker::sequential(4);
/// assert_eq!(walker.walk(1, 3), vec![FocusDirection::Next; 2]);
/// assert_eq!(walker.walk(4, 1), vec![FocusDirection::Previous; 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneWalker {
    ring: Vec<PaneId>,
}

impl PaneWalker {
    /// Walker over panes `1..=panes` in order, the ring of a finished layout.
    pub fn sequential(panes: u32) -> Self {
        Self {
            ring: (1..=panes).collect(),
        }
    }

    /// Walker over an explicit ring order.
    pub fn over(ring: &[PaneId]) -> Self {
        Self {
            ring: ring.to_vec(),
        }
    }

    /// Focus steps that move from `from` to `to`.
    ///
    /// Returns no steps if the panes are equal or either is not in the ring.
    pub fn walk(&self, from: PaneId, to: PaneId) -> Vec<FocusDirection> {
        let position = |pane: PaneId| self.ring.iter().position(|&p| p == pane);
        let (Some(start), Some(end)) = (position(from), position(to)) else {
            return Vec::new();
        };

        if end >= start {
            vec![FocusDirection::Next; end - start]
        } else {
            vec![FocusDirection::Previous; start - end]
        }
    }
}

/// Relative-mode focus state for one window's synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTracker {
    ring: Vec<Slot>,
    focus: PaneId,
}

impl FocusTracker {
    /// A window holding only pane 1, focused.
    pub fn new() -> Self {
        Self {
            ring: vec![Slot {
                pane: 1,
                rect: Rect::FULL,
            }],
            focus: 1,
        }
    }

    /// Rebuild the state reached by replaying `ops` on a fresh window.
    pub fn replay<'a>(ops: impl IntoIterator<Item = &'a FocusOp>) -> Self {
        let mut tracker = Self::new();
        for op in ops {
            tracker.apply(*op);
        }
        tracker
    }

    /// The focused pane.
    pub fn focus(&self) -> PaneId {
        self.focus
    }

    /// Panes in ring order.
    pub fn ring(&self) -> Vec<PaneId> {
        self.ring.iter().map(|slot| slot.pane).collect()
    }

    /// Apply an operation produced elsewhere.
    pub fn apply(&mut self, op: FocusOp) {
        match op {
            FocusOp::SplitAlong {
                orientation,
                created,
            } => {
                self.split(orientation, created);
            }
            FocusOp::FocusStep(direction) => {
                self.step(direction);
            }
        }
    }

    /// Split the focused pane; focus moves to `created`.
    pub fn split(&mut self, orientation: Orientation, created: PaneId) -> FocusOp {
        let index = self.focused_index();
        let (kept, new) = self.ring[index].rect.split(orientation);
        self.ring[index].rect = kept;
        self.ring.insert(
            index + 1,
            Slot {
                pane: created,
                rect: new,
            },
        );
        self.focus = created;
        FocusOp::SplitAlong {
            orientation,
            created,
        }
    }

    /// Move focus one step.
    pub fn step(&mut self, direction: FocusDirection) -> FocusOp {
        let index = self.focused_index();
        let len = self.ring.len();
        self.focus = match direction {
            FocusDirection::Next => self.ring[(index + 1) % len].pane,
            FocusDirection::Previous => self.ring[(index + len - 1) % len].pane,
            FocusDirection::SpatialDown => self.below(index),
        };
        FocusOp::FocusStep(direction)
    }

    /// Walk focus to `target` without wrapping.
    pub fn walk_to(&mut self, target: PaneId) -> Vec<FocusOp> {
        PaneWalker::over(&self.ring())
            .walk(self.focus, target)
            .into_iter()
            .map(|direction| self.step(direction))
            .collect()
    }

    /// Step "next" until `target` is focused, wrapping past the ring's end.
    pub fn wrap_to(&mut self, target: PaneId) -> Vec<FocusOp> {
        let mut ops = Vec::new();
        for _ in 0..self.ring.len() {
            if self.focus == target {
                break;
            }
            ops.push(self.step(FocusDirection::Next));
        }
        ops
    }

    fn focused_index(&self) -> usize {
        // Focus only ever holds panes taken from the ring.
        self.ring
            .iter()
            .position(|slot| slot.pane == self.focus)
            .unwrap_or(0)
    }

    fn below(&self, index: usize) -> PaneId {
        let current = self.ring[index].rect;
        let x = current.x + current.w / 2.0;
        let starting_at = |y: f64| {
            self.ring
                .iter()
                .find(|slot| (slot.rect.y - y).abs() < EPSILON && slot.rect.spans_x(x))
                .map(|slot| slot.pane)
        };

        starting_at(current.bottom())
            .or_else(|| starting_at(0.0))
            .unwrap_or(self.focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FocusDirection::*;

    #[test]
    fn test_walker_forward_and_back() {
        let walker = PaneWalker::sequential(5);
        assert_eq!(walker.walk(2, 5), vec![Next, Next, Next]);
        assert_eq!(walker.walk(5, 2), vec![Previous, Previous, Previous]);
        assert!(walker.walk(3, 3).is_empty());
        assert!(walker.walk(1, 9).is_empty());
    }

    #[test]
    fn test_walker_uses_ring_order() {
        let walker = PaneWalker::over(&[1, 3, 5]);
        assert_eq!(walker.walk(1, 5), vec![Next, Next]);
    }

    #[test]
    fn test_split_inserts_after_parent() {
        let mut tracker = FocusTracker::new();
        tracker.split(Orientation::Horizontal, 3);
        tracker.walk_to(1);
        tracker.split(Orientation::Vertical, 2);
        assert_eq!(tracker.ring(), vec![1, 2, 3]);
        assert_eq!(tracker.focus(), 2);
    }

    #[test]
    fn test_next_wraps() {
        let mut tracker = FocusTracker::new();
        tracker.split(Orientation::Vertical, 2);
        tracker.step(Next);
        assert_eq!(tracker.focus(), 1);
        tracker.step(Previous);
        assert_eq!(tracker.focus(), 2);
    }

    #[test]
    fn test_down_wraps_to_top_row() {
        let mut tracker = FocusTracker::new();
        tracker.split(Orientation::Horizontal, 3);
        tracker.split(Orientation::Horizontal, 5);
        tracker.step(SpatialDown);
        assert_eq!(tracker.focus(), 1);
        tracker.step(SpatialDown);
        assert_eq!(tracker.focus(), 3);
    }

    #[test]
    fn test_down_picks_pane_under_center() {
        let mut tracker = FocusTracker::new();
        tracker.split(Orientation::Horizontal, 2);
        tracker.split(Orientation::Vertical, 3);
        tracker.walk_to(1);
        tracker.step(SpatialDown);
        // Pane 2 holds the left half of the bottom row, pane 3 the right.
        assert_eq!(tracker.focus(), 3);
    }

    #[test]
    fn test_wrap_to_is_bounded() {
        let mut tracker = FocusTracker::new();
        tracker.split(Orientation::Vertical, 2);
        assert!(tracker.wrap_to(7).len() <= 2);
    }

    #[test]
    fn test_replay_matches_live_state() {
        let mut live = FocusTracker::new();
        let ops = vec![
            live.split(Orientation::Vertical, 2),
            live.split(Orientation::Horizontal, 3),
            live.step(Previous),
        ];
        assert_eq!(FocusTracker::replay(&ops), live);
    }
}
