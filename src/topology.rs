//! Pane topology synthesis.
//!
//! Turns a pane count and a layout name into the ordered list of operations
//! that builds the pane tree. The same split plan serves both addressing
//! modes:
//!
//! - [`AddressingMode::Direct`]: every pane is bound to a variable as it is
//!   created, so each split is a [`SplitOp`] naming its parent explicitly.
//! - [`AddressingMode::Relative`]: panes can only be reached by moving focus,
//!   so each split becomes [`FocusOp::SplitAlong`] on the focused pane,
//!   preceded by whatever [`FocusOp::FocusStep`]s are needed to get there.
//!
//! # Example
//!
//! ```
//! use panescript::topology::{synthesize, AddressingMode, Orientation, PaneOp, SplitOp};
//!
//! let ops = synthesize(4, "tiled", AddressingMode::Direct).unwrap();
//! assert_eq!(
//!     ops[0],
//!     PaneOp::Split(SplitOp { parent: 1, child: 3, orientation: Orientation::Horizontal })
//! );
//! assert_eq!(ops.len(), 3);
//! ```

use crate::error::Result;
use crate::focus::FocusTracker;
use crate::layout::{Approach, LayoutPolicy, Terminal};
use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

/// 1-based pane index, assigned in creation order. Pane 1 always exists.
pub type PaneId = u32;

/// How the automation target lets us reach a pane.
#[derive(Debug, Deserialize, ValueEnum, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AddressingMode {
    /// Every pane has a stable handle usable at any later point.
    Direct,
    /// Panes are reached only by stepping focus from the current pane.
    Relative,
}

/// Axis of a split, named the way the terminal names it.
///
/// A `Vertical` split draws a vertical divider (panes side by side); a
/// `Horizontal` split draws a horizontal divider (panes stacked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A split in direct mode: `parent` is divided and `child` is the new pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOp {
    pub parent: PaneId,
    pub child: PaneId,
    pub orientation: Orientation,
}

/// Single focus movement available in relative mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    /// Next pane in session order.
    Next,
    /// Previous pane in session order.
    Previous,
    /// The pane spatially below the focused one.
    SpatialDown,
}

/// Relative-mode operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOp {
    /// Split the focused pane. Focus moves to the new pane, `created`.
    SplitAlong {
        orientation: Orientation,
        created: PaneId,
    },
    /// Move focus one step.
    FocusStep(FocusDirection),
}

/// One synthesized operation, tagged by addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneOp {
    Split(SplitOp),
    Focus(FocusOp),
}

/// Validated request for one window's topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRequest {
    pub panes: u32,
    pub layout: LayoutPolicy,
    pub mode: AddressingMode,
}

impl LayoutRequest {
    /// Build a request, resolving the layout name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PanescriptError::UnsupportedLayout`] for unknown names.
    pub fn new(panes: u32, layout: &str, mode: AddressingMode) -> Result<Self> {
        Ok(Self {
            panes,
            layout: layout.parse()?,
            mode,
        })
    }

    /// Produce the operation list for this request.
    pub fn synthesize(&self) -> Vec<PaneOp> {
        let policy = self.layout.effective(self.panes);
        if policy != self.layout {
            debug!(from = %self.layout, to = %policy, panes = self.panes, "layout degraded");
        }
        match self.mode {
            AddressingMode::Direct => policy
                .plan(self.panes)
                .into_iter()
                .map(|planned| PaneOp::Split(planned.split))
                .collect(),
            AddressingMode::Relative => relative_ops(policy, self.panes),
        }
    }
}

/// Synthesize the operations that build `panes` panes in the named layout.
///
/// Deterministic and free of side effects: identical arguments always give
/// identical output. A single pane needs no operations.
///
/// # Errors
///
/// Returns [`crate::PanescriptError::UnsupportedLayout`] if `layout` is not
/// one of the supported policy names.
pub fn synthesize(panes: u32, layout: &str, mode: AddressingMode) -> Result<Vec<PaneOp>> {
    Ok(LayoutRequest::new(panes, layout, mode)?.synthesize())
}

fn relative_ops(policy: LayoutPolicy, panes: u32) -> Vec<PaneOp> {
    let plan = policy.plan(panes);
    if plan.is_empty() {
        return Vec::new();
    }

    let mut tracker = FocusTracker::new();
    let mut ops = Vec::new();

    for planned in plan {
        let parent = planned.split.parent;
        if tracker.focus() != parent || planned.approach == Approach::Wrap {
            let steps = match planned.approach {
                Approach::Walk => tracker.walk_to(parent),
                Approach::Wrap => {
                    let mut steps = vec![tracker.step(FocusDirection::Next)];
                    steps.extend(tracker.wrap_to(parent));
                    steps
                }
                Approach::SpatialDown => vec![tracker.step(FocusDirection::SpatialDown)],
            };
            ops.extend(steps.into_iter().map(PaneOp::Focus));

            // Approach shortcuts only hold for the shapes they were written
            // for; finish the trip with a plain walk if one fell short.
            if tracker.focus() != parent {
                debug!(
                    focus = tracker.focus(),
                    parent, "approach missed parent, walking"
                );
                ops.extend(tracker.walk_to(parent).into_iter().map(PaneOp::Focus));
            }
        }
        ops.push(PaneOp::Focus(
            tracker.split(planned.split.orientation, planned.split.child),
        ));
        if let Some(direction) = planned.then {
            ops.push(PaneOp::Focus(tracker.step(direction)));
        }
    }

    if policy.terminal() == Terminal::WrapToFirst {
        ops.extend(tracker.wrap_to(1).into_iter().map(PaneOp::Focus));
    }

    debug!(layout = %policy, panes, ops = ops.len(), focus = tracker.focus(), "relative topology");
    ops
}
