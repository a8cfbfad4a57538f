//! Layout policies and their split plans.
//!
//! Each policy is a recipe for growing a binary split tree one pane at a
//! time. Panes are numbered in reading order (top to bottom, left to right)
//! so that, once built, stepping "next" visits them as `1, 2, .., N`.
//!
//! | name | shape |
//! |---|---|
//! | `even-horizontal` | side-by-side strip |
//! | `even-vertical` | stacked strip |
//! | `main-vertical` | full-height pane on the left, stack on the right |
//! | `main-vertical-flipped` | full-height pane on the right, stack on the left |
//! | `main-horizontal` | full-width pane on top, row below |
//! | `double-main-horizontal` | two main panes, remaining panes beside them |
//! | `double-main-vertical` | two main panes across the bottom, stack above |
//! | `tiled` | two-column grid |
//! | `3_columns` | three-column grid |

use crate::error::{PanescriptError, Result};
use crate::topology::{FocusDirection, Orientation, PaneId, SplitOp};
use std::fmt;
use std::str::FromStr;

/// A named tiling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutPolicy {
    EvenHorizontal,
    EvenVertical,
    MainVertical,
    MainVerticalFlipped,
    MainHorizontal,
    DoubleMainHorizontal,
    DoubleMainVertical,
    Tiled,
    ThreeColumns,
}

/// How relative mode should bring focus onto a split's parent pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Approach {
    /// Minimal non-wrapping walk.
    Walk,
    /// At least one "next" step, wrapping past the end of the ring. Taken
    /// even when focus already sits on the parent.
    Wrap,
    /// One spatial "down" step.
    SpatialDown,
}

/// Where relative-mode focus is left once a layout is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Terminal {
    /// Wherever the last split left it.
    Stay,
    /// Back on pane 1, stepping "next" around the end of the ring.
    WrapToFirst,
}

/// One split of a plan plus the way relative mode reaches its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlannedSplit {
    pub split: SplitOp,
    pub approach: Approach,
    /// Focus step sent straight after the split.
    pub then: Option<FocusDirection>,
}

fn planned(parent: PaneId, child: PaneId, orientation: Orientation) -> PlannedSplit {
    PlannedSplit {
        split: SplitOp {
            parent,
            child,
            orientation,
        },
        approach: Approach::Walk,
        then: None,
    }
}

/// Each pane split off the one before it.
fn chain(from: PaneId, to: PaneId, orientation: Orientation) -> impl Iterator<Item = PlannedSplit> {
    (from..=to).map(move |p| planned(p - 1, p, orientation))
}

impl LayoutPolicy {
    /// Every supported policy.
    pub const ALL: [LayoutPolicy; 9] = [
        LayoutPolicy::EvenHorizontal,
        LayoutPolicy::EvenVertical,
        LayoutPolicy::MainVertical,
        LayoutPolicy::MainVerticalFlipped,
        LayoutPolicy::MainHorizontal,
        LayoutPolicy::DoubleMainHorizontal,
        LayoutPolicy::DoubleMainVertical,
        LayoutPolicy::Tiled,
        LayoutPolicy::ThreeColumns,
    ];

    /// The name used in layout files.
    pub fn name(self) -> &'static str {
        match self {
            LayoutPolicy::EvenHorizontal => "even-horizontal",
            LayoutPolicy::EvenVertical => "even-vertical",
            LayoutPolicy::MainVertical => "main-vertical",
            LayoutPolicy::MainVerticalFlipped => "main-vertical-flipped",
            LayoutPolicy::MainHorizontal => "main-horizontal",
            LayoutPolicy::DoubleMainHorizontal => "double-main-horizontal",
            LayoutPolicy::DoubleMainVertical => "double-main-vertical",
            LayoutPolicy::Tiled => "tiled",
            LayoutPolicy::ThreeColumns => "3_columns",
        }
    }

    /// The policy actually used for `panes` panes.
    ///
    /// Two tiled panes stack like `even-vertical`, which is what tmux does.
    /// The double-main layouts need three panes; with two they fall back to
    /// the matching single-main layout.
    pub fn effective(self, panes: u32) -> LayoutPolicy {
        match (self, panes) {
            (LayoutPolicy::Tiled, 2) => LayoutPolicy::EvenVertical,
            (LayoutPolicy::DoubleMainHorizontal, 2) => LayoutPolicy::MainHorizontal,
            (LayoutPolicy::DoubleMainVertical, 2) => LayoutPolicy::MainVertical,
            (policy, _) => policy,
        }
    }

    pub(crate) fn terminal(self) -> Terminal {
        match self {
            LayoutPolicy::EvenHorizontal
            | LayoutPolicy::EvenVertical
            | LayoutPolicy::MainVertical
            | LayoutPolicy::MainHorizontal
            | LayoutPolicy::Tiled => Terminal::WrapToFirst,
            LayoutPolicy::MainVerticalFlipped
            | LayoutPolicy::DoubleMainHorizontal
            | LayoutPolicy::DoubleMainVertical
            | LayoutPolicy::ThreeColumns => Terminal::Stay,
        }
    }

    /// The ordered splits that build `panes` panes under this policy.
    ///
    /// Callers should pass the result of [`LayoutPolicy::effective`]; the
    /// double-main plans assume at least three panes.
    pub(crate) fn plan(self, panes: u32) -> Vec<PlannedSplit> {
        use Orientation::{Horizontal, Vertical};

        if panes <= 1 {
            return Vec::new();
        }
        let n = panes;

        match self {
            LayoutPolicy::EvenHorizontal => chain(2, n, Vertical).collect(),
            LayoutPolicy::EvenVertical => chain(2, n, Horizontal).collect(),
            LayoutPolicy::MainVertical => std::iter::once(planned(1, 2, Vertical))
                .chain(chain(3, n, Horizontal))
                .collect(),
            LayoutPolicy::MainVerticalFlipped => {
                // Focus returns to pane 1 after the main split, even when
                // nothing else is split off it.
                let main = PlannedSplit {
                    then: Some(FocusDirection::Previous),
                    ..planned(1, n, Vertical)
                };
                std::iter::once(main).chain(chain(2, n - 1, Horizontal)).collect()
            }
            LayoutPolicy::MainHorizontal => std::iter::once(planned(1, 2, Horizontal))
                .chain(chain(3, n, Vertical))
                .collect(),
            LayoutPolicy::DoubleMainHorizontal => {
                [planned(1, n - 1, Horizontal), planned(n - 1, n, Vertical)]
                    .into_iter()
                    .chain(chain(2, n - 2, Vertical))
                    .collect()
            }
            LayoutPolicy::DoubleMainVertical => {
                [planned(1, 2, Vertical), planned(2, 3, Vertical)]
                    .into_iter()
                    .chain(chain(4, n, Horizontal))
                    .collect()
            }
            LayoutPolicy::Tiled => tiled_plan(n),
            LayoutPolicy::ThreeColumns => three_column_plan(n),
        }
    }
}

/// Two columns: carve the rows down the left edge, then split each row.
/// An odd last pane keeps the full width.
fn tiled_plan(n: u32) -> Vec<PlannedSplit> {
    let row_splits = n.div_ceil(2) - 1;
    let mut plan: Vec<PlannedSplit> = (0..row_splits)
        .map(|p| planned(2 * p + 1, 2 * p + 3, Orientation::Horizontal))
        .collect();

    for p in 0..n / 2 {
        let mut column = planned(2 * p + 1, 2 * p + 2, Orientation::Vertical);
        if p == 0 && row_splits > 0 {
            // Below the last row is the first one again.
            column.approach = Approach::SpatialDown;
        }
        plan.push(column);
    }
    plan
}

/// Three columns: carve the rows, then fill each row left to right until
/// `n` panes exist. The last row may be short.
fn three_column_plan(n: u32) -> Vec<PlannedSplit> {
    let row_splits = n.div_ceil(3) - 1;
    let mut created = 1;
    let mut plan = Vec::new();

    for p in 0..row_splits {
        plan.push(planned(3 * p + 1, 3 * p + 4, Orientation::Horizontal));
        created += 1;
    }

    'rows: for p in 0..=row_splits {
        let first = 3 * p + 1;
        for q in 0..2 {
            if created >= n {
                break 'rows;
            }
            let mut column = planned(first + q, first + q + 1, Orientation::Vertical);
            if plan.len() as u32 == row_splits {
                column.approach = Approach::Wrap;
            }
            plan.push(column);
            created += 1;
        }
    }
    plan
}

impl FromStr for LayoutPolicy {
    type Err = PanescriptError;

    fn from_str(name: &str) -> Result<Self> {
        LayoutPolicy::ALL
            .into_iter()
            .find(|policy| policy.name() == name)
            .ok_or_else(|| PanescriptError::UnsupportedLayout(name.to_string()))
    }
}

impl fmt::Display for LayoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Orientation::{Horizontal, Vertical};

    fn splits(policy: LayoutPolicy, n: u32) -> Vec<(PaneId, PaneId, Orientation)> {
        policy
            .effective(n)
            .plan(n)
            .into_iter()
            .map(|p| (p.split.parent, p.split.child, p.split.orientation))
            .collect()
    }

    #[test]
    fn test_parse_names() {
        for policy in LayoutPolicy::ALL {
            assert_eq!(policy.name().parse::<LayoutPolicy>().unwrap(), policy);
        }
        assert!("Tiled".parse::<LayoutPolicy>().is_err());
    }

    #[test]
    fn test_even_strips() {
        assert_eq!(
            splits(LayoutPolicy::EvenHorizontal, 3),
            vec![(1, 2, Vertical), (2, 3, Vertical)]
        );
        assert_eq!(
            splits(LayoutPolicy::EvenVertical, 3),
            vec![(1, 2, Horizontal), (2, 3, Horizontal)]
        );
    }

    #[test]
    fn test_main_horizontal() {
        assert_eq!(
            splits(LayoutPolicy::MainHorizontal, 4),
            vec![(1, 2, Horizontal), (2, 3, Vertical), (3, 4, Vertical)]
        );
    }

    #[test]
    fn test_double_main_horizontal() {
        assert_eq!(
            splits(LayoutPolicy::DoubleMainHorizontal, 5),
            vec![
                (1, 4, Horizontal),
                (4, 5, Vertical),
                (1, 2, Vertical),
                (2, 3, Vertical)
            ]
        );
        assert_eq!(
            splits(LayoutPolicy::DoubleMainHorizontal, 3),
            vec![(1, 2, Horizontal), (2, 3, Vertical)]
        );
    }

    #[test]
    fn test_double_main_vertical() {
        assert_eq!(
            splits(LayoutPolicy::DoubleMainVertical, 5),
            vec![
                (1, 2, Vertical),
                (2, 3, Vertical),
                (3, 4, Horizontal),
                (4, 5, Horizontal)
            ]
        );
    }

    #[test]
    fn test_tiled_odd_last_pane_spans() {
        assert_eq!(
            splits(LayoutPolicy::Tiled, 5),
            vec![
                (1, 3, Horizontal),
                (3, 5, Horizontal),
                (1, 2, Vertical),
                (3, 4, Vertical)
            ]
        );
    }

    #[test]
    fn test_three_columns_seven() {
        assert_eq!(
            splits(LayoutPolicy::ThreeColumns, 7),
            vec![
                (1, 4, Horizontal),
                (4, 7, Horizontal),
                (1, 2, Vertical),
                (2, 3, Vertical),
                (4, 5, Vertical),
                (5, 6, Vertical)
            ]
        );
    }

    #[test]
    fn test_three_columns_short_last_row() {
        assert_eq!(
            splits(LayoutPolicy::ThreeColumns, 5),
            vec![
                (1, 4, Horizontal),
                (1, 2, Vertical),
                (2, 3, Vertical),
                (4, 5, Vertical)
            ]
        );
    }

    #[test]
    fn test_tiled_approaches() {
        let plan = LayoutPolicy::Tiled.plan(4);
        assert_eq!(plan[1].approach, Approach::SpatialDown);
        assert_eq!(plan[2].approach, Approach::Walk);
        assert!(LayoutPolicy::Tiled.plan(3).iter().any(|p| p.approach == Approach::SpatialDown));
    }

    #[test]
    fn test_three_columns_enters_first_row_by_wrapping() {
        for n in [2, 3, 7] {
            let plan = LayoutPolicy::ThreeColumns.plan(n);
            let first_column = plan
                .iter()
                .find(|p| p.split.orientation == Vertical)
                .unwrap();
            assert_eq!(first_column.approach, Approach::Wrap);
        }
    }

    #[test]
    fn test_flipped_steps_back_after_main_split() {
        for n in [2, 4] {
            let plan = LayoutPolicy::MainVerticalFlipped.plan(n);
            assert_eq!(plan[0].then, Some(FocusDirection::Previous));
            assert!(plan[1..].iter().all(|p| p.then.is_none()));
        }
    }
}
