// Pointer interaction state: hovered cell and start/goal selection.
use crate::model::{Grid, Point};

/// Tracks the hovered cell. Only open cells are ever stored.
#[derive(Default, Debug, Clone)]
pub struct PointerTracker {
    pub hovered: Option<Point>,
}

impl PointerTracker {
    /// Pointer moved; `mapped` is the cell under it, if any. Returns whether the hover changed.
    pub fn on_move(&mut self, grid: &Grid, mapped: Option<Point>) -> bool {
        let next = mapped.filter(|p| grid.is_open(*p));
        let changed = next != self.hovered;
        self.hovered = next;
        changed
    }

    pub fn on_leave(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    /// The cell a click selects: in bounds and open, otherwise nothing.
    pub fn click_target(grid: &Grid, mapped: Option<Point>) -> Option<Point> {
        mapped.filter(|p| grid.is_open(*p))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Start,
    Goal,
}

impl SelectionMode {
    /// Mode to show after start/goal changed: missing endpoints are asked for first.
    pub fn settle(self, start: Option<Point>, goal: Option<Point>) -> SelectionMode {
        if start.is_none() {
            SelectionMode::Start
        } else if goal.is_none() {
            SelectionMode::Goal
        } else {
            self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Start(Point),
    Goal(Point),
}

/// Applies a selected cell under `mode`. Setting the start while no goal exists
/// moves on to goal selection.
pub fn select(mode: SelectionMode, goal_set: bool, point: Point) -> (Selection, SelectionMode) {
    match mode {
        SelectionMode::Start => {
            let next = if goal_set { SelectionMode::Start } else { SelectionMode::Goal };
            (Selection::Start(point), next)
        }
        SelectionMode::Goal => (Selection::Goal(point), SelectionMode::Goal),
    }
}
