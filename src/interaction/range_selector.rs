use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{MIN_WINDOW_SPAN, VisibleWindow};

/// Part of the range selector a drag started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragTarget {
    /// The window body; dragging shifts the whole window.
    Window,
    LeftHandle,
    RightHandle,
}

/// Window bounds and pointer position captured at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSnapshot {
    pub start: f64,
    pub end: f64,
    pub pointer_x: f64,
}

impl DragSnapshot {
    fn width(self) -> f64 {
        self.end - self.start
    }
}

/// Drag state machine mapping pointer deltas on the overview strip to a new
/// visible window.
///
/// Each drag target keeps its own snapshot and computes from it alone, so
/// several active snapshots never interfere with one another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSelector {
    min_span: f64,
    window: Option<DragSnapshot>,
    left: Option<DragSnapshot>,
    right: Option<DragSnapshot>,
}

impl Default for RangeSelector {
    fn default() -> Self {
        Self::new(MIN_WINDOW_SPAN)
    }
}

impl RangeSelector {
    #[must_use]
    pub fn new(min_span: f64) -> Self {
        Self {
            min_span,
            window: None,
            left: None,
            right: None,
        }
    }

    #[must_use]
    pub fn min_span(&self) -> f64 {
        self.min_span
    }

    #[must_use]
    pub fn snapshot(&self, target: DragTarget) -> Option<DragSnapshot> {
        match target {
            DragTarget::Window => self.window,
            DragTarget::LeftHandle => self.left,
            DragTarget::RightHandle => self.right,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.window.is_some() || self.left.is_some() || self.right.is_some()
    }

    pub fn pointer_down(&mut self, target: DragTarget, current: VisibleWindow, pointer_x: f64) {
        let snapshot = Some(DragSnapshot {
            start: current.start,
            end: current.end,
            pointer_x,
        });
        debug!(?target, start = current.start, end = current.end, "drag started");
        match target {
            DragTarget::Window => self.window = snapshot,
            DragTarget::LeftHandle => self.left = snapshot,
            DragTarget::RightHandle => self.right = snapshot,
        }
    }

    /// Resolves a pointer move into the next window.
    ///
    /// `selector_width` is the strip width in the same units as `pointer_x`.
    /// Returns `None` when no drag is active or every active drag rejected
    /// the move. When several drags are active they apply in the order
    /// window, left, right and the last one wins.
    #[must_use]
    pub fn pointer_move(&self, pointer_x: f64, selector_width: f64) -> Option<VisibleWindow> {
        if !selector_width.is_finite() || selector_width <= 0.0 || !pointer_x.is_finite() {
            trace!(pointer_x, selector_width, "pointer move ignored");
            return None;
        }

        let diff_from = |snapshot: DragSnapshot| (pointer_x - snapshot.pointer_x) / selector_width;

        let mut next = None;
        if let Some(snapshot) = self.window {
            if let Some(window) = self.move_window(snapshot, diff_from(snapshot)) {
                next = Some(window);
            }
        }
        if let Some(snapshot) = self.left {
            next = Some(self.resize_left(snapshot, diff_from(snapshot)));
        }
        if let Some(snapshot) = self.right {
            next = Some(self.resize_right(snapshot, diff_from(snapshot)));
        }
        next
    }

    /// Ends every drag; later moves are no-ops until the next pointer down.
    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            debug!("drag finished");
        }
        self.window = None;
        self.left = None;
        self.right = None;
    }

    /// Shifts the window by `diff`, keeping its width exact.
    ///
    /// A move that carries the window wholly past a domain edge is rejected
    /// instead of clamped.
    fn move_window(&self, snapshot: DragSnapshot, diff: f64) -> Option<VisibleWindow> {
        let width = snapshot.width();
        let mut start = snapshot.start + diff;
        let mut end = snapshot.end + diff;

        if start > 1.0 || end < 0.0 {
            trace!(start, end, "window move rejected");
            return None;
        }
        if start < 0.0 {
            start = 0.0;
            end = width;
        }
        if end > 1.0 {
            end = 1.0;
            start = 1.0 - width;
        }

        Some(VisibleWindow { start, end })
    }

    fn resize_left(&self, snapshot: DragSnapshot, diff: f64) -> VisibleWindow {
        let mut start = (snapshot.start + diff).max(0.0);
        if snapshot.end - start < self.min_span {
            start = snapshot.end - self.min_span;
        }
        VisibleWindow {
            start,
            end: snapshot.end,
        }
    }

    fn resize_right(&self, snapshot: DragSnapshot, diff: f64) -> VisibleWindow {
        let mut end = (snapshot.end + diff).min(1.0);
        if end - snapshot.start < self.min_span {
            end = snapshot.start + self.min_span;
        }
        VisibleWindow {
            start: snapshot.start,
            end,
        }
    }
}
