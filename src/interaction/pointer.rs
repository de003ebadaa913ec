use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Pointer sample delivered by the host, in surface-local CSS pixels.
///
/// Touch samples carry the first active touch; `x` is `None` when the touch
/// list is empty (for example on touch end).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: Option<f64>,
    pub cancelable: bool,
}

impl PointerEvent {
    #[must_use]
    pub fn mouse(x: f64) -> Self {
        Self {
            kind: PointerKind::Mouse,
            x: Some(x),
            cancelable: true,
        }
    }

    #[must_use]
    pub fn touch(x: f64, cancelable: bool) -> Self {
        Self {
            kind: PointerKind::Touch,
            x: Some(x),
            cancelable,
        }
    }

    /// Touch sample with no remaining touches.
    #[must_use]
    pub fn touch_released() -> Self {
        Self {
            kind: PointerKind::Touch,
            x: None,
            cancelable: false,
        }
    }

    /// Position used for hover tracking.
    ///
    /// Touches that are empty or not cancelable (the host is scrolling) do
    /// not move the hover.
    #[must_use]
    pub fn hover_x(self) -> Option<f64> {
        match self.kind {
            PointerKind::Mouse => self.x.filter(|x| x.is_finite()),
            PointerKind::Touch if self.cancelable => self.x.filter(|x| x.is_finite()),
            PointerKind::Touch => None,
        }
    }

    /// Position used for drags; an empty touch list reads as the origin.
    #[must_use]
    pub fn drag_x(self) -> f64 {
        self.x.filter(|x| x.is_finite()).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PointerEvent;

    #[test]
    fn scrolling_touches_do_not_hover() {
        assert_eq!(PointerEvent::mouse(12.0).hover_x(), Some(12.0));
        assert_eq!(PointerEvent::touch(12.0, true).hover_x(), Some(12.0));
        assert_eq!(PointerEvent::touch(12.0, false).hover_x(), None);
        assert_eq!(PointerEvent::touch_released().hover_x(), None);
    }

    #[test]
    fn released_touch_drags_from_origin() {
        assert_eq!(PointerEvent::touch_released().drag_x(), 0.0);
        assert_eq!(PointerEvent::mouse(f64::NAN).drag_x(), 0.0);
    }
}
