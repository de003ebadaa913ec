//! Pointer input and the overview range selector.

mod pointer;
mod range_selector;

pub use pointer::{PointerEvent, PointerKind};
pub use range_selector::{DragSnapshot, DragTarget, RangeSelector};
