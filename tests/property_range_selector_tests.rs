use proptest::prelude::*;
use telechart_rs::core::VisibleWindow;
use telechart_rs::interaction::{DragTarget, RangeSelector};

const MIN_SPAN: f64 = 0.1;
const WIDTH: f64 = 400.0;

fn target_strategy() -> impl Strategy<Value = DragTarget> {
    prop_oneof![
        Just(DragTarget::Window),
        Just(DragTarget::LeftHandle),
        Just(DragTarget::RightHandle),
    ]
}

#[test]
fn window_dragged_wholly_off_the_strip_is_rejected() {
    let mut selector = RangeSelector::new(MIN_SPAN);
    let window = VisibleWindow::new(0.4, 0.8).expect("window");
    selector.pointer_down(DragTarget::Window, window, 100.0);
    assert_eq!(selector.pointer_move(100.0 + WIDTH * 0.7, WIDTH), None);
    assert_eq!(selector.pointer_move(100.0 - WIDTH * 0.9, WIDTH), None);
}

proptest! {
    #[test]
    fn drags_keep_the_window_valid_property(
        start in 0.0f64..0.9,
        span in MIN_SPAN..1.0,
        target in target_strategy(),
        down_x in 0.0f64..WIDTH,
        move_x in -2.0 * WIDTH..3.0 * WIDTH
    ) {
        let end = (start + span).min(1.0);
        prop_assume!(end - start >= MIN_SPAN);
        let window = VisibleWindow::new(start, end).expect("window");

        let mut selector = RangeSelector::new(MIN_SPAN);
        selector.pointer_down(target, window, down_x);
        if let Some(next) = selector.pointer_move(move_x, WIDTH) {
            prop_assert!(next.start >= -1e-12);
            prop_assert!(next.end <= 1.0 + 1e-12);
            prop_assert!(next.span() >= MIN_SPAN - 1e-9);
            if target == DragTarget::Window {
                prop_assert!((next.span() - window.span()).abs() <= 1e-9);
            }
        } else {
            prop_assert_eq!(target, DragTarget::Window);
        }

        selector.pointer_up();
        prop_assert!(selector.pointer_move(move_x, WIDTH).is_none());
    }
}
