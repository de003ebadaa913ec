/// Returns the index in `start_idx..=end_idx` whose coordinate is closest to
/// `target`.
///
/// `coords` must be monotonically increasing. The search interpolates an
/// initial guess from the endpoint coordinates and then walks left and right
/// while the distance keeps strictly shrinking, so roughly uniform sampling
/// resolves in a handful of probes while irregular sampling still converges.
///
/// Returns `None` for an empty slice. `end_idx` is clamped to the last index;
/// when the range collapses (`end_idx <= start_idx`) `start_idx` is returned.
#[must_use]
pub fn nearest_index(coords: &[f64], target: f64, start_idx: usize, end_idx: usize) -> Option<usize> {
    if coords.is_empty() {
        return None;
    }

    let last = coords.len() - 1;
    let start_idx = start_idx.min(last);
    let end_idx = end_idx.min(last);
    if end_idx <= start_idx {
        return Some(start_idx);
    }

    let from = coords[start_idx];
    let to = coords[end_idx];
    let span = to - from;
    let estimate = if span > 0.0 && target.is_finite() {
        let ratio = ((target - from) / span).clamp(0.0, 1.0);
        start_idx + ((end_idx - start_idx) as f64 * ratio).round() as usize
    } else {
        start_idx
    };
    let estimate = estimate.clamp(start_idx, end_idx);

    let distance = |index: usize| (coords[index] - target).abs();

    let mut right = estimate;
    while right < end_idx && distance(right + 1) < distance(right) {
        right += 1;
    }

    let mut left = estimate;
    while left > start_idx && distance(left - 1) < distance(left) {
        left -= 1;
    }

    if distance(left) <= distance(right) {
        Some(left)
    } else {
        Some(right)
    }
}

#[cfg(test)]
mod tests {
    use super::nearest_index;

    #[test]
    fn empty_input_has_no_nearest_index() {
        assert_eq!(nearest_index(&[], 1.0, 0, 0), None);
    }

    #[test]
    fn collapsed_range_returns_start() {
        let coords = [0.0, 1.0, 2.0];
        assert_eq!(nearest_index(&coords, 2.0, 1, 1), Some(1));
        assert_eq!(nearest_index(&coords, 2.0, 2, 0), Some(2));
    }

    #[test]
    fn uniform_samples_resolve_to_closest() {
        let coords: Vec<f64> = (0..100).map(|i| f64::from(i) * 10.0).collect();
        assert_eq!(nearest_index(&coords, 434.0, 0, 99), Some(43));
        assert_eq!(nearest_index(&coords, 436.0, 0, 99), Some(44));
    }

    #[test]
    fn irregular_samples_still_converge() {
        let coords = [0.0, 1.0, 2.0, 3.0, 100.0, 101.0, 1000.0];
        assert_eq!(nearest_index(&coords, 95.0, 0, 6), Some(4));
        assert_eq!(nearest_index(&coords, 2.4, 0, 6), Some(2));
    }

    #[test]
    fn out_of_range_targets_pick_endpoints() {
        let coords = [5.0, 6.0, 7.0, 8.0];
        assert_eq!(nearest_index(&coords, -50.0, 0, 3), Some(0));
        assert_eq!(nearest_index(&coords, 50.0, 0, 3), Some(3));
        assert_eq!(nearest_index(&coords, 50.0, 0, 2), Some(2));
        assert_eq!(nearest_index(&coords, 50.0, 0, 99), Some(3));
    }
}
