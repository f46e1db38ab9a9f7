/// Index of the point closest to `x` in a series sorted by x. Ties go to the
/// earlier point.
pub fn nearest_index(points: &[(f64, f64)], x: f64) -> Option<usize> {
    if points.is_empty() || !x.is_finite() {
        return None;
    }
    let pos = points.partition_point(|&(px, _)| px < x);
    if pos == 0 {
        return Some(0);
    }
    if pos == points.len() {
        return Some(points.len() - 1);
    }
    let before = x - points[pos - 1].0;
    let after = points[pos].0 - x;
    if after < before {
        Some(pos)
    } else {
        Some(pos - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_closest_by_coordinate() {
        let pts = [(0.0, 1.0), (10.0, 2.0), (20.0, 3.0)];
        assert_eq!(nearest_index(&pts, 4.0), Some(0));
        assert_eq!(nearest_index(&pts, 6.0), Some(1));
        assert_eq!(nearest_index(&pts, 5.0), Some(0));
        assert_eq!(nearest_index(&pts, 20.0), Some(2));
    }

    #[test]
    fn clamps_outside_the_series() {
        let pts = [(100.0, 1.0), (200.0, 2.0)];
        assert_eq!(nearest_index(&pts, -5.0), Some(0));
        assert_eq!(nearest_index(&pts, 1e9), Some(1));
        assert_eq!(nearest_index(&[], 1.0), None);
    }

    #[test]
    fn charts_with_different_sampling_agree_on_time() {
        // 15-minute series and hourly series hovered at the same instant
        let fine: Vec<(f64, f64)> = (0..8).map(|i| (i as f64 * 15.0, i as f64)).collect();
        let coarse: Vec<(f64, f64)> = (0..2).map(|i| (i as f64 * 60.0, i as f64)).collect();
        let t = 50.0;
        assert_eq!(fine[nearest_index(&fine, t).unwrap()].0, 45.0);
        assert_eq!(coarse[nearest_index(&coarse, t).unwrap()].0, 60.0);
    }
}
