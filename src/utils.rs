//! Range mapping helpers shared by the extractor and classifier.

/// Linearly re-map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// No clamping is applied, so values outside the input range extrapolate.
/// Either range may be reversed.
#[must_use]
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}

/// Re-map and clamp the result into `[0, 1]`
#[must_use]
pub fn map_unit(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    map_range(value, in_min, in_max, out_min, out_max).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        assert_eq!(map_range(20.0, 20.0, 50.0, 20.0, -40.0), 20.0);
        assert_eq!(map_range(50.0, 20.0, 50.0, 20.0, -40.0), -40.0);
        // Extrapolates outside the input range
        assert_eq!(map_range(60.0, 20.0, 50.0, 20.0, -40.0), -60.0);
    }

    #[test]
    fn test_map_unit_clamps() {
        assert_eq!(map_unit(40.0, 5.0, 30.0, 0.0, 1.0), 1.0);
        assert_eq!(map_unit(0.0, 5.0, 30.0, 0.0, 1.0), 0.0);
        assert!((map_unit(17.5, 5.0, 30.0, 0.0, 1.0) - 0.5).abs() < 1e-12);
    }
}
