use crate::constants::{ALPHA_FAST, ALPHA_MEDIUM, ALPHA_SLOW, VELOCITY_FAST, VELOCITY_MEDIUM, VELOCITY_SLOW};

/// Velocity-dependent EMA weights.
///
/// `alpha` is the weight kept by the previous smoothed value, so slow
/// motion (low alpha) tracks the input closely and fast motion is damped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaSchedule {
    pub velocity_slow: f64,
    pub velocity_medium: f64,
    pub velocity_fast: f64,
    pub alpha_slow: f64,
    pub alpha_medium: f64,
    pub alpha_fast: f64,
}

impl Default for AlphaSchedule {
    fn default() -> Self {
        Self {
            velocity_slow: VELOCITY_SLOW,
            velocity_medium: VELOCITY_MEDIUM,
            velocity_fast: VELOCITY_FAST,
            alpha_slow: ALPHA_SLOW,
            alpha_medium: ALPHA_MEDIUM,
            alpha_fast: ALPHA_FAST,
        }
    }
}

impl AlphaSchedule {
    /// Weight for the previous smoothed value at the given velocity
    pub fn alpha(&self, velocity: f64) -> f64 {
        if velocity < self.velocity_slow {
            self.alpha_slow
        } else if velocity < self.velocity_medium {
            self.alpha_medium
        } else if velocity > self.velocity_fast {
            self.alpha_fast
        } else {
            let t = (velocity - self.velocity_medium) / (self.velocity_fast - self.velocity_medium);
            self.alpha_medium + t * (self.alpha_fast - self.alpha_medium)
        }
    }

    /// Blend `current` towards `target` using the weight for their distance
    pub fn blend(&self, current: f64, target: f64) -> f64 {
        let alpha = self.alpha((target - current).abs());
        current * alpha + target * (1.0 - alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_breakpoints() {
        let schedule = AlphaSchedule::default();

        assert_eq!(schedule.alpha(0.0), 0.08);
        assert_eq!(schedule.alpha(0.99), 0.08);
        assert_eq!(schedule.alpha(1.0), 0.15);
        assert_eq!(schedule.alpha(2.99), 0.15);
        assert!((schedule.alpha(3.0) - 0.15).abs() < 1e-12);
        assert!((schedule.alpha(9.0) - 0.325).abs() < 1e-12);
        assert!((schedule.alpha(15.0) - 0.5).abs() < 1e-12);
        assert_eq!(schedule.alpha(40.0), 0.5);
    }

    #[test]
    fn test_blend() {
        let schedule = AlphaSchedule::default();

        // Slow: 0.08 * 10 + 0.92 * 10.5
        assert!((schedule.blend(10.0, 10.5) - 10.46).abs() < 1e-12);
        // Fast: halfway
        assert!((schedule.blend(0.0, -20.0) - (-10.0)).abs() < 1e-12);
    }
}
