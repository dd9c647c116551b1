/// Rejects samples that moved less than `width` since the previous sample
#[derive(Debug, Clone)]
pub struct DeadZone {
    width: f64,
    previous: Option<f64>,
}

impl DeadZone {
    pub fn new(width: f64) -> Self {
        assert!(width >= 0.0, "Dead zone width must be non-negative");
        Self { width, previous: None }
    }

    /// Start from a known previous sample
    pub fn seeded(width: f64, previous: f64) -> Self {
        let mut zone = Self::new(width);
        zone.previous = Some(previous);
        zone
    }

    /// Report whether `raw` moved far enough, recording it as the new
    /// previous sample either way.
    pub fn admit(&mut self, raw: f64) -> bool {
        let admitted = match self.previous {
            Some(previous) => (raw - previous).abs() >= self.width,
            None => true,
        };
        self.previous = Some(raw);
        admitted
    }

    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_zone() {
        let mut zone = DeadZone::new(1.5);

        // First sample always passes
        assert!(zone.admit(10.0));
        assert!(!zone.admit(11.0));
        // Compared against the previous sample, not the first one
        assert!(!zone.admit(12.0));
        assert!(zone.admit(13.5));
        assert_eq!(zone.previous(), Some(13.5));
    }

    #[test]
    fn test_rejected_sample_still_recorded() {
        let mut zone = DeadZone::seeded(1.5, 0.0);
        assert!(!zone.admit(1.0));
        assert_eq!(zone.previous(), Some(1.0));

        zone.reset();
        assert_eq!(zone.previous(), None);
    }
}
