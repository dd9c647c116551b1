/// Commits a jump only after it persists for `sustain_frames` consecutive
/// frames with a consistent target.
#[derive(Debug, Clone)]
pub struct HysteresisGate {
    threshold: f64,
    tolerance: f64,
    sustain_frames: u32,
    pending_target: Option<f64>,
    sustain_count: u32,
}

impl HysteresisGate {
    pub fn new(threshold: f64, tolerance: f64, sustain_frames: u32) -> Self {
        assert!(threshold >= 0.0, "Threshold must be non-negative");
        assert!(tolerance >= 0.0, "Tolerance must be non-negative");
        assert!(sustain_frames > 0, "Sustain frames must be greater than 0");
        Self {
            threshold,
            tolerance,
            sustain_frames,
            pending_target: None,
            sustain_count: 0,
        }
    }

    /// Return `candidate` if the jump from `current` is committed this
    /// frame, otherwise `current`.
    pub fn apply(&mut self, current: f64, candidate: f64) -> f64 {
        if (candidate - current).abs() <= self.threshold {
            self.sustain_count = 0;
            self.pending_target = None;
            return current;
        }

        match self.pending_target {
            Some(target) if (candidate - target).abs() <= self.tolerance => self.sustain_count += 1,
            _ => {
                self.pending_target = Some(candidate);
                self.sustain_count = 1;
            }
        }

        if self.sustain_count >= self.sustain_frames {
            log::trace!("Hysteresis committed {:.3} -> {:.3}", current, candidate);
            self.sustain_count = 0;
            self.pending_target = None;
            candidate
        } else {
            current
        }
    }

    pub fn pending_target(&self) -> Option<f64> {
        self.pending_target
    }

    pub fn sustain_count(&self) -> u32 {
        self.sustain_count
    }

    pub fn reset(&mut self) {
        self.pending_target = None;
        self.sustain_count = 0;
    }
}
