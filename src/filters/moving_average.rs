use std::collections::VecDeque;

/// Moving average over the last `window_size` samples
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window_size: usize,
    buffer: VecDeque<f64>,
}

impl MovingAverage {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            window_size,
            buffer: VecDeque::with_capacity(window_size),
        }
    }

    /// Push a sample, evicting the oldest when full, and return the mean
    pub fn push(&mut self, value: f64) -> f64 {
        if self.buffer.len() >= self.window_size {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);

        self.buffer.iter().sum::<f64>() / self.buffer.len() as f64
    }

    pub fn samples(&self) -> &VecDeque<f64> {
        &self.buffer
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
