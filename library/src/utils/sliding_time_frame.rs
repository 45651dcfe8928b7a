use std::time::Duration;

/// Average over the last `measurements_count` durations.
pub(crate) struct SlidingTimeFrame {
    deltas: Vec<Duration>,
    circular_buffer_pointer: usize,
    filled: usize,
    total_delta: Duration,
}

impl SlidingTimeFrame {
    #[must_use]
    pub(crate) fn new(measurements_count: usize) -> Self {
        assert!(measurements_count > 0);
        Self {
            deltas: vec![Duration::ZERO; measurements_count],
            circular_buffer_pointer: 0,
            filled: 0,
            total_delta: Duration::ZERO,
        }
    }

    pub(crate) fn add_delta(&mut self, delta: Duration) {
        let erased_value = self.deltas[self.circular_buffer_pointer];
        self.deltas[self.circular_buffer_pointer] = delta;
        self.total_delta = self.total_delta + delta - erased_value;
        self.circular_buffer_pointer = (self.circular_buffer_pointer + 1) % self.deltas.len();
        self.filled = (self.filled + 1).min(self.deltas.len());
    }

    #[must_use]
    pub(crate) fn average_delta(&self) -> Duration {
        if 0 == self.filled {
            return Duration::ZERO;
        }
        self.total_delta / self.filled as u32
    }
}
