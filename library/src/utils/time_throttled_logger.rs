use log::info;
use std::time::{Duration, Instant};

/// Writes at most one line per `interval`; the very first line always goes through.
pub(crate) struct TimeThrottledInfoLogger {
    interval: Duration,
    last_log_action: Option<Instant>,
}

impl TimeThrottledInfoLogger {
    #[must_use]
    pub(crate) fn new(interval: Duration) -> Self {
        Self { interval, last_log_action: None }
    }

    pub(crate) fn do_write(&mut self, message: impl Into<String>) -> bool {
        self.do_write_at(Instant::now(), message)
    }

    pub(crate) fn do_write_at(&mut self, now: Instant, message: impl Into<String>) -> bool {
        if let Some(last_log_action) = self.last_log_action {
            let delta = now.saturating_duration_since(last_log_action);
            if delta < self.interval {
                return false;
            }
        }
        info!("{}", message.into());
        self.last_log_action = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_is_written() {
        let mut system_under_test = TimeThrottledInfoLogger::new(Duration::from_secs(60));

        assert!(system_under_test.do_write("first"));
        assert!(!system_under_test.do_write("second"));
    }

    #[test]
    fn test_interval_is_respected() {
        let start = Instant::now();
        let interval = Duration::from_secs(2);
        let mut system_under_test = TimeThrottledInfoLogger::new(interval);

        assert!(system_under_test.do_write_at(start, "a"));
        assert!(!system_under_test.do_write_at(start + Duration::from_millis(1999), "b"));
        assert!(system_under_test.do_write_at(start + interval, "c"));
        assert!(!system_under_test.do_write_at(start + interval + Duration::from_millis(1), "d"));
    }
}
