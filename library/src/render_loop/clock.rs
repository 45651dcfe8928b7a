use std::time::{Duration, Instant};

pub trait Clock {
    /// Time passed since the clock was started.
    fn elapsed(&self) -> Duration;
}

pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Moves only when told to; clones share the same time.
    #[derive(Clone, Default)]
    pub(crate) struct ManualClock {
        now: Rc<Cell<Duration>>,
    }

    impl ManualClock {
        pub(crate) fn advance(&self, delta: Duration) {
            self.now.set(self.now.get() + delta);
        }
    }

    impl Clock for ManualClock {
        fn elapsed(&self) -> Duration {
            self.now.get()
        }
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let system_under_test = SystemClock::start();

        let first = system_under_test.elapsed();
        let second = system_under_test.elapsed();

        assert!(second >= first);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let system_under_test = ManualClock::default();
        let observer = system_under_test.clone();

        system_under_test.advance(Duration::from_millis(250));

        assert_eq!(observer.elapsed(), Duration::from_millis(250));
    }
}
