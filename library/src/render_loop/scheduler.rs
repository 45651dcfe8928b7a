/// Host facility that runs the next loop step before the next display refresh.
pub trait FrameScheduler {
    fn request_next_step(&self);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    pub(crate) struct CountingScheduler {
        requests: Cell<usize>,
        pending: Cell<bool>,
    }

    impl CountingScheduler {
        #[must_use]
        pub(crate) fn requests(&self) -> usize {
            self.requests.get()
        }

        /// Returns `true` when a request was pending.
        pub(crate) fn take_request(&self) -> bool {
            self.pending.replace(false)
        }
    }

    impl FrameScheduler for CountingScheduler {
        fn request_next_step(&self) {
            self.requests.set(self.requests.get() + 1);
            self.pending.set(true);
        }
    }
}
