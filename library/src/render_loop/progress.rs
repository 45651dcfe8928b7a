use crate::utils::throttled_logger::ThrottledInfoLogger;
use crate::utils::time_throttled_logger::TimeThrottledInfoLogger;
use derive_more::Display;
use log::info;
use std::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
#[display("sample {sample_index} ({percentage}%)")]
pub struct Progress {
    sample_index: u32,
    percentage: u32,
}

impl Progress {
    #[must_use]
    pub fn new(sample_index: u32, samples_target: u32) -> Self {
        Self { sample_index, percentage: progress_percentage(sample_index, samples_target) }
    }

    #[must_use]
    pub fn sample_index(&self) -> u32 {
        self.sample_index
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        100 == self.percentage
    }
}

/// `floor(100 * sample / target)`, computed in integers.
#[must_use]
pub fn progress_percentage(sample_index: u32, samples_target: u32) -> u32 {
    assert!(samples_target > 0, "samples target must be positive");
    let sample_index = sample_index.min(samples_target);
    (100 * u64::from(sample_index) / u64::from(samples_target)) as u32
}

#[must_use]
pub fn should_continue(sample_index: u32, samples_target: u32) -> bool {
    sample_index < samples_target
}

/// Observer of the loop's progress. It must not influence the loop.
pub trait ProgressDisplay {
    fn show(&mut self, progress: Progress);
}

enum Throttle {
    ByTime(TimeThrottledInfoLogger),
    BySamples(ThrottledInfoLogger),
}

/// Reports progress to the log without flooding it; completion is always reported.
pub struct LoggingProgressDisplay {
    throttle: Throttle,
}

impl LoggingProgressDisplay {
    #[must_use]
    pub fn every(interval: Duration) -> Self {
        Self { throttle: Throttle::ByTime(TimeThrottledInfoLogger::new(interval)) }
    }

    #[must_use]
    pub fn every_nth_sample(interval: usize) -> Self {
        Self { throttle: Throttle::BySamples(ThrottledInfoLogger::new(interval)) }
    }

    fn report(&mut self, progress: Progress) -> bool {
        let message = format!("accumulated {progress}");
        if progress.is_complete() {
            info!("{message}");
            return true;
        }
        match &mut self.throttle {
            Throttle::ByTime(logger) => logger.do_write(message),
            Throttle::BySamples(logger) => logger.do_write(message),
        }
    }
}

impl ProgressDisplay for LoggingProgressDisplay {
    fn show(&mut self, progress: Progress) {
        self.report(progress);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;

    /// Remembers everything it was shown.
    #[derive(Default)]
    pub(crate) struct RecordingProgressDisplay {
        pub(crate) shown: Vec<Progress>,
    }

    impl ProgressDisplay for RecordingProgressDisplay {
        fn show(&mut self, progress: Progress) {
            self.shown.push(progress);
        }
    }

    #[rstest]
    #[case(0, 600, 0)]
    #[case(5, 600, 0)]
    #[case(6, 600, 1)]
    #[case(299, 600, 49)]
    #[case(300, 600, 50)]
    #[case(599, 600, 99)]
    #[case(600, 600, 100)]
    #[case(29, 100, 29)]
    #[case(1, 3, 33)]
    #[case(19999, 20000, 99)]
    #[case(20000, 20000, 100)]
    fn test_progress_percentage(#[case] sample_index: u32, #[case] samples_target: u32, #[case] expected: u32) {
        assert_eq!(progress_percentage(sample_index, samples_target), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(600)]
    #[case(3000)]
    fn test_progress_is_monotonic(#[case] samples_target: u32) {
        let percentages: Vec<u32> = (0..=samples_target).map(|sample| progress_percentage(sample, samples_target)).collect();

        assert!(percentages.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(percentages.first(), Some(&0));
        assert_eq!(percentages.last(), Some(&100));
    }

    #[rstest]
    #[case(0, 3, true)]
    #[case(2, 3, true)]
    #[case(3, 3, false)]
    #[case(4, 3, false)]
    fn test_should_continue(#[case] sample_index: u32, #[case] samples_target: u32, #[case] expected: bool) {
        assert_eq!(should_continue(sample_index, samples_target), expected);
    }

    #[test]
    fn test_progress_display_format() {
        let system_under_test = Progress::new(150, 600);

        assert_eq!(system_under_test.to_string(), "sample 150 (25%)");
        assert!(!system_under_test.is_complete());
        assert!(Progress::new(600, 600).is_complete());
    }

    #[test]
    fn test_logging_display_throttles_by_samples() {
        let mut system_under_test = LoggingProgressDisplay::every_nth_sample(4);

        let reported: Vec<bool> = (1..=10).map(|sample| system_under_test.report(Progress::new(sample, 10))).collect();

        assert_eq!(reported, vec![false, false, false, true, false, false, false, true, false, true]);
    }

    #[test]
    fn test_logging_display_throttles_by_time() {
        let mut system_under_test = LoggingProgressDisplay::every(Duration::from_secs(3600));

        assert!(system_under_test.report(Progress::new(1, 10)));
        assert!(!system_under_test.report(Progress::new(2, 10)));
        assert!(system_under_test.report(Progress::new(10, 10)));
    }
}
