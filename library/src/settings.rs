use crate::gpu::frame_buffer_size::FrameBufferSize;
use derive_more::Display;
use strum_macros::EnumIter;
use std::time::Duration;

/// Sample counts the renderer is usually run with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Display, EnumIter)]
pub enum SamplesTarget {
    Preview,
    Standard,
    Final,
}

impl SamplesTarget {
    #[must_use]
    pub fn samples(self) -> u32 {
        match self {
            SamplesTarget::Preview => 600,
            SamplesTarget::Standard => 3000,
            SamplesTarget::Final => 20000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    frame_size: FrameBufferSize,
    samples_target: u32,
    step_deadline: Option<Duration>,
    rng_seed: Option<u64>,
}

impl RenderSettings {
    pub const DEFAULT_STEP_DEADLINE: Duration = Duration::from_secs(2);

    #[must_use]
    pub fn with_frame_size(mut self, frame_size: FrameBufferSize) -> Self {
        self.frame_size = frame_size;
        self
    }

    #[must_use]
    pub fn with_samples_target(mut self, samples_target: u32) -> Self {
        assert!(samples_target > 0, "samples target must be positive");
        self.samples_target = samples_target;
        self
    }

    #[must_use]
    pub fn with_preset(self, preset: SamplesTarget) -> Self {
        self.with_samples_target(preset.samples())
    }

    /// `None` lets a step take arbitrarily long.
    #[must_use]
    pub fn with_step_deadline(mut self, step_deadline: Option<Duration>) -> Self {
        self.step_deadline = step_deadline;
        self
    }

    /// Fixes the per-pixel seeds; by default they come from the OS entropy source.
    #[must_use]
    pub fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    #[must_use]
    pub fn frame_size(&self) -> FrameBufferSize {
        self.frame_size
    }

    #[must_use]
    pub fn samples_target(&self) -> u32 {
        self.samples_target
    }

    #[must_use]
    pub fn step_deadline(&self) -> Option<Duration> {
        self.step_deadline
    }

    #[must_use]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            frame_size: FrameBufferSize::default(),
            samples_target: SamplesTarget::Final.samples(),
            step_deadline: Some(Self::DEFAULT_STEP_DEADLINE),
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let system_under_test = RenderSettings::default();

        assert_eq!(system_under_test.frame_size(), FrameBufferSize::new(1280, 720));
        assert_eq!(system_under_test.samples_target(), 20000);
        assert_eq!(system_under_test.step_deadline(), Some(Duration::from_secs(2)));
        assert_eq!(system_under_test.rng_seed(), None);
    }

    #[rstest]
    #[case(SamplesTarget::Preview, 600)]
    #[case(SamplesTarget::Standard, 3000)]
    #[case(SamplesTarget::Final, 20000)]
    fn test_presets(#[case] preset: SamplesTarget, #[case] expected_samples: u32) {
        let system_under_test = RenderSettings::default().with_preset(preset);

        assert_eq!(system_under_test.samples_target(), expected_samples);
    }

    #[test]
    fn test_customisation() {
        let system_under_test = RenderSettings::default()
            .with_frame_size(FrameBufferSize::new(64, 32))
            .with_samples_target(5)
            .with_step_deadline(None)
            .with_rng_seed(42);

        assert_eq!(system_under_test.frame_size(), FrameBufferSize::new(64, 32));
        assert_eq!(system_under_test.samples_target(), 5);
        assert_eq!(system_under_test.step_deadline(), None);
        assert_eq!(system_under_test.rng_seed(), Some(42));
    }

    #[test]
    #[should_panic(expected = "samples target must be positive")]
    fn test_zero_samples_target() {
        let _system_under_test = RenderSettings::default().with_samples_target(0);
    }
}
