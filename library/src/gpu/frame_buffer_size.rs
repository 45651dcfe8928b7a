use derive_more::Display;
use more_asserts::assert_gt;

/// Fixed resolution of the accumulated image.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
#[display("{width}x{height}")]
pub struct FrameBufferSize {
    width: u32,
    height: u32,
}

impl FrameBufferSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert_gt!(width, 0);
        assert_gt!(height, 0);
        Self { width, height }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for FrameBufferSize {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}
