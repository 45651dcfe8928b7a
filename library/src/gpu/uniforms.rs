use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::GpuSerializationSize;
use std::time::Duration;

/// Per-frame scalars read by the shading unit. Every field goes to the
/// GPU as `f32`; the block is always uploaded as a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameUniforms {
    frame_buffer_size: FrameBufferSize,
    primitive_count: u32,
    sample_index: u32,
    elapsed: Duration,
    display_only: bool,
}

impl FrameUniforms {
    #[must_use]
    pub fn new(frame_buffer_size: FrameBufferSize, primitive_count: u32) -> Self {
        Self { frame_buffer_size, primitive_count, sample_index: 0, elapsed: Duration::ZERO, display_only: false }
    }

    pub fn set_sample_index(&mut self, sample_index: u32) {
        self.sample_index = sample_index;
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// A display-only pass shows the accumulated average without tracing
    /// new paths or touching the per-pixel state.
    pub fn set_display_only(&mut self, display_only: bool) {
        self.display_only = display_only;
    }

    #[must_use]
    pub fn sample_index(&self) -> u32 {
        self.sample_index
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn display_only(&self) -> bool {
        self.display_only
    }

    #[must_use]
    pub fn frame_buffer_size(&self) -> FrameBufferSize {
        self.frame_buffer_size
    }

    #[must_use]
    pub fn primitive_count(&self) -> u32 {
        self.primitive_count
    }

    #[must_use]
    pub(crate) fn serialize(&self) -> GpuReadySerializationBuffer {
        let mut result = GpuReadySerializationBuffer::new(1, Self::SERIALIZED_QUARTET_COUNT);

        result.write_quartet_f32(
            self.elapsed.as_secs_f32(),
            self.frame_buffer_size.width() as f32,
            self.frame_buffer_size.height() as f32,
            self.primitive_count as f32,
        );
        result.write_quartet(|writer| {
            writer
                .write_float_32(self.sample_index as f32)
                .write_float_32(if self.display_only { 1.0 } else { 0.0 });
        });

        debug_assert!(result.object_fully_written());
        result
    }
}

impl GpuSerializationSize for FrameUniforms {
    const SERIALIZED_QUARTET_COUNT: usize = 2;
}
