use crate::serialization::gpu_ready_serialization_buffer::{GpuReadySerializationBuffer, QUARTET_SIZE_BYTES};

pub(crate) trait GpuSerializationSize {
    const SERIALIZED_QUARTET_COUNT: usize;
    const SERIALIZED_SIZE_BYTES: usize = Self::SERIALIZED_QUARTET_COUNT * QUARTET_SIZE_BYTES;
}

pub(crate) trait GpuSerializable: GpuSerializationSize {
    fn serialize_into(&self, container: &mut GpuReadySerializationBuffer);
}
