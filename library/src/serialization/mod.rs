pub(crate) mod gpu_ready_serialization_buffer;
pub(crate) mod serializable_for_gpu;
pub(crate) mod single_quartet_writer;
