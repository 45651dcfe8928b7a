use crate::serialization::single_quartet_writer::SingleQuartetWriter;

pub(crate) const ELEMENTS_IN_QUARTET: usize = 4;
pub(crate) const QUARTET_ELEMENT_SIZE_BYTES: usize = size_of::<f32>();
pub(crate) const QUARTET_SIZE_BYTES: usize = QUARTET_ELEMENT_SIZE_BYTES * ELEMENTS_IN_QUARTET;

// The shading unit reads vec3 slots as 16 byte groups; the fourth word must be deterministic.
pub(crate) const DEFAULT_PAD_VALUE: f32 = 0.0;

/// Little-endian byte storage for a sequence of fixed-stride records,
/// each one made of a whole number of 16 byte quartets.
pub(crate) struct GpuReadySerializationBuffer {
    backend: Vec<u8>,
    write_pointer: usize,
    quartets_per_object: usize,
}

impl GpuReadySerializationBuffer {
    #[must_use]
    pub(crate) fn new(objects_count: usize, quartets_per_object: usize) -> Self {
        assert!(quartets_per_object > 0);
        Self {
            backend: vec![0; Self::backend_size_bytes(objects_count, quartets_per_object)],
            write_pointer: 0,
            quartets_per_object,
        }
    }

    #[must_use]
    pub(crate) fn make_filled(objects_count: usize, quartets_per_object: usize, filler: f32) -> Self {
        let mut result = Self::new(objects_count, quartets_per_object);
        while result.has_free_slot() {
            result.write_quartet_f32(filler, filler, filler, filler);
        }
        result
    }

    #[must_use]
    pub(crate) fn total_slots_count(&self) -> usize {
        self.backend.len() / self.bytes_per_object()
    }

    #[must_use]
    fn backend_size_bytes(objects_count: usize, quartets_per_object: usize) -> usize {
        objects_count * quartets_per_object * QUARTET_SIZE_BYTES
    }

    #[must_use]
    pub(crate) fn bytes_per_object(&self) -> usize {
        self.quartets_per_object * QUARTET_SIZE_BYTES
    }

    #[must_use]
    pub(crate) fn free_quartets_of_current_object(&self) -> usize {
        let object_start = self.write_pointer - self.write_pointer % self.bytes_per_object();
        let object_end = object_start + self.bytes_per_object();
        (object_end - self.write_pointer) / QUARTET_SIZE_BYTES
    }

    #[must_use]
    pub(crate) fn object_fully_written(&self) -> bool {
        0 < self.write_pointer && (0 == self.write_pointer % self.bytes_per_object())
    }

    #[must_use]
    pub(crate) fn fully_written(&self) -> bool {
        self.write_pointer == self.backend.len()
    }

    #[must_use]
    pub(crate) fn has_free_slot(&self) -> bool {
        ! self.fully_written()
    }

    #[must_use]
    pub(crate) fn backend(&self) -> &[u8] {
        assert!(self.fully_written(), "buffer has not been filled");
        &self.backend
    }

    #[must_use]
    pub(crate) fn into_backend(self) -> Vec<u8> {
        assert!(self.fully_written(), "buffer has not been filled");
        self.backend
    }

    pub(crate) fn write_quartet_f32(&mut self, x: f32, y: f32, z: f32, w: f32) {
        self.write_quartet(|writer| {
            writer.write_float_32(x).write_float_32(y).write_float_32(z).write_float_32(w);
        });
    }

    pub(crate) fn write_padded_quartet_f32(&mut self, x: f32, y: f32, z: f32) {
        self.write_quartet_f32(x, y, z, DEFAULT_PAD_VALUE);
    }

    pub(crate) fn write_quartet<WritingCode>(&mut self, execute_writing: WritingCode)
    where
        WritingCode: FnOnce(&mut SingleQuartetWriter),
    {
        assert!(self.has_free_slot(), "buffer overflow");
        {
            let mut writer = SingleQuartetWriter::new(&mut self.backend, self.write_pointer);
            execute_writing(&mut writer);
        }
        self.write_pointer += QUARTET_SIZE_BYTES;
    }
}
