use crate::error::{check_buffer_size, TracerError};
use crate::scene::geometry_builder::{Geometry, GeometryBuilder};
use crate::scene::geometry_record::{GeometryRecord, PrimitiveRecord};
use crate::scene::material_record::MaterialRecord;
use crate::scene::primitive_index::PrimitiveIndex;
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::{GpuSerializable, GpuSerializationSize};
use log::debug;

pub const PRIMITIVE_RECORD_SIZE_BYTES: usize = PrimitiveRecord::<'static>::SERIALIZED_SIZE_BYTES;
pub const MATERIAL_RECORD_SIZE_BYTES: usize = MaterialRecord::SERIALIZED_SIZE_BYTES;

/// Ordered primitives of a scene. Insertion order is the identifier order
/// seen by the shading unit.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    geometries: Vec<Geometry>,
}

/// The two parallel GPU arrays produced from a [`Scene`].
#[derive(Clone, Debug, PartialEq)]
pub struct SerializedScene {
    primitives: Vec<u8>,
    materials: Vec<u8>,
    primitive_count: u32,
}

impl SerializedScene {
    #[must_use]
    pub fn primitives(&self) -> &[u8] {
        &self.primitives
    }

    #[must_use]
    pub fn materials(&self) -> &[u8] {
        &self.materials
    }

    #[must_use]
    pub fn primitive_count(&self) -> u32 {
        self.primitive_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        0 == self.primitive_count
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: GeometryRecord, material: MaterialRecord) -> PrimitiveIndex {
        self.add_geometry(Geometry::new(record, material))
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> PrimitiveIndex {
        let index = PrimitiveIndex::from(self.geometries.len());
        self.geometries.push(geometry);
        index
    }

    pub fn add_all<Geometries>(&mut self, geometries: Geometries)
    where
        Geometries: IntoIterator<Item = Geometry>,
    {
        for geometry in geometries {
            self.add_geometry(geometry);
        }
    }

    /// Validates the builder first; a failed build leaves the scene untouched.
    pub fn add_built(&mut self, builder: GeometryBuilder) -> Result<PrimitiveIndex, TracerError> {
        let geometry = builder.build()?;
        Ok(self.add_geometry(geometry))
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.geometries.len()
    }

    #[must_use]
    pub fn geometry(&self, index: PrimitiveIndex) -> Option<&Geometry> {
        self.geometries.get(index.as_u32() as usize)
    }

    pub fn build(&self) -> Result<SerializedScene, TracerError> {
        let count = self.geometries.len();

        let mut primitives = GpuReadySerializationBuffer::new(count, PrimitiveRecord::SERIALIZED_QUARTET_COUNT);
        let mut materials = GpuReadySerializationBuffer::new(count, MaterialRecord::SERIALIZED_QUARTET_COUNT);

        for (index, geometry) in self.geometries.iter().enumerate() {
            PrimitiveRecord::new(PrimitiveIndex::from(index), geometry.record()).serialize_into(&mut primitives);
            geometry.material().serialize_into(&mut materials);
        }

        debug_assert_eq!(primitives.total_slots_count(), count);
        debug_assert_eq!(materials.total_slots_count(), count);

        let primitives = primitives.into_backend();
        let materials = materials.into_backend();

        check_buffer_size("primitives", primitives.len(), PRIMITIVE_RECORD_SIZE_BYTES, count)?;
        check_buffer_size("materials", materials.len(), MATERIAL_RECORD_SIZE_BYTES, count)?;

        debug!("serialized {} primitives into {} + {} bytes", count, primitives.len(), materials.len());

        Ok(SerializedScene { primitives, materials, primitive_count: count as u32 })
    }
}
