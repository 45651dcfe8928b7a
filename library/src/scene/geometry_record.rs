use crate::error::TracerError;
use crate::geometry::alias::{Point, Vector};
use crate::geometry::epsilon::DEFAULT_EPSILON_F32;
use crate::scene::primitive_index::PrimitiveIndex;
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::{GpuSerializable, GpuSerializationSize};
use cgmath::{EuclideanSpace, InnerSpace, Zero};
use num_enum::IntoPrimitive;
use strum_macros::{EnumCount, EnumIter};

#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, IntoPrimitive, EnumCount, EnumIter)]
pub enum Shape {
    Sphere = 0,
    Plane = 1,
}

/// Shape-dependent triple of vectors:
/// sphere keeps its center in `v0` and radius in `v1.x`;
/// plane keeps its corner in `v0` and edges in `v1` and `v2`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeometryRecord {
    shape: Shape,
    v0: Vector,
    v1: Vector,
    v2: Vector,
}

impl GeometryRecord {
    pub fn sphere(center: Point, radius: f32) -> Result<Self, TracerError> {
        check_finite_point(center, "sphere center")?;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(TracerError::invalid_geometry(format!("sphere radius must be positive and finite, got {radius}")));
        }
        Ok(Self {
            shape: Shape::Sphere,
            v0: center.to_vec(),
            v1: Vector::new(radius, 0.0, 0.0),
            v2: Vector::zero(),
        })
    }

    pub fn plane(corner: Point, edge_u: Vector, edge_v: Vector) -> Result<Self, TracerError> {
        check_finite_point(corner, "plane corner")?;
        check_finite_vector(edge_u, "plane edge")?;
        check_finite_vector(edge_v, "plane edge")?;

        let spanned_area = edge_u.cross(edge_v).magnitude();
        if spanned_area <= DEFAULT_EPSILON_F32 {
            return Err(TracerError::invalid_geometry(format!("plane edges {edge_u:?} and {edge_v:?} span no area")));
        }
        Ok(Self {
            shape: Shape::Plane,
            v0: corner.to_vec(),
            v1: edge_u,
            v2: edge_v,
        })
    }

    pub fn plane_xy(corner: Point, extent_x: f32, extent_y: f32) -> Result<Self, TracerError> {
        Self::plane(corner, Vector::new(extent_x, 0.0, 0.0), Vector::new(0.0, extent_y, 0.0))
    }

    pub fn plane_xz(corner: Point, extent_x: f32, extent_z: f32) -> Result<Self, TracerError> {
        Self::plane(corner, Vector::new(extent_x, 0.0, 0.0), Vector::new(0.0, 0.0, extent_z))
    }

    pub fn plane_yz(corner: Point, extent_y: f32, extent_z: f32) -> Result<Self, TracerError> {
        Self::plane(corner, Vector::new(0.0, extent_y, 0.0), Vector::new(0.0, 0.0, extent_z))
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn v0(&self) -> Vector {
        self.v0
    }

    #[must_use]
    pub fn v1(&self) -> Vector {
        self.v1
    }

    #[must_use]
    pub fn v2(&self) -> Vector {
        self.v2
    }
}

fn check_finite_point(point: Point, what: &str) -> Result<(), TracerError> {
    check_finite_vector(point.to_vec(), what)
}

fn check_finite_vector(vector: Vector, what: &str) -> Result<(), TracerError> {
    if vector.x.is_finite() && vector.y.is_finite() && vector.z.is_finite() {
        Ok(())
    } else {
        Err(TracerError::invalid_geometry(format!("{what} has non-finite components: {vector:?}")))
    }
}

/// A geometry record paired with the index it occupies in the scene.
pub(crate) struct PrimitiveRecord<'a> {
    index: PrimitiveIndex,
    geometry: &'a GeometryRecord,
}

impl<'a> PrimitiveRecord<'a> {
    #[must_use]
    pub(crate) fn new(index: PrimitiveIndex, geometry: &'a GeometryRecord) -> Self {
        Self { index, geometry }
    }
}

impl GpuSerializationSize for PrimitiveRecord<'_> {
    const SERIALIZED_QUARTET_COUNT: usize = 4;
}

impl GpuSerializable for PrimitiveRecord<'_> {
    fn serialize_into(&self, container: &mut GpuReadySerializationBuffer) {
        debug_assert!(container.free_quartets_of_current_object() >= Self::SERIALIZED_QUARTET_COUNT, "buffer overflow");

        // word 0 is the primitive id, word 2 its material slot; both equal the scene index
        container.write_quartet(|writer| {
            writer
                .write_unsigned(self.index.as_u32())
                .write_unsigned(self.geometry.shape.into())
                .write_unsigned(self.index.as_u32());
        });

        let geometry = self.geometry;
        container.write_padded_quartet_f32(geometry.v0.x, geometry.v0.y, geometry.v0.z);
        container.write_padded_quartet_f32(geometry.v1.x, geometry.v1.y, geometry.v1.z);
        container.write_padded_quartet_f32(geometry.v2.x, geometry.v2.y, geometry.v2.z);

        debug_assert!(container.object_fully_written());
    }
}
