use crate::error::TracerError;
use crate::geometry::alias::{Point, Vector};
use crate::scene::geometry_record::GeometryRecord;
use crate::scene::material_record::{Brdf, MaterialRecord};
use palette::Srgb;

/// A primitive together with its surface, as stored in a scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Geometry {
    record: GeometryRecord,
    material: MaterialRecord,
}

impl Geometry {
    #[must_use]
    pub fn new(record: GeometryRecord, material: MaterialRecord) -> Self {
        Self { record, material }
    }

    #[must_use]
    pub fn record(&self) -> &GeometryRecord {
        &self.record
    }

    #[must_use]
    pub fn material(&self) -> &MaterialRecord {
        &self.material
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
enum PendingShape {
    #[default]
    Unset,
    Sphere { center: Point, radius: f32 },
    Plane { corner: Point, edge_u: Vector, edge_v: Vector },
}

/// Fluent construction of a [`Geometry`]; shape validation happens in [`GeometryBuilder::build`].
#[derive(Copy, Clone, Debug)]
pub struct GeometryBuilder {
    shape: PendingShape,
    brdf: Brdf,
    fuzz: f32,
    refractive_index: f32,
    albedo: Srgb,
    emissive: bool,
}

impl Default for GeometryBuilder {
    #[must_use]
    fn default() -> Self {
        Self {
            shape: PendingShape::Unset,
            brdf: Brdf::Lambertian,
            fuzz: 0.0,
            refractive_index: 0.0,
            albedo: Srgb::new(0.0, 0.0, 0.0),
            emissive: false,
        }
    }
}

impl GeometryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.albedo = Srgb::new(r, g, b);
        self.emissive = false;
        self
    }

    /// Turns the surface into a Lambertian emitter. At least one channel must
    /// exceed [`MaterialRecord::EMISSION_THRESHOLD`]; [`GeometryBuilder::build`] checks it.
    #[must_use]
    pub fn light(mut self, r: f32, g: f32, b: f32) -> Self {
        self.albedo = Srgb::new(r, g, b);
        self.brdf = Brdf::Lambertian;
        self.emissive = true;
        self
    }

    #[must_use]
    pub fn lambertian(mut self) -> Self {
        self.brdf = Brdf::Lambertian;
        self
    }

    #[must_use]
    pub fn metal(self) -> Self {
        self.metal_with_fuzz(MaterialRecord::DEFAULT_FUZZ)
    }

    #[must_use]
    pub fn metal_with_fuzz(mut self, fuzz: f32) -> Self {
        self.brdf = Brdf::Metal;
        self.fuzz = fuzz;
        self
    }

    #[must_use]
    pub fn glass(self) -> Self {
        self.glass_with_refractive_index(MaterialRecord::DEFAULT_REFRACTIVE_INDEX)
    }

    #[must_use]
    pub fn glass_with_refractive_index(mut self, refractive_index: f32) -> Self {
        self.brdf = Brdf::Glass;
        self.refractive_index = refractive_index;
        self
    }

    #[must_use]
    pub fn sphere(mut self, x: f32, y: f32, z: f32, radius: f32) -> Self {
        self.shape = PendingShape::Sphere { center: Point::new(x, y, z), radius };
        self
    }

    #[must_use]
    pub fn plane(mut self, corner: Point, edge_u: Vector, edge_v: Vector) -> Self {
        self.shape = PendingShape::Plane { corner, edge_u, edge_v };
        self
    }

    #[must_use]
    pub fn plane_xy(self, x: f32, y: f32, z: f32, extent_x: f32, extent_y: f32) -> Self {
        self.plane(Point::new(x, y, z), Vector::new(extent_x, 0.0, 0.0), Vector::new(0.0, extent_y, 0.0))
    }

    #[must_use]
    pub fn plane_xz(self, x: f32, y: f32, z: f32, extent_x: f32, extent_z: f32) -> Self {
        self.plane(Point::new(x, y, z), Vector::new(extent_x, 0.0, 0.0), Vector::new(0.0, 0.0, extent_z))
    }

    #[must_use]
    pub fn plane_yz(self, x: f32, y: f32, z: f32, extent_y: f32, extent_z: f32) -> Self {
        self.plane(Point::new(x, y, z), Vector::new(0.0, extent_y, 0.0), Vector::new(0.0, 0.0, extent_z))
    }

    pub fn build(self) -> Result<Geometry, TracerError> {
        let record = match self.shape {
            PendingShape::Unset => return Err(TracerError::invalid_geometry("no shape was specified")),
            PendingShape::Sphere { center, radius } => GeometryRecord::sphere(center, radius)?,
            PendingShape::Plane { corner, edge_u, edge_v } => GeometryRecord::plane(corner, edge_u, edge_v)?,
        };
        Ok(Geometry::new(record, self.material()?))
    }

    fn material(&self) -> Result<MaterialRecord, TracerError> {
        match self.brdf {
            Brdf::Lambertian if self.emissive => MaterialRecord::light(self.albedo),
            Brdf::Lambertian => Ok(MaterialRecord::lambertian(self.albedo)),
            Brdf::Metal => MaterialRecord::metal(self.albedo, self.fuzz),
            Brdf::Glass => MaterialRecord::glass(self.albedo, self.refractive_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::geometry_record::Shape;

    #[test]
    fn test_build_metal_sphere() {
        let system_under_test = GeometryBuilder::new()
            .color(1.0, 1.0, 1.0)
            .metal()
            .sphere(0.5, -0.7, 0.2, 0.3);

        let geometry = system_under_test.build().unwrap();

        assert_eq!(geometry.record().shape(), Shape::Sphere);
        assert_eq!(geometry.record().v0(), Vector::new(0.5, -0.7, 0.2));
        assert_eq!(geometry.material().brdf(), Brdf::Metal);
        assert_eq!(geometry.material().fuzz(), 0.0);
    }

    #[test]
    fn test_last_material_mode_wins_and_clears_others() {
        let system_under_test = GeometryBuilder::new()
            .metal_with_fuzz(0.4)
            .glass_with_refractive_index(1.8)
            .plane_xz(-0.2, 0.99, -0.2, 0.4, 0.4);

        let material = *system_under_test.build().unwrap().material();

        assert_eq!(material.brdf(), Brdf::Glass);
        assert_eq!(material.refractive_index(), 1.8);
        assert_eq!(material.fuzz(), 0.0);
    }

    #[test]
    fn test_glass_default_refractive_index() {
        let geometry = GeometryBuilder::new().glass().sphere(0.0, 0.0, 0.0, 1.0).build().unwrap();
        assert_eq!(geometry.material().refractive_index(), MaterialRecord::DEFAULT_REFRACTIVE_INDEX);
    }

    #[test]
    fn test_light_is_lambertian_with_intensity() {
        let geometry = GeometryBuilder::new()
            .light(20.0, 20.0, 20.0)
            .lambertian()
            .plane_xz(-0.2, 0.99, -0.2, 0.4, 0.4)
            .build()
            .unwrap();

        assert_eq!(*geometry.material(), MaterialRecord::light(Srgb::new(20.0, 20.0, 20.0)).unwrap());
    }

    #[test]
    fn test_dim_light_fails() {
        let actual = GeometryBuilder::new().light(1.0, 1.0, 1.0).plane_xz(-0.2, 0.99, -0.2, 0.4, 0.4).build();
        assert!(matches!(actual, Err(TracerError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_color_after_light_is_plain_diffuse() {
        let geometry = GeometryBuilder::new()
            .light(20.0, 20.0, 20.0)
            .color(0.5, 0.5, 0.5)
            .sphere(0.0, 0.0, 0.0, 1.0)
            .build()
            .unwrap();

        assert!(!geometry.material().is_emissive());
    }

    #[test]
    fn test_build_without_shape_fails() {
        let actual = GeometryBuilder::new().color(0.7, 0.7, 0.7).build();
        assert!(matches!(actual, Err(TracerError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_build_zero_radius_sphere_fails() {
        let actual = GeometryBuilder::new().sphere(0.0, 0.0, 0.0, 0.0).build();
        assert!(matches!(actual, Err(TracerError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_build_is_repeatable() {
        let system_under_test = GeometryBuilder::new().color(0.3, 0.99, 0.3).plane_yz(1.0, -1.0, -1.0, 2.0, 2.0);
        assert_eq!(system_under_test.build().unwrap(), system_under_test.build().unwrap());
    }
}
