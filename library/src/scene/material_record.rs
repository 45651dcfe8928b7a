use crate::error::TracerError;
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::{GpuSerializable, GpuSerializationSize};
use num_enum::IntoPrimitive;
use palette::Srgb;
use strum_macros::{EnumCount, EnumIter};

#[repr(u32)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, IntoPrimitive, EnumCount, EnumIter)]
pub enum Brdf {
    #[default]
    Lambertian = 0,
    Metal = 1,
    Glass = 2,
}

/// Surface description of one primitive. Only the numeric field of the
/// active [`Brdf`] is meaningful; the others are kept at zero.
///
/// Emissive surfaces are Lambertian records whose `albedo` carries the
/// radiant intensity instead of a reflectance: the shading unit treats any
/// albedo channel above [`MaterialRecord::EMISSION_THRESHOLD`] as emission.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialRecord {
    brdf: Brdf,
    fuzz: f32,
    refractive_index: f32,
    albedo: Srgb,
}

impl MaterialRecord {
    pub const DEFAULT_FUZZ: f32 = 0.0;
    pub const DEFAULT_REFRACTIVE_INDEX: f32 = 1.5;
    pub const EMISSION_THRESHOLD: f32 = 1.0;

    #[must_use]
    pub fn lambertian(albedo: Srgb) -> Self {
        Self { brdf: Brdf::Lambertian, fuzz: 0.0, refractive_index: 0.0, albedo }
    }

    pub fn metal(albedo: Srgb, fuzz: f32) -> Result<Self, TracerError> {
        if !fuzz.is_finite() || fuzz < 0.0 {
            return Err(TracerError::invalid_geometry(format!("metal fuzz must be finite and non-negative, got {fuzz}")));
        }
        Ok(Self { brdf: Brdf::Metal, fuzz, refractive_index: 0.0, albedo })
    }

    /// Zero refractive index marks a non-glass record, so glass needs a positive one.
    pub fn glass(albedo: Srgb, refractive_index: f32) -> Result<Self, TracerError> {
        if !refractive_index.is_finite() || refractive_index <= 0.0 {
            return Err(TracerError::invalid_geometry(format!("refractive index must be finite and positive, got {refractive_index}")));
        }
        Ok(Self { brdf: Brdf::Glass, fuzz: 0.0, refractive_index, albedo })
    }

    /// An intensity that does not exceed the emission threshold in any
    /// channel would be shaded as a plain diffuse surface, so it is rejected.
    pub fn light(intensity: Srgb) -> Result<Self, TracerError> {
        let (red, green, blue) = intensity.into_components();
        if ![red, green, blue].iter().all(|channel| channel.is_finite()) {
            return Err(TracerError::invalid_geometry(format!("light intensity must be finite, got {intensity:?}")));
        }
        if red.max(green).max(blue) <= Self::EMISSION_THRESHOLD {
            return Err(TracerError::invalid_geometry(format!(
                "light intensity must exceed {} in some channel, got {intensity:?}", Self::EMISSION_THRESHOLD)));
        }
        Ok(Self::lambertian(intensity))
    }

    #[must_use]
    pub fn is_emissive(&self) -> bool {
        Brdf::Lambertian == self.brdf && self.albedo.red.max(self.albedo.green).max(self.albedo.blue) > Self::EMISSION_THRESHOLD
    }

    #[must_use]
    pub fn brdf(&self) -> Brdf {
        self.brdf
    }

    #[must_use]
    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    #[must_use]
    pub fn refractive_index(&self) -> f32 {
        self.refractive_index
    }

    #[must_use]
    pub fn albedo(&self) -> Srgb {
        self.albedo
    }
}

impl Default for MaterialRecord {
    #[must_use]
    fn default() -> Self {
        Self::lambertian(Srgb::new(0.0, 0.0, 0.0))
    }
}

impl GpuSerializationSize for MaterialRecord {
    const SERIALIZED_QUARTET_COUNT: usize = 2;
}

impl GpuSerializable for MaterialRecord {
    fn serialize_into(&self, container: &mut GpuReadySerializationBuffer) {
        debug_assert!(container.free_quartets_of_current_object() >= Self::SERIALIZED_QUARTET_COUNT, "buffer overflow");

        container.write_quartet(|writer| {
            writer
                .write_unsigned(self.brdf.into())
                .write_float_32(self.fuzz)
                .write_float_32(self.refractive_index);
        });
        container.write_padded_quartet_f32(self.albedo.red, self.albedo.green, self.albedo.blue);

        debug_assert!(container.object_fully_written());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::{EnumCount, IntoEnumIterator};

    #[must_use]
    fn serialize(material: &MaterialRecord) -> Vec<u8> {
        let mut container = GpuReadySerializationBuffer::new(1, MaterialRecord::SERIALIZED_QUARTET_COUNT);
        material.serialize_into(&mut container);
        container.into_backend()
    }

    #[must_use]
    fn float_at(bytes: &[u8], offset: usize) -> f32 {
        f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_glass_layout() {
        let system_under_test = MaterialRecord::glass(Srgb::new(0.25, 0.5, 0.75), 1.8).unwrap();

        let bytes = serialize(&system_under_test);

        assert_eq!(bytes.len(), 32);
        assert_eq!(u32::from_le_bytes(bytes[0..4].try_into().unwrap()), 2);
        assert_eq!(float_at(&bytes, 4), 0.0);
        assert_eq!(float_at(&bytes, 8), 1.8);
        assert_eq!(&bytes[12..16], &[0; 4]);
        assert_eq!(float_at(&bytes, 16), 0.25);
        assert_eq!(float_at(&bytes, 20), 0.5);
        assert_eq!(float_at(&bytes, 24), 0.75);
        assert_eq!(&bytes[28..32], &[0; 4]);
    }

    #[test]
    fn test_metal_keeps_refractive_index_zero() {
        let system_under_test = MaterialRecord::metal(Srgb::new(1.0, 1.0, 1.0), 0.3).unwrap();

        let bytes = serialize(&system_under_test);

        assert_eq!(u32::from_le_bytes(bytes[0..4].try_into().unwrap()), 1);
        assert_eq!(float_at(&bytes, 4), 0.3);
        assert_eq!(float_at(&bytes, 8), 0.0);
    }

    #[test]
    fn test_light_overloads_albedo_with_intensity() {
        let system_under_test = MaterialRecord::light(Srgb::new(20.0, 20.0, 20.0)).unwrap();

        assert!(system_under_test.is_emissive());
        assert_eq!(system_under_test.brdf(), Brdf::Lambertian);
        assert_eq!(system_under_test.fuzz(), 0.0);
        assert_eq!(system_under_test.refractive_index(), 0.0);
        assert_eq!(system_under_test.albedo(), Srgb::new(20.0, 20.0, 20.0));
    }

    #[test]
    fn test_brdf_discriminants_are_dense() {
        for (expected, system_under_test) in Brdf::iter().enumerate() {
            let actual: u32 = system_under_test.into();
            assert_eq!(actual as usize, expected);
        }
        assert_eq!(Brdf::COUNT, 3);
    }

    #[test]
    fn test_material_default() {
        let system_under_test = MaterialRecord::default();

        assert_eq!(system_under_test.brdf(), Brdf::Lambertian);
        assert_eq!(system_under_test.albedo(), Srgb::new(0.0, 0.0, 0.0));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.5)]
    #[case(f32::NAN)]
    #[case(f32::INFINITY)]
    fn test_glass_rejects_refractive_index(#[case] refractive_index: f32) {
        let actual = MaterialRecord::glass(Srgb::new(1.0, 1.0, 1.0), refractive_index);
        assert!(matches!(actual, Err(TracerError::InvalidGeometry { .. })));
    }

    #[rstest]
    #[case(-3.0)]
    #[case(f32::NAN)]
    #[case(f32::NEG_INFINITY)]
    fn test_metal_rejects_fuzz(#[case] fuzz: f32) {
        let actual = MaterialRecord::metal(Srgb::new(1.0, 1.0, 1.0), fuzz);
        assert!(matches!(actual, Err(TracerError::InvalidGeometry { .. })));
    }

    #[rstest]
    #[case(Srgb::new(1.0, 1.0, 1.0))]
    #[case(Srgb::new(0.5, 0.9, 0.2))]
    #[case(Srgb::new(f32::NAN, 4.0, 4.0))]
    #[case(Srgb::new(f32::INFINITY, 4.0, 4.0))]
    fn test_light_rejects_intensity_shaded_as_diffuse(#[case] intensity: Srgb) {
        let actual = MaterialRecord::light(intensity);
        assert!(matches!(actual, Err(TracerError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_light_accepts_single_bright_channel() {
        let system_under_test = MaterialRecord::light(Srgb::new(0.0, 1.5, 0.0)).unwrap();
        assert!(system_under_test.is_emissive());
    }

    #[test]
    fn test_reflective_albedo_is_not_emissive() {
        assert!(!MaterialRecord::lambertian(Srgb::new(1.0, 0.73, 0.73)).is_emissive());
        assert!(!MaterialRecord::metal(Srgb::new(2.0, 2.0, 2.0), 0.0).unwrap().is_emissive());
    }
}
