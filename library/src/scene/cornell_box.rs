use crate::error::TracerError;
use crate::scene::geometry_builder::GeometryBuilder;
use crate::scene::scene::Scene;

const WHITE_WALL: (f32, f32, f32) = (0.7, 0.7, 0.7);

/// Closed box with a red left wall, a green right wall, a metal and
/// a glass sphere, lit by a small ceiling panel.
pub fn cornell_box() -> Result<Scene, TracerError> {
    let (white_r, white_g, white_b) = WHITE_WALL;
    let builders = [
        GeometryBuilder::new().color(0.99, 0.3, 0.3).lambertian().plane_yz(-1.0, -1.0, -1.0, 2.0, 2.0),
        GeometryBuilder::new().color(0.3, 0.99, 0.3).lambertian().plane_yz(1.0, -1.0, -1.0, 2.0, 2.0),
        GeometryBuilder::new().color(white_r, white_g, white_b).lambertian().plane_xz(-1.0, -1.0, -1.0, 2.0, 2.0),
        GeometryBuilder::new().color(white_r, white_g, white_b).lambertian().plane_xz(-1.0, 1.0, -1.0, 2.0, 2.0),
        GeometryBuilder::new().color(white_r, white_g, white_b).lambertian().plane_xy(-1.0, -1.0, -1.0, 2.0, 2.0),
        GeometryBuilder::new().color(1.0, 1.0, 1.0).metal().sphere(0.5, -0.7, 0.2, 0.3),
        GeometryBuilder::new().color(1.0, 1.0, 1.0).glass_with_refractive_index(1.8).sphere(-0.3, -0.5, -0.3, 0.5),
        GeometryBuilder::new().light(20.0, 20.0, 20.0).lambertian().plane_xz(-0.2, 0.99, -0.2, 0.4, 0.4),
    ];

    let mut scene = Scene::new();
    for builder in builders {
        scene.add_built(builder)?;
    }
    Ok(scene)
}
