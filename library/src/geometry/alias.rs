use cgmath::Point3;
use cgmath::Vector3;

pub type Point = Point3<f32>;
pub type Vector = Vector3<f32>;
