pub mod cornell_box;
pub mod geometry_builder;
pub mod geometry_record;
pub mod material_record;
pub mod primitive_index;
pub mod scene;
