//! Glint math - vectors, rays and sampling for the path tracer.
//!
//! `Vec3` comes straight from glam; this crate adds the handful of
//! operations glam doesn't have (near-zero test, reflect/refract) and the
//! rejection samplers used by the materials and the camera lens.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
pub mod sampling;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{
    gen_f32, gen_range_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
    random_vec3, random_vec3_range,
};
pub use vector::{Color, Point3, Vec3Ext, NEAR_ZERO_EPSILON};
