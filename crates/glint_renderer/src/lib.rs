//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes made of spheres, lit only by a sky
//! gradient. Diffuse, metal and glass materials; thin-lens depth of field;
//! rows split into tiles and rendered on a fixed pool of worker threads.

mod camera;
mod hittable;
mod material;
pub mod output;
mod renderer;
mod sphere;
mod tile;
mod world;

pub use camera::Camera;
pub use hittable::{Geometry, HitRecord, Hittable, Scene};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use output::{save_image, save_png, save_ppm, write_ppm, OutputError};
pub use renderer::{
    color_to_rgb, linear_to_gamma, pixel_rng, ray_color, render_pixel, render_row,
    render_single_threaded, sky_gradient, ImageBuffer, RenderConfig, T_MIN,
};
pub use sphere::Sphere;
pub use tile::{
    assemble, generate_tiles, render, render_tile, Progress, RenderError, Tile, TileResult,
};
pub use world::{build_scene, build_world};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Color, Interval, Point3, Ray, Vec3};
