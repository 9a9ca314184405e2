//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce budget
//! - Gamma correction
//! - Anti-aliasing via jittered multi-sampling
//!
//! Every pixel draws from its own generator, seeded from the render seed and
//! the pixel's position in the output, so the image doesn't depend on how
//! rows are split between threads.

use glint_math::{gen_f32, Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::{Camera, Hittable, Progress};

/// Rays start this far along their direction, so a scattered ray does not
/// re-hit the surface it just left because of rounding.
pub const T_MIN: f32 = 0.001;

const WHITE: Color = Color::ONE;
const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Number of row ranges (and worker threads) for tiled rendering
    pub tiles: usize,
    /// Base seed for the per-pixel generators
    pub seed: u64,
    /// Jitter samples within the pixel; when false every sample hits the pixel corner
    pub jitter: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            tiles: std::thread::available_parallelism().map_or(4, |n| n.get()),
            seed: 0,
            jitter: true,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set the number of tiles rendered in parallel.
    pub fn with_tiles(mut self, tiles: usize) -> Self {
        self.tiles = tiles;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Image height matching `width` at the given aspect ratio (at least 1).
    pub fn height_for_aspect(width: u32, aspect_ratio: f32) -> u32 {
        ((width as f32 / aspect_ratio) as u32).max(1)
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in each surface's
/// attenuation. Running out of bounces means no more light is gathered.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    match world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) {
        Some(rec) => match rec.material.scatter(ray, &rec, rng) {
            Some(result) => {
                result.attenuation * ray_color(&result.scattered, world, depth - 1, rng)
            }
            None => Color::ZERO,
        },
        None => sky_gradient(ray),
    }
}

/// Vertical white-to-blue gradient used as the only light source.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    (1.0 - t) * WHITE + t * SKY_BLUE
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Normalize a (possibly jittered) pixel coordinate to [0, 1].
#[inline]
fn plane_coord(x: f32, extent: u32) -> f32 {
    x / extent.saturating_sub(1).max(1) as f32
}

/// Render a single pixel with multi-sampling, returning the averaged linear color.
///
/// `(i, j)` are image-plane coordinates: `j = 0` is the bottom row.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if config.samples_per_pixel == 0 {
        return Color::ZERO;
    }

    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let (dx, dy) = if config.jitter {
            (gen_f32(rng), gen_f32(rng))
        } else {
            (0.0, 0.0)
        };
        let s = plane_coord(i as f32 + dx, config.image_width);
        let t = plane_coord(j as f32 + dy, config.image_height);

        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Generator for the pixel at `index` in output (raster) order.
pub fn pixel_rng(seed: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(index)))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Render one output row (row 0 is the top of the image) to 8-bit RGB.
pub fn render_row(
    camera: &Camera,
    world: &dyn Hittable,
    row: u32,
    config: &RenderConfig,
) -> Vec<[u8; 3]> {
    // Output rows run top to bottom, image-plane rows bottom to top.
    let j = config.image_height - 1 - row;
    let first_index = row as u64 * config.image_width as u64;

    (0..config.image_width)
        .map(|i| {
            let mut rng = pixel_rng(config.seed, first_index + i as u64);
            color_to_rgb(render_pixel(camera, world, i, j, config, &mut rng))
        })
        .collect()
}

/// Number of pixels in a `width` x `height` image, widened before multiplying.
pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Final 8-bit image in raster order (top row first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; pixel_count(width, height)],
        }
    }

    /// Get the pixel at (x, y), with y = 0 the top row.
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// Render the entire scene on the calling thread.
pub fn render_single_threaded(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> ImageBuffer {
    let mut pixels = Vec::with_capacity(pixel_count(config.image_width, config.image_height));

    let progress = Progress::new(config.image_height);

    for row in 0..config.image_height {
        pixels.extend(render_row(camera, world, row, config));
        progress.row_done();
    }

    ImageBuffer {
        width: config.image_width,
        height: config.image_height,
        pixels,
    }
}
