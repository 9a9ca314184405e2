//! Built-in scenes.
//!
//! `demo` is a small hand-placed scene for quick renders. `random_spheres` is
//! the classic cover image: a large ground sphere, a 22x22 grid of small
//! randomly-jittered spheres and three large feature spheres.

use glint_math::{gen_f32, gen_range_f32, random_vec3, random_vec3_range, Color, Point3, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::scene::{CameraSettings, MaterialDesc, SceneDescription, SphereDesc};

/// Half extent of the small-sphere grid.
const GRID_HALF: i32 = 11;

/// Small spheres this close to the big metal sphere are dropped.
const CLEARANCE: f32 = 0.9;

/// Ground plus a diffuse, a hollow glass and a metal sphere.
pub fn demo() -> SceneDescription {
    let look_from = Point3::new(3.0, 3.0, 2.0);
    let look_at = Point3::new(0.0, 0.0, -1.0);
    let camera = CameraSettings::default()
        .with_position(look_from, look_at, Vec3::Y)
        .with_view(20.0, 16.0 / 9.0)
        .with_lens(0.2, (look_from - look_at).length());

    let mut scene = SceneDescription::new(camera);
    scene.add_material(
        "ground",
        MaterialDesc::Lambertian {
            albedo: Color::new(0.8, 0.8, 0.0),
        },
    );
    scene.add_material(
        "center",
        MaterialDesc::Lambertian {
            albedo: Color::new(0.1, 0.2, 0.5),
        },
    );
    scene.add_material("glass", MaterialDesc::Dielectric { ior: 1.5 });
    scene.add_material(
        "gold",
        MaterialDesc::Metal {
            albedo: Color::new(0.8, 0.6, 0.2),
            fuzz: 0.0,
        },
    );

    scene.add_sphere(SphereDesc::new(Point3::new(0.0, -100.5, -1.0), 100.0, "ground"));
    scene.add_sphere(SphereDesc::new(Point3::new(0.0, 0.0, -1.0), 0.5, "center"));
    // Outer and inner shell share one glass material.
    scene.add_sphere(SphereDesc::new(Point3::new(-1.0, 0.0, -1.0), 0.5, "glass"));
    scene.add_sphere(SphereDesc::new(Point3::new(-1.0, 0.0, -1.0), -0.4, "glass"));
    scene.add_sphere(SphereDesc::new(Point3::new(1.0, 0.0, -1.0), 0.5, "gold"));

    scene
}

/// The random-spheres cover scene.
///
/// Each grid row draws from its own generator seeded from `seed` and the row
/// index, so rows are built in parallel and the result depends only on `seed`.
pub fn random_spheres(seed: u64) -> SceneDescription {
    let camera = CameraSettings::default()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_view(20.0, 3.0 / 2.0)
        .with_lens(0.1, 10.0);

    let mut scene = SceneDescription::new(camera);
    scene.add_material(
        "ground",
        MaterialDesc::Lambertian {
            albedo: Color::new(0.5, 0.5, 0.5),
        },
    );
    scene.add_material("glass", MaterialDesc::Dielectric { ior: 1.5 });
    scene.add_sphere(SphereDesc::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, "ground"));

    let rows: Vec<Vec<SphereDesc>> = (-GRID_HALF..GRID_HALF)
        .into_par_iter()
        .map(|a| grid_row(seed, a))
        .collect();
    scene.spheres.extend(rows.into_iter().flatten());

    scene.add_sphere(SphereDesc::new(Point3::new(0.0, 1.0, 0.0), 1.0, "glass"));
    scene.add_sphere(SphereDesc::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        MaterialDesc::Lambertian {
            albedo: Color::new(0.4, 0.2, 0.1),
        },
    ));
    scene.add_sphere(SphereDesc::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        MaterialDesc::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    ));

    log::debug!("Built random spheres scene: {} spheres", scene.spheres.len());
    scene
}

/// Small spheres for grid row `a`.
fn grid_row(seed: u64, a: i32) -> Vec<SphereDesc> {
    let mut rng = StdRng::seed_from_u64(row_seed(seed, a));
    let mut spheres = Vec::new();

    for b in -GRID_HALF..GRID_HALF {
        let choose_mat = gen_f32(&mut rng);
        let center = Point3::new(
            a as f32 + 0.9 * gen_f32(&mut rng),
            0.2,
            b as f32 + 0.9 * gen_f32(&mut rng),
        );

        if (center - Point3::new(4.0, 0.2, 0.0)).length() <= CLEARANCE {
            continue;
        }

        if choose_mat < 0.8 {
            let albedo = random_vec3(&mut rng) * random_vec3(&mut rng);
            spheres.push(SphereDesc::new(center, 0.2, MaterialDesc::Lambertian { albedo }));
        } else if choose_mat < 0.95 {
            let albedo = random_vec3_range(&mut rng, 0.5, 1.0);
            let fuzz = gen_range_f32(&mut rng, 0.0, 0.5);
            spheres.push(SphereDesc::new(center, 0.2, MaterialDesc::Metal { albedo, fuzz }));
        } else {
            spheres.push(SphereDesc::new(center, 0.2, "glass"));
        }
    }

    spheres
}

fn row_seed(seed: u64, row: i32) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ (row as i64 as u64).wrapping_add(0x632B_E59B_D9B4_E019)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MaterialRef;

    #[test]
    fn test_demo_is_valid() {
        let scene = demo();
        assert!(scene.validate().is_ok());
        assert_eq!(scene.spheres.len(), 5);
        assert_eq!(scene.spheres[2].material, scene.spheres[3].material);
    }

    #[test]
    fn test_random_spheres_is_valid() {
        let scene = random_spheres(7);
        assert!(scene.validate().is_ok());

        // Ground + up to 22*22 small spheres + 3 feature spheres
        assert!(scene.spheres.len() > 4);
        assert!(scene.spheres.len() <= 1 + 22 * 22 + 3);
    }

    #[test]
    fn test_random_spheres_is_deterministic() {
        assert_eq!(random_spheres(7), random_spheres(7));
        assert_ne!(random_spheres(7), random_spheres(8));
    }

    #[test]
    fn test_small_spheres_keep_clear_of_metal_sphere() {
        let scene = random_spheres(3);
        let small = scene.spheres.iter().filter(|s| s.radius == 0.2);
        for sphere in small {
            assert!((sphere.center - Point3::new(4.0, 0.2, 0.0)).length() > CLEARANCE);
            assert_eq!(sphere.center.y, 0.2);
        }
    }

    #[test]
    fn test_random_materials_in_range() {
        let scene = random_spheres(11);
        for sphere in &scene.spheres {
            match &sphere.material {
                MaterialRef::Inline(MaterialDesc::Metal { albedo, fuzz }) => {
                    assert!(albedo.min_element() >= 0.5);
                    assert!((0.0..0.5).contains(fuzz));
                }
                MaterialRef::Inline(MaterialDesc::Lambertian { albedo }) => {
                    assert!(albedo.max_element() < 1.0);
                }
                _ => {}
            }
        }
    }
}
