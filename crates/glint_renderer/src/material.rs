//! Materials describing how light scatters off a surface.
//!
//! `Material` is a closed enum over the three supported surface types, so
//! the per-bounce dispatch is a plain `match`. Spheres hold materials behind
//! an `Arc`, and any number of spheres may share one.

use glint_math::{gen_f32, random_in_unit_sphere, random_unit_vector, Color, Ray, Vec3, Vec3Ext};
use rand::RngCore;

use crate::hittable::HitRecord;

/// Outcome of a scatter event that was not absorbed.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel fraction of the incoming light that survives the bounce
    pub attenuation: Color,
    /// Continuation ray leaving the hit point
    pub scattered: Ray,
}

/// Surface material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => Some(m.scatter(rec, rng)),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => Some(m.scatter(ray_in, rec, rng)),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    /// Cosine-weighted scatter direction: normal plus a unit vector.
    ///
    /// Falls back to the normal when the two nearly cancel.
    pub fn scatter_direction(normal: Vec3, random_unit: Vec3) -> Vec3 {
        let direction = normal + random_unit;
        if direction.near_zero() {
            normal
        } else {
            direction
        }
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let direction = Self::scatter_direction(rec.normal, random_unit_vector(rng));
        ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, clamped to at most 1.0
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = ray_in.direction().normalize().reflect(rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the ray below the surface; treat that as absorbed.
        if direction.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, direction),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    /// Schlick's approximation for reflectance.
    pub fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
        {
            unit_direction.reflect(rec.normal)
        } else {
            unit_direction.refract(rec.normal, refraction_ratio)
        };

        ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> HitRecord<'a> {
        HitRecord::new(ray, t, outward_normal, material)
    }

    #[test]
    fn test_lambertian_degenerate_direction_falls_back_to_normal() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let direction = Lambertian::scatter_direction(normal, -normal);
        assert_eq!(direction, normal);
        assert!(direction.length() > 0.0);
    }

    #[test]
    fn test_lambertian_scatters_into_hemisphere() {
        let material = Material::from(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = record(&ray, 1.0, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.5, 0.5, 0.5));
            assert_eq!(result.scattered.origin(), rec.p);
            assert!(!result.scattered.direction().near_zero());
            // normal + unit vector never points below the tangent plane
            assert!(result.scattered.direction().dot(rec.normal) >= -1e-6);
        }
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, 0.3).fuzz(), 0.3);
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Material::from(Metal::new(Color::new(0.8, 0.8, 0.8), 0.0));
        let incoming = Vec3::new(1.0, -2.0, 0.5);
        let ray = Ray::new(Vec3::new(-1.0, 2.0, -0.5), incoming);
        let rec = record(&ray, 1.0, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(1);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        let out = result.scattered.direction();
        let unit_in = incoming.normalize();

        // Angle of incidence equals angle of reflection.
        assert!(((-unit_in).dot(rec.normal) - out.dot(rec.normal)).abs() < 1e-6);
        // Tangential component is preserved.
        let tangent_in = unit_in - unit_in.dot(rec.normal) * rec.normal;
        let tangent_out = out - out.dot(rec.normal) * rec.normal;
        assert!((tangent_in - tangent_out).length() < 1e-6);
        assert_eq!(result.attenuation, Color::new(0.8, 0.8, 0.8));
    }

    #[test]
    fn test_metal_absorbs_rays_pushed_into_surface() {
        // Grazing incidence with full fuzz: some perturbed rays end up below the surface.
        let material = Material::from(Metal::new(Color::ONE, 1.0));
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = record(&ray, 1.0, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(9);

        let mut absorbed = 0;
        for _ in 0..1000 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_unit_ior_passes_straight_through() {
        let material = Material::from(Dielectric::new(1.0));
        let direction = Vec3::new(0.0, 0.0, -2.0);
        let ray = Ray::new(Vec3::ZERO, direction);
        let rec = record(&ray, 0.5, Vec3::Z, &material);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(Dielectric::reflectance(1.0, 1.0), 0.0);
        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::ONE);
            assert!((result.scattered.direction() - direction.normalize()).length() < 1e-6);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at a grazing angle: 1.5 * sin(theta) > 1, must reflect.
        let material = Material::from(Dielectric::new(1.5));
        let ray = Ray::new(Vec3::new(-1.0, 0.2, 0.0), Vec3::new(1.0, -0.2, 0.0));
        // Outward normal points along the ray, so this is a back-face hit.
        let rec = record(&ray, 1.0, Vec3::NEG_Y, &material);
        assert!(!rec.front_face);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            let expected = ray.direction().normalize().reflect(rec.normal);
            assert!((result.scattered.direction() - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_schlick_reflectance() {
        // Normal incidence on glass: ((1 - 1.5) / 2.5)^2 = 0.04
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
        // Grazing incidence reflects everything.
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }
}
