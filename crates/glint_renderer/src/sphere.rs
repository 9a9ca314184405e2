//! Sphere primitive for ray tracing.

use std::sync::Arc;

use glint_math::{Interval, Point3, Ray};

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};

/// A sphere primitive.
///
/// A negative radius is kept as-is: the outward normal flips, which turns
/// the sphere into the inner wall of a hollow shell.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn grey_sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(
            center,
            radius,
            Arc::new(Lambertian::new(Vec3::new(0.5, 0.5, 0.5)).into()),
        )
    }

    const RAY_T: Interval = Interval::new(0.001, f32::INFINITY);

    #[test]
    fn test_sphere_hit() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, RAY_T).is_none());
    }

    #[test]
    fn test_sphere_behind_ray_is_missed() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, 3.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, RAY_T).is_none());
    }

    #[test]
    fn test_ray_from_inside_hits_far_wall() {
        let sphere = grey_sphere(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-6);
    }

    #[test]
    fn test_tangent_ray_hits_once() {
        // Discriminant exactly zero: both roots coincide.
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -2.0), 1.0);
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_hit_points_lie_on_surface() {
        let mut rng = StdRng::seed_from_u64(42);
        let center = Vec3::new(0.5, -0.25, -3.0);
        let radius = 1.25;
        let sphere = grey_sphere(center, radius);

        let mut hits = 0;
        for _ in 0..1000 {
            let origin = Vec3::new(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
                rng.gen_range(0.0..2.0),
            );
            let target = center + Vec3::new(
                rng.gen_range(-1.5..1.5),
                rng.gen_range(-1.5..1.5),
                rng.gen_range(-1.5..1.5),
            );
            let ray = Ray::new(origin, (target - origin) * rng.gen_range(0.1f32..3.0));

            if let Some(rec) = sphere.hit(&ray, RAY_T) {
                hits += 1;
                let distance = (ray.at(rec.t) - center).length();
                assert!((distance - radius).abs() < 1e-3, "distance = {distance}");
                assert!(ray.direction().dot(rec.normal) <= 0.0);
            }
        }
        assert!(hits > 100);
    }

    #[test]
    fn test_negative_radius_flips_normal() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), -0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-5);
        // Outward normal points into the sphere, so the ray counts as inside.
        assert!(!rec.front_face);
    }
}
