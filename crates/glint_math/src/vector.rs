//! Extra vector operations on top of glam's `Vec3`.

use crate::Vec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color (components typically 0-1 before tone mapping).
pub type Color = Vec3;

/// Components below this magnitude count as zero for scatter directions.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Operations glam doesn't provide.
pub trait Vec3Ext {
    /// True if every component is within `NEAR_ZERO_EPSILON` of zero.
    fn near_zero(&self) -> bool;

    /// Mirror `self` about the normal `n`.
    fn reflect(self, n: Vec3) -> Vec3;

    /// Refract the unit vector `self` through a surface with normal `n`.
    ///
    /// `etai_over_etat` is the ratio of refractive indices (incident / transmitted).
    fn refract(self, n: Vec3, etai_over_etat: f32) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }

    #[inline]
    fn reflect(self, n: Vec3) -> Vec3 {
        self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refract(self, n: Vec3, etai_over_etat: f32) -> Vec3 {
        let cos_theta = (-self).dot(n).min(1.0);
        let r_out_perp = etai_over_etat * (self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!Vec3::new(1e-9, 1e-3, 0.0).near_zero());
        assert!(!Vec3::new(0.0, 0.0, -1e-7).near_zero());
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let reflected = v.reflect(Vec3::Y);
        assert_eq!(reflected, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_unit_ratio_is_identity() {
        let v = Vec3::new(1.0, -2.0, 0.5).normalize();
        let refracted = v.refract(Vec3::Y, 1.0);
        assert!((refracted - v).length() < 1e-5);
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        // Entering glass from air: the transmitted ray is closer to -normal.
        let v = Vec3::new(1.0, -1.0, 0.0).normalize();
        let refracted = v.refract(Vec3::Y, 1.0 / 1.5);
        assert!((refracted.length() - 1.0).abs() < 1e-5);
        assert!(refracted.x < v.x);
        assert!(refracted.y < v.y);
    }
}
