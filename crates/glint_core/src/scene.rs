//! Scene description types for Glint.
//!
//! A `SceneDescription` is everything the renderer needs before the first
//! ray is cast: camera placement, a table of named materials and the list of
//! spheres. It is renderer-agnostic plain data and (de)serializes to JSON:
//!
//! ```json
//! {
//!   "camera": { "look_from": [13, 2, 3], "look_at": [0, 0, 0], "vfov": 20.0 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] }
//!   },
//!   "spheres": [
//!     { "center": [0, -1000, 0], "radius": 1000, "material": "ground" },
//!     { "center": [0, 1, 0], "radius": 1, "material": { "type": "dielectric", "ior": 1.5 } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use glint_math::{Color, Point3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {sphere} references unknown material '{name}'")]
    UnknownMaterial { sphere: usize, name: String },

    #[error("Sphere {sphere} is invalid: {reason}")]
    InvalidSphere { sphere: usize, reason: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// User-facing camera parameters.
///
/// The renderer derives its orthonormal basis and viewport from these once,
/// before rendering starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Eye position
    pub look_from: Point3,
    /// Point the camera looks at
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Image width / image height
    pub aspect_ratio: f32,
    /// Lens diameter; 0 gives a pinhole camera with no defocus blur
    pub aperture: f32,
    /// Distance from the eye to the plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraSettings {
    /// Set eye position, target and up vector.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set field of view and aspect ratio.
    pub fn with_view(mut self, vfov: f32, aspect_ratio: f32) -> Self {
        self.vfov = vfov;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, aperture: f32, focus_dist: f32) -> Self {
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    fn validate(&self) -> SceneResult<()> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "vfov must be in (0, 180) degrees, got {}",
                self.vfov
            )));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(SceneError::InvalidCamera(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        let view = self.look_from - self.look_at;
        if view.length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "look_from and look_at must differ".to_string(),
            ));
        }
        if self.vup.cross(view).length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "vup must not be parallel to the view direction".to_string(),
            ));
        }
        if !(self.focus_dist > 0.0 && self.focus_dist.is_finite()) {
            return Err(SceneError::InvalidCamera(format!(
                "focus distance must be positive, got {}",
                self.focus_dist
            )));
        }
        Ok(())
    }
}

/// Surface scattering behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Diffuse surface
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` 0 is a perfect mirror
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    /// Clear refractive surface (glass, water, ...)
    Dielectric { ior: f32 },
}

/// How a sphere names its material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialRef {
    /// Key into `SceneDescription::materials`; spheres naming the same key share one material
    Named(String),
    /// A material owned by this sphere alone
    Inline(MaterialDesc),
}

impl From<MaterialDesc> for MaterialRef {
    fn from(desc: MaterialDesc) -> Self {
        MaterialRef::Inline(desc)
    }
}

impl From<&str> for MaterialRef {
    fn from(name: &str) -> Self {
        MaterialRef::Named(name.to_string())
    }
}

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    /// Negative radii flip the normals, which makes hollow glass shells possible
    pub radius: f32,
    pub material: MaterialRef,
}

impl SphereDesc {
    pub fn new(center: Point3, radius: f32, material: impl Into<MaterialRef>) -> Self {
        Self {
            center,
            radius,
            material: material.into(),
        }
    }
}

/// A complete scene: camera, materials and spheres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraSettings,

    /// Shared materials, by name
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,

    /// Spheres in insertion order
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Create an empty scene with the given camera.
    pub fn new(camera: CameraSettings) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Register a named material, replacing any previous one with that name.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) {
        self.materials.insert(name.into(), material);
    }

    /// Append a sphere.
    pub fn add_sphere(&mut self, sphere: SphereDesc) {
        self.spheres.push(sphere);
    }

    /// Look up the material a sphere refers to.
    pub fn resolve<'a>(&'a self, material: &'a MaterialRef) -> Option<&'a MaterialDesc> {
        match material {
            MaterialRef::Named(name) => self.materials.get(name),
            MaterialRef::Inline(desc) => Some(desc),
        }
    }

    /// Check that the scene can be rendered.
    ///
    /// Degenerate spheres (zero radius) are allowed; they simply never show up.
    pub fn validate(&self) -> SceneResult<()> {
        self.camera.validate()?;

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.center.is_finite() || !sphere.radius.is_finite() {
                return Err(SceneError::InvalidSphere {
                    sphere: index,
                    reason: "center and radius must be finite".to_string(),
                });
            }
            if let MaterialRef::Named(name) = &sphere.material {
                if !self.materials.contains_key(name) {
                    return Err(SceneError::UnknownMaterial {
                        sphere: index,
                        name: name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(json)?;
    scene.validate()?;
    Ok(scene)
}

/// Load and validate a scene from a JSON file.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let scene: SceneDescription = serde_json::from_reader(reader)?;
    scene.validate()?;

    log::info!(
        "Loaded scene {}: {} spheres, {} named materials",
        path.display(),
        scene.spheres.len(),
        scene.materials.len()
    );

    Ok(scene)
}

/// Write a scene as pretty-printed JSON.
pub fn save_scene(path: impl AsRef<Path>, scene: &SceneDescription) -> SceneResult<()> {
    let writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(writer, scene)?;
    Ok(())
}
