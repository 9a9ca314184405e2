//! Turning a `SceneDescription` into something renderable.

use std::collections::HashMap;
use std::sync::Arc;

use glint_core::{MaterialDesc, MaterialRef, SceneDescription, SceneError, SceneResult};

use crate::{Camera, Dielectric, Lambertian, Material, Metal, Scene, Sphere};

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        match *desc {
            MaterialDesc::Lambertian { albedo } => Lambertian::new(albedo).into(),
            MaterialDesc::Metal { albedo, fuzz } => Metal::new(albedo, fuzz).into(),
            MaterialDesc::Dielectric { ior } => Dielectric::new(ior).into(),
        }
    }
}

/// Build the scene described by `desc`.
///
/// Each named material is instantiated once and shared by every sphere that
/// names it; inline materials belong to their sphere alone.
pub fn build_scene(desc: &SceneDescription) -> SceneResult<Scene> {
    desc.validate()?;

    let named: HashMap<&str, Arc<Material>> = desc
        .materials
        .iter()
        .map(|(name, material)| (name.as_str(), Arc::new(Material::from(material))))
        .collect();

    let mut scene = Scene::new();
    for (index, sphere) in desc.spheres.iter().enumerate() {
        let material = match &sphere.material {
            MaterialRef::Named(name) => named
                .get(name.as_str())
                .cloned()
                .ok_or_else(|| SceneError::UnknownMaterial {
                    sphere: index,
                    name: name.clone(),
                })?,
            MaterialRef::Inline(material) => Arc::new(Material::from(material)),
        };
        scene.add(Sphere::new(sphere.center, sphere.radius, material));
    }

    log::debug!(
        "Built scene: {} spheres, {} shared materials",
        scene.len(),
        named.len()
    );

    Ok(scene)
}

/// Build both the scene and its camera.
pub fn build_world(desc: &SceneDescription) -> SceneResult<(Scene, Camera)> {
    let scene = build_scene(desc)?;
    Ok((scene, Camera::new(&desc.camera)))
}
