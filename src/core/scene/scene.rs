use super::camera::*;
use super::light::*;
use super::material::*;
use super::sphere::*;
use crate::core::base::*;
use crate::core::geometry::*;

use std::sync::Arc;

pub struct Scene {
    pub background: Color,
    pub surfaces: Vec<Sphere>,
    pub lights: Vec<PointLight>,
    pub cameras: Vec<Camera>,
}

impl Default for Scene {
    fn default() -> Self {
        Scene {
            background: Color::zero(),
            surfaces: Vec::new(),
            lights: Vec::new(),
            cameras: Vec::new(),
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    /// One glossy orange sphere under a single light, seen from -z.
    pub fn demo() -> Self {
        let mut scn = Scene::new();
        scn.set_background(&Color::new(0.04, 0.06, 0.1));

        let mtl = Arc::new(Material::new(
            &Color::new(0.7, 0.3, 0.2),
            &Color::new(0.6, 0.6, 0.6),
            80.0,
        ));
        scn.add_surface(Sphere::new(&Point3f::zero(), 1.0, &mtl));

        let mut cam = Camera::new(&Point3f::new(0.0, 0.0, -6.0));
        cam.set_target(&Point3f::zero());
        scn.add_camera(cam);

        scn.add_light(PointLight::new(&Point3f::new(-5.0, 5.0, -5.0)));
        return scn;
    }

    pub fn set_background(&mut self, color: &Color) {
        self.background = *color;
    }

    pub fn add_surface(&mut self, surface: Sphere) {
        self.surfaces.push(surface);
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn add_camera(&mut self, camera: Camera) {
        self.cameras.push(camera);
    }

    pub fn active_camera(&self) -> Option<&Camera> {
        return self.cameras.first();
    }

    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let mut r = *ray;
        let mut nearest = None;
        for s in self.surfaces.iter() {
            if let Some(hit) = s.intersect(&r) {
                r.t_max = hit.t;
                nearest = Some(hit);
            }
        }
        return nearest;
    }

    pub fn intersect_p(&self, ray: &Ray) -> bool {
        return self.surfaces.iter().any(|s| s.intersect(ray).is_some());
    }
}
