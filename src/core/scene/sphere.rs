use super::material::Material;
use crate::core::base::*;
use crate::core::geometry::*;

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Point3f,
    pub radius: Float,
    /// units per second; gives motion blur something to smear
    pub velocity: Vector3f,
    pub material: Arc<Material>,
}

#[derive(Debug, Clone)]
pub struct SurfaceHit {
    pub t: Float,
    pub p: Point3f,
    pub n: Normal3f,
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: &Point3f, radius: Float, material: &Arc<Material>) -> Self {
        Sphere {
            center: *center,
            radius,
            velocity: Vector3f::zero(),
            material: material.clone(),
        }
    }

    pub fn with_velocity(mut self, velocity: &Vector3f) -> Self {
        self.velocity = *velocity;
        return self;
    }

    /// Centre at `time` seconds into the shutter interval.
    pub fn center_at(&self, time: Float) -> Point3f {
        return self.center + self.velocity * time;
    }

    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let c = self.center_at(ray.time);
        let oc = ray.o - c;
        let a = ray.d.length_squared();
        let b = 2.0 * ray.d.dot(&oc);
        let cc = oc.length_squared() - self.radius * self.radius;
        let (t0, t1) = quadratic(a, b, cc)?;
        if t0 > ray.t_max || t1 <= SHADOW_EPSILON {
            return None;
        }
        let t = if t0 > SHADOW_EPSILON { t0 } else { t1 };
        if t > ray.t_max {
            return None;
        }
        let p = ray.position(t);
        let n = (p - c) / self.radius;
        return Some(SurfaceHit {
            t,
            p,
            n,
            material: self.material.clone(),
        });
    }
}
