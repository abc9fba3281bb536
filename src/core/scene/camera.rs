use crate::core::base::*;
use crate::core::geometry::*;

/// Perspective camera; a non-zero aperture turns it into a thin lens.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3f,
    pub target: Point3f,
    pub up: Vector3f,
    /// vertical field of view in degrees
    pub fov: Float,
    /// lens radius, zero for a pinhole
    pub aperture: Float,
    pub focus_distance: Float,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            position: Point3f::zero(),
            target: Point3f::new(0.0, 0.0, 1.0),
            up: Vector3f::new(0.0, 1.0, 0.0),
            fov: 45.0,
            aperture: 0.0,
            focus_distance: 1.0,
        }
    }
}

/// Concentric mapping of `[0,1)^2` onto the unit disk.
fn concentric_sample_disk(u0: Float, u1: Float) -> (Float, Float) {
    let ox = 2.0 * u0 - 1.0;
    let oy = 2.0 * u1 - 1.0;
    if ox == 0.0 && oy == 0.0 {
        return (0.0, 0.0);
    }
    let (r, theta) = if ox.abs() > oy.abs() {
        (ox, (PI / 4.0) * (oy / ox))
    } else {
        (oy, (PI / 2.0) - (PI / 4.0) * (ox / oy))
    };
    return (r * theta.cos(), r * theta.sin());
}

impl Camera {
    pub fn new(position: &Point3f) -> Self {
        Camera {
            position: *position,
            focus_distance: position.length(),
            ..Default::default()
        }
    }

    pub fn set_target(&mut self, target: &Point3f) {
        self.target = *target;
        self.focus_distance = (*target - self.position).length();
    }

    fn basis(&self) -> (Vector3f, Vector3f, Vector3f) {
        let forward = (self.target - self.position).normalize();
        let right = Vector3f::cross(&self.up, &forward).normalize();
        let up = Vector3f::cross(&forward, &right);
        return (forward, right, up);
    }

    /// Primary ray through film position `(sx, sy)` in `[0,1]^2`, top-left
    /// origin. `lens` is only used when `dof` is set and the aperture is open.
    pub fn generate_ray(
        &self,
        sx: Float,
        sy: Float,
        aspect: Float,
        lens: (Float, Float),
        time: Float,
        dof: bool,
    ) -> Ray {
        let (forward, right, up) = self.basis();
        let half = Float::tan(radians(self.fov) * 0.5);
        let px = (2.0 * sx - 1.0) * half * aspect;
        let py = (1.0 - 2.0 * sy) * half;
        let dir = (forward + right * px + up * py).normalize();

        if dof && self.aperture > 0.0 {
            let focus = self.position + dir * (self.focus_distance / dir.dot(&forward));
            let (lx, ly) = concentric_sample_disk(lens.0, lens.1);
            let origin = self.position + (right * lx + up * ly) * self.aperture;
            let d = (focus - origin).normalize();
            return Ray::new(&origin, &d, Float::INFINITY, time);
        }
        return Ray::new(&self.position, &dir, Float::INFINITY, time);
    }
}
