use crate::core::base::*;

#[derive(Debug, Default, Clone, Copy)]
pub struct Ray {
    pub o: Point3f,
    pub d: Vector3f,
    pub t_max: Float,
    pub time: Float,
}

impl Ray {
    pub fn new(o: &Point3f, d: &Vector3f, t_max: Float, time: Float) -> Self {
        Ray {
            o: *o,
            d: *d,
            t_max,
            time,
        }
    }

    pub fn position(&self, t: Float) -> Point3f {
        return self.o + self.d * t;
    }
}
