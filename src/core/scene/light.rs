use crate::core::base::*;

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Point3f,
    pub color: Color,
}

impl PointLight {
    pub fn new(position: &Point3f) -> Self {
        PointLight {
            position: *position,
            color: Color::from(1.0),
        }
    }

    pub fn with_color(mut self, color: &Color) -> Self {
        self.color = *color;
        return self;
    }
}
