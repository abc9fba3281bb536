use crate::core::base::*;

/// Lambert diffuse lobe plus a Phong highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: Float,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            diffuse: Color::from(0.75),
            specular: Color::zero(),
            shininess: 60.0,
        }
    }
}

impl Material {
    pub fn new(diffuse: &Color, specular: &Color, shininess: Float) -> Self {
        Material {
            diffuse: *diffuse,
            specular: *specular,
            shininess,
        }
    }

    /// Reflected radiance scale for unit light arriving along `wi`, seen
    /// from `wo`. All vectors point away from the surface.
    pub fn shade(&self, n: &Normal3f, wo: &Vector3f, wi: &Vector3f) -> Color {
        let ndotl = n.dot(wi);
        if ndotl <= 0.0 {
            return Color::zero();
        }
        let mut c = self.diffuse * ndotl;
        let r = *n * (2.0 * ndotl) - *wi;
        let rdotv = r.dot(wo);
        if rdotv > 0.0 {
            c += self.specular * Float::powf(rdotv, self.shininess);
        }
        return c;
    }
}
