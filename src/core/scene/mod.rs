mod camera;
mod light;
mod material;
mod scene;
mod sphere;

pub use camera::*;
pub use light::*;
pub use material::*;
pub use scene::*;
pub use sphere::*;
