pub mod numeric_traits;
pub mod ray;
pub mod vector3;

pub use ray::*;
pub use vector3::*;
