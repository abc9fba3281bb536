use super::types::Float;

pub const FLOAT_ONE_MINUS_EPSILON: f32 = 0.99999994;
pub const DOUBLE_ONE_MINUS_EPSILON: f64 = 0.99999999999999989;

#[cfg(not(feature = "float-as-double"))]
mod detail {
    use super::*;

    pub const SHADOW_EPSILON: Float = 0.0001;
    pub const PI: Float = std::f32::consts::PI;
    pub const ONE_MINUS_EPSILON: Float = FLOAT_ONE_MINUS_EPSILON;
}

#[cfg(feature = "float-as-double")]
mod detail {
    use super::*;

    pub const SHADOW_EPSILON: Float = 0.0001;
    pub const PI: Float = std::f64::consts::PI;
    pub const ONE_MINUS_EPSILON: Float = DOUBLE_ONE_MINUS_EPSILON;
}

pub use detail::*;

/// Gamma applied at composite time until the user adjusts it.
pub const DEFAULT_GAMMA: f32 = 2.2;
/// Lower bound of the live gamma value; keeps `1 / gamma` finite.
pub const MIN_GAMMA: f32 = 0.01;
/// Number of entries in the pressed-key table.
pub const KEY_TABLE_SIZE: usize = 128;
pub const KEY_ESCAPE: u8 = 27;
