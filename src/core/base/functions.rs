use super::types::Float;

#[inline]
pub fn lerp(t: Float, v1: Float, v2: Float) -> Float {
    return (1.0 - t) * v1 + t * v2;
}

#[inline]
pub fn radians(deg: Float) -> Float {
    return (super::constants::PI / 180.0) * deg;
}

#[inline]
pub fn quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    let a = a as f64;
    let b = b as f64;
    let c = c as f64;
    let discrim: f64 = b * b - 4.0 * a * c;
    if discrim < 0.0 {
        return None;
    }
    let root_discrim = f64::sqrt(discrim);
    let q = if b < 0.0 {
        -0.5 * (b - root_discrim)
    } else {
        -0.5 * (b + root_discrim)
    };
    let t0 = q / a;
    let t1 = c / q;
    if t0 > t1 {
        return Some((t1 as Float, t0 as Float));
    }
    return Some((t0 as Float, t1 as Float));
}

/// Power-law display transform, `value ^ inv_gamma`. Negative input is black.
#[inline]
pub fn gamma_correct(value: f32, inv_gamma: f32) -> f32 {
    if value <= 0.0 {
        return 0.0;
    }
    return f32::powf(value, inv_gamma);
}

#[inline]
pub fn to_byte(v: f32) -> u8 {
    return f32::clamp(255.0 * v + 0.5, 0.0, 255.0) as u8;
}
