use crate::core::base::*;

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// PCG32; one sequence per frame block keeps block renders reproducible
/// regardless of which worker picks them up.
#[derive(Debug, PartialEq, Clone)]
pub struct RNG {
    state: u64,
    inc: u64,
}

impl RNG {
    pub fn new() -> Self {
        RNG {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }

    pub fn new_sequence(initseq: u64) -> Self {
        let mut r = Self::new();
        r.set_sequence(initseq);
        return r;
    }

    pub fn set_sequence(&mut self, initseq: u64) {
        self.state = 0;
        self.inc = (initseq << 1) | 1;
        self.uniform_uint32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_uint32();
    }

    #[inline]
    pub fn uniform_uint32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        let xorshifted = ((oldstate.wrapping_shr(18) ^ oldstate).wrapping_shr(27)) as u32;
        let rot = (oldstate.wrapping_shr(59)) as u32;
        return xorshifted.rotate_right(rot);
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn uniform_float(&mut self) -> Float {
        let f = self.uniform_uint32() as Float * (1.0 / 4294967296.0);
        return Float::min(f, ONE_MINUS_EPSILON);
    }
}

impl Default for RNG {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_deterministic() {
        let mut a = RNG::new_sequence(7);
        let mut b = RNG::new_sequence(7);
        for _ in 0..16 {
            assert_eq!(a.uniform_uint32(), b.uniform_uint32());
        }
    }

    #[test]
    fn test_uniform_float_range() {
        let mut r = RNG::new_sequence(3);
        for _ in 0..1000 {
            let f = r.uniform_float();
            assert!((0.0..1.0).contains(&f));
        }
    }
}
