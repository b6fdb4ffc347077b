use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of the random arrival offset.
pub trait ScatterSource {
    /// An offset in minutes, uniformly drawn from `[-scattering, +scattering]`.
    fn offset(&mut self, scattering: u32) -> i32;
}

/// Uniform draws from a `rand` generator. Not reproducible unless built from a seed.
#[derive(Debug, Clone)]
pub struct RandomScatter<R = StdRng> {
    rng: R,
}

impl RandomScatter<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> ScatterSource for RandomScatter<R> {
    fn offset(&mut self, scattering: u32) -> i32 {
        let bound = i32::try_from(scattering).unwrap_or(i32::MAX);
        self.rng.gen_range(-bound..=bound)
    }
}

/// Always the same offset, clamped into the allowed range.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedScatter(pub i32);

impl ScatterSource for FixedScatter {
    fn offset(&mut self, scattering: u32) -> i32 {
        let bound = i32::try_from(scattering).unwrap_or(i32::MAX);
        self.0.clamp(-bound, bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_scattering_never_moves() {
        let mut scatter = RandomScatter::seeded(7);
        assert!((0..100).all(|_| scatter.offset(0) == 0));
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let mut a = RandomScatter::seeded(42);
        let mut b = RandomScatter::seeded(42);
        let first: Vec<_> = (0..20).map(|_| a.offset(10)).collect();
        let second: Vec<_> = (0..20).map(|_| b.offset(10)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn fixed_offset_is_clamped() {
        assert_eq!(FixedScatter(5).offset(10), 5);
        assert_eq!(FixedScatter(15).offset(10), 10);
        assert_eq!(FixedScatter(-15).offset(10), -10);
    }
}
