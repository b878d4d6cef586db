use crate::errors::CoreError;

/// Source of uniform draws in `[0, 1)` for the synthetic trend periods.
///
/// Injected into the tracker so tests can swap the OS source for a fixed
/// sequence and assert exact values.
pub trait RandomSource {
    /// Next draw, always in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Largest f64 strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Map 64 random bits to `[0, 1)` using the top 53 bits.
fn unit_from_bits(bits: u64) -> f64 {
    (bits >> 11) as f64 / (1u64 << 53) as f64
}

/// Non-reproducible draws backed by the operating system RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl OsRandom {
    pub fn new() -> Self {
        Self
    }

    /// Draw from the OS RNG, surfacing RNG failures.
    pub fn try_next_unit(&mut self) -> Result<f64, CoreError> {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf)?;
        Ok(unit_from_bits(u64::from_le_bytes(buf)))
    }
}

impl RandomSource for OsRandom {
    fn next_unit(&mut self) -> f64 {
        match self.try_next_unit() {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "OS random source failed, using midpoint");
                0.5
            }
        }
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`. An empty list always yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    next: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.next % self.values.len()];
        self.next = self.next.wrapping_add(1);
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, BELOW_ONE)
        }
    }
}

/// Deterministic pseudo-random draws from a seed (SplitMix64).
///
/// For hosts that want the trend filler to look the same on every run, such
/// as the CLI's `--seed` flag or screenshot fixtures.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        unit_from_bits(z ^ (z >> 31))
    }
}
