//! Seeded random source for placement and timetable draws.
//!
//! Not cryptographic. A generator is always passed in by the caller, so a whole
//! run replays from its seed.

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform sample in `[0, 1)` from the top 24 bits.
    fn next_unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }

    /// Uniform index in `0..len`, or `None` for an empty range.
    ///
    /// Draws above the largest multiple of `len` are rejected, so long ranges
    /// carry no modulo bias.
    fn gen_index(&mut self, len: usize) -> Option<usize> {
        let span = u64::try_from(len).ok().filter(|&n| n > 0)?;
        let zone = u64::MAX - u64::MAX % span;
        loop {
            let x = self.next_u64();
            if x < zone {
                return Some((x % span) as usize);
            }
        }
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        self.gen_index(items.len()).map(|i| &items[i])
    }

    /// Partial Fisher-Yates: moves a uniform draw of `count` distinct elements
    /// to the front of `items` and returns that prefix. `count` is clamped to
    /// the slice length.
    fn shuffle_prefix<'a, T>(&mut self, items: &'a mut [T], count: usize) -> &'a mut [T]
    where
        Self: Sized,
    {
        let count = count.min(items.len());
        for i in 0..count {
            if let Some(offset) = self.gen_index(items.len() - i) {
                items.swap(i, i + offset);
            }
        }
        &mut items[..count]
    }

    /// Normally distributed sample (Box-Muller).
    fn next_gaussian(&mut self, mean: f32, stddev: f32) -> f32 {
        // (0, 1] keeps the logarithm finite.
        let u1 = 1.0 - self.next_unit();
        let u2 = 1.0 - self.next_unit();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * core::f32::consts::PI * u2).cos();
        z * stddev + mean
    }
}

/// SplitMix64 generator. Also used to split one run seed into per-agent streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator for stream `stream` of agent `agent` under the run seed `seed`.
    pub fn for_stream(seed: u64, agent: u64, stream: u64) -> Self {
        Self::new(derive_seed(seed, agent, stream))
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix64(self.state)
    }
}

/// SplitMix64 finalizer.
pub fn mix64(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

pub fn derive_seed(seed: u64, agent: u64, stream: u64) -> u64 {
    mix64(seed ^ mix64(agent.wrapping_add(GOLDEN_GAMMA)) ^ mix64(stream))
}
