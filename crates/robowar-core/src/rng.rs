/// Uniform integer source consumed by the simulation.
///
/// Implementations must return values in `min..=max` (both ends inclusive)
/// and may assume `min <= max`.
pub trait RandomSource {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32;

    /// Uniform index into a non-empty slice of length `len`.
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick from empty set");
        self.uniform_int(0, len.saturating_sub(1) as i32) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        (**self).uniform_int(min, max)
    }
}

/// Deterministic PRNG with 256-bit state, suitable for replays.
///
/// This is `xoshiro256**` seeded via SplitMix64.
#[derive(Clone, Copy, Debug)]
pub struct GameRng {
    state: [u64; 4],
}

impl GameRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut sm = SplitMix64 { state: seed };
        Self {
            state: [sm.next(), sm.next(), sm.next(), sm.next()],
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        // xoshiro256**
        let result = self.state[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);

        let t = self.state[1] << 17;

        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];

        self.state[2] ^= t;

        self.state[3] = self.state[3].rotate_left(45);

        result
    }
}

impl RandomSource for GameRng {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        assert!(min <= max, "empty range {min}..={max}");

        // Span fits in u64 even for the full i32 range; rejection sampling
        // keeps the distribution unbiased.
        let span = (max as i64 - min as i64 + 1) as u64;
        let threshold = u64::MAX - (u64::MAX % span);
        loop {
            let x = self.next_u64();
            if x < threshold {
                return (min as i64 + (x % span) as i64) as i32;
            }
        }
    }
}

struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn next(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}
