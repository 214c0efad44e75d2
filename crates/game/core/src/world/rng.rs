//! Deterministic random number generation.
//!
//! All randomness (damage variance, encounter rolls, drop rolls) flows
//! through the [`RngOracle`] trait so a session is fully reproducible
//! from its seed. Implementations must be pure: the same seed always
//! yields the same value.

/// Stateless random oracle keyed by an explicit seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 from a seed.
    fn next_u32(&self, seed: u64) -> u32;
}

/// PCG-XSH-RR random generator (64-bit state, 32-bit output).
///
/// Simple, fast, and statistically solid; the stateless wrapper applies
/// one LCG step to the seed and permutes the result.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn lcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn permute(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::permute(Self::lcg_step(seed))
    }
}

/// Mix a session seed, action nonce, and roll context into one seed.
///
/// `nonce` advances once per player-visible action; `context`
/// distinguishes independent rolls inside the same action. Constants are
/// SplitMix64/FxHash multipliers.
pub fn compute_seed(game_seed: u64, nonce: u64, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Sequential roll source for one action.
///
/// Wraps an [`RngOracle`] with a base seed and a draw counter so callers
/// can take as many independent rolls as they need without threading
/// context values by hand.
pub struct DiceStream<'a> {
    rng: &'a dyn RngOracle,
    base: u64,
    draws: u32,
}

impl<'a> DiceStream<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, nonce: u64) -> Self {
        Self {
            rng,
            base: compute_seed(game_seed, nonce, 0),
            draws: 0,
        }
    }

    fn draw(&mut self) -> u32 {
        let seed = compute_seed(self.base, u64::from(self.draws), self.draws);
        self.draws += 1;
        self.rng.next_u32(seed)
    }

    /// True with probability `permille / 1000`.
    pub fn chance(&mut self, permille: u32) -> bool {
        self.draw() % 1000 < permille
    }

    /// Uniform value in `[min, max]` inclusive.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.draw() % (max - min + 1)
    }

    /// Index into `weights` chosen proportionally to each weight.
    ///
    /// Returns `None` when the weights are empty or sum to zero.
    pub fn pick_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.draw() % total;
        for (index, weight) in weights.iter().enumerate() {
            if roll < *weight {
                return Some(index);
            }
            roll -= weight;
        }
        None
    }
}
