//! Seeded value randomizer.
//!
//! Every output the stub hands back (ids, counts, handles, struct fields and
//! most status codes) comes from one process-wide ChaCha8 generator. Seeding
//! it makes a whole test run reproducible; leaving it unseeded draws from OS
//! entropy.

use axcl_sys::{axclError, AXCL_SUCC};
use parking_lot::Mutex;
use rand::distributions::{Distribution, Standard};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// How fabricated status codes are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Uniform over every `i32`, so nearly every call "fails" with a junk code
    #[default]
    Random,
    /// Always `AXCL_SUCC`
    Success,
    /// `AXCL_SUCC` except with probability `rate`, then a random non-zero code
    FailureRate {
        /// Failure probability from 0.0 (never fail) to 1.0 (always fail)
        rate: f64,
    },
}

/// Seeded RNG wrapper producing plausibly-typed random values
pub struct Randomizer {
    inner: Mutex<ChaCha8Rng>,
}

impl Randomizer {
    /// Create a new randomizer with optional seed.
    /// If seed is None, uses a random seed from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            inner: Mutex::new(Self::rng_for(seed)),
        }
    }

    fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
        match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&self, seed: u64) {
        *self.inner.lock() = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Uniform value over the whole domain of `T`.
    pub fn random<T>(&self) -> T
    where
        Standard: Distribution<T>,
    {
        self.inner.lock().r#gen()
    }

    /// Uniform value in `[lo, hi)`; returns `lo` when the range is empty.
    pub fn int32_in_range(&self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.inner.lock().gen_range(lo..hi)
    }

    /// Fill `dest` with random values.
    pub fn fill<T>(&self, dest: &mut [T])
    where
        Standard: Distribution<T>,
    {
        let mut rng = self.inner.lock();
        for slot in dest.iter_mut() {
            *slot = rng.r#gen();
        }
    }

    /// Random non-null pointer-sized handle value.
    pub fn handle(&self) -> usize {
        let mut rng = self.inner.lock();
        loop {
            let value: usize = rng.r#gen();
            if value != 0 {
                return value;
            }
        }
    }

    /// Check if an operation should fail based on the given failure rate.
    pub fn should_fail(&self, rate: f64) -> bool {
        if rate <= 0.0 {
            return false;
        }
        if rate >= 1.0 {
            return true;
        }
        self.inner.lock().r#gen::<f64>() < rate
    }

    /// Fabricate a status code according to `policy`.
    pub fn status(&self, policy: StatusPolicy) -> axclError {
        match policy {
            StatusPolicy::Random => self.random(),
            StatusPolicy::Success => AXCL_SUCC,
            StatusPolicy::FailureRate { rate } => {
                if self.should_fail(rate) {
                    self.failure_code()
                } else {
                    AXCL_SUCC
                }
            }
        }
    }

    fn failure_code(&self) -> axclError {
        let mut rng = self.inner.lock();
        loop {
            let code: axclError = rng.r#gen();
            if code != AXCL_SUCC {
                return code;
            }
        }
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Randomizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Randomizer")
            .field("inner", &"<Mutex<ChaCha8Rng>>")
            .finish()
    }
}

/// Random value of `T` from the process-wide randomizer.
pub fn initialize_random<T>() -> T
where
    Standard: Distribution<T>,
{
    crate::runtime::runtime().randomizer().random()
}

/// Random `i32` in `[lo, hi)` from the process-wide randomizer.
pub fn create_int32_random_instance(lo: i32, hi: i32) -> i32 {
    crate::runtime::runtime().randomizer().int32_in_range(lo, hi)
}
