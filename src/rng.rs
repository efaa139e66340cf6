//! Small seeded generator for play order shuffling and particle jitter.
//! Not crypto secure; seeding comes from the browser when available.

/// Linear congruential generator (Numerical Recipes constants).
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from `getrandom` (feature `rng`) or `performance.now()`.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 33) as u32
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }

    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

#[cfg(feature = "rng")]
fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            tracing::warn!("getrandom failed ({}), seeding from clock", e);
            clock_seed()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn entropy_seed() -> u64 {
    clock_seed()
}

fn clock_seed() -> u64 {
    let now = crate::performance_now();
    (now * 1000.0) as u64 ^ 0x5EED_5EED_5EED_5EED
}
