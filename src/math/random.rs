//! String-seeded SFC32 generator
//!
//! The seed string is folded into four 32-bit words with a MurmurHash3-style
//! mixer, and those words seed a small fast counting generator. Every step is
//! wrapping 32-bit arithmetic, so the sequence is identical on every platform.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

const HASH_INIT: u32 = 1_779_033_703;
const HASH_FOLD: u32 = 3_432_918_353;
const AVALANCHE_1: u32 = 2_246_822_507;
const AVALANCHE_2: u32 = 3_266_489_909;

/// 2^32 as a float, the divisor mapping a `u32` onto [0, 1)
const UNIT_SCALE: f64 = 4_294_967_296.0;

/// MurmurHash3-style seed stream derived from a string
///
/// Each call to [`SeedHasher::next_word`] applies the finalizing avalanche to
/// the running state and returns the result.
#[derive(Clone, Debug)]
pub struct SeedHasher {
    hash: u32,
}

impl SeedHasher {
    /// Fold a seed string into the hash state
    ///
    /// Characters are folded as UTF-16 code units, which for ASCII seeds is
    /// simply the byte value.
    pub fn new(seed: &str) -> Self {
        let length = seed.encode_utf16().count() as u32;
        let mut hash = HASH_INIT ^ length;
        for unit in seed.encode_utf16() {
            hash = (hash ^ u32::from(unit)).wrapping_mul(HASH_FOLD);
            hash = hash.rotate_left(13);
        }
        Self { hash }
    }

    /// Advance the avalanche and return the next seed word
    pub const fn next_word(&mut self) -> u32 {
        let mut hash = self.hash;
        hash = (hash ^ (hash >> 16)).wrapping_mul(AVALANCHE_1);
        hash = (hash ^ (hash >> 13)).wrapping_mul(AVALANCHE_2);
        hash ^= hash >> 16;
        self.hash = hash;
        hash
    }
}

/// Small fast counting generator with 128 bits of state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sfc32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl Sfc32 {
    /// Build the generator from four explicit state words
    pub const fn from_words(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    /// Build the generator from a seed string
    ///
    /// Identical strings always produce identical sequences.
    pub fn from_seed_str(seed: &str) -> Self {
        let mut hasher = SeedHasher::new(seed);
        let a = hasher.next_word();
        let b = hasher.next_word();
        let c = hasher.next_word();
        let d = hasher.next_word();
        Self::from_words(a, b, c, d)
    }

    /// Advance the state once and return the raw 32-bit output
    pub const fn step(&mut self) -> u32 {
        let mut t = self.a.wrapping_add(self.b);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21);
        self.d = self.d.wrapping_add(1);
        t = t.wrapping_add(self.d);
        self.c = self.c.wrapping_add(t);
        t
    }

    /// Next uniform float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        unit_f64(self)
    }
}

/// Draw a uniform float in [0, 1) from any generator using 32 bits of output
///
/// This is the exact mapping the collapse loop relies on for reproducibility,
/// so it must not be replaced by `rand`'s 53-bit float sampling.
pub fn unit_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.next_u32()) / UNIT_SCALE
}

impl RngCore for Sfc32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst);
    }
}

impl SeedableRng for Sfc32 {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(seed.chunks_exact(4)) {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(chunk);
            *word = u32::from_le_bytes(bytes);
        }
        let [a, b, c, d] = words;
        Self::from_words(a, b, c, d)
    }
}
