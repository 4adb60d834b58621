//! Universal hash family with randomized parameters
//!
//! Provides:
//! - Key normalization to `u64` (fixed-seed xxh3 for byte-like keys)
//! - Carter-Wegman hash family `h(x) = ((a·x + b) mod p) mod size`
//! - Random prime drawing for the modulus `p`

use rand::Rng;
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Fixed seed for normalizing byte-like keys.
///
/// The seed is part of the normalization contract: the same key always
/// normalizes to the same integer, in every process. Randomization lives in
/// the `(a, b, p)` parameters, not here.
const NORMALIZE_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Canonical key-to-integer transform fed into the universal hash family.
///
/// Integer keys map to their own bit pattern; byte-like keys (strings, byte
/// slices) map through xxh3-64 with a fixed seed. The mapping is
/// deterministic, so a key lands in the same chain until the table reseeds.
pub trait Normalize {
    /// Map the key to its canonical `u64` representation.
    fn normalize(&self) -> u64;
}

macro_rules! normalize_int {
    ($($t:ty),*) => {
        $(impl Normalize for $t {
            #[inline]
            fn normalize(&self) -> u64 {
                *self as u64
            }
        })*
    };
}

normalize_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Normalize for str {
    #[inline]
    fn normalize(&self) -> u64 {
        xxh3_64_with_seed(self.as_bytes(), NORMALIZE_SEED)
    }
}

impl Normalize for String {
    #[inline]
    fn normalize(&self) -> u64 {
        self.as_str().normalize()
    }
}

impl Normalize for [u8] {
    #[inline]
    fn normalize(&self) -> u64 {
        xxh3_64_with_seed(self, NORMALIZE_SEED)
    }
}

impl Normalize for Vec<u8> {
    #[inline]
    fn normalize(&self) -> u64 {
        self.as_slice().normalize()
    }
}

impl<'a, T: Normalize + ?Sized> Normalize for &'a T {
    #[inline]
    fn normalize(&self) -> u64 {
        (**self).normalize()
    }
}

/// One member of the universal hash family.
///
/// Parameters are drawn at random on construction and re-drawn each time the
/// owning table doubles, which bounds adversarial collision sequences in the
/// usual universal-hashing sense. The parameters are explicit state rather
/// than a captured closure, so reseeding is an observable transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniversalHasher {
    a: u64,
    b: u64,
    p: u64,
}

impl UniversalHasher {
    /// Draw a fresh `(a, b, p)` triple.
    ///
    /// # Arguments
    /// * `rng` - Source of randomness
    /// * `prime_range` - Half-open range the prime modulus is drawn from
    pub fn draw<R: Rng>(rng: &mut R, prime_range: (u64, u64)) -> Self {
        let p = random_prime(rng, prime_range);
        let a = rng.gen_range(1..p);
        let b = rng.gen_range(0..p);
        UniversalHasher { a, b, p }
    }

    /// Hash a normalized key to `[0, p)`.
    ///
    /// The caller reduces the result modulo its bucket count. Arithmetic is
    /// done in `u128` so `a·x` cannot overflow.
    #[inline]
    pub fn hash(&self, normalized: u64) -> u64 {
        ((self.a as u128 * normalized as u128 + self.b as u128) % self.p as u128) as u64
    }

    /// The prime modulus currently in use.
    pub fn prime(&self) -> u64 {
        self.p
    }
}

/// Draw a uniformly random prime from the half-open range.
///
/// Rejection-samples candidates and tests each with deterministic
/// Miller-Rabin. Panics if the range is malformed; loops forever if the
/// range contains no prime, so callers validate their ranges up front.
pub fn random_prime<R: Rng>(rng: &mut R, range: (u64, u64)) -> u64 {
    let (lo, hi) = range;
    assert!(lo >= 2 && hi > lo, "prime range must satisfy 2 <= lo < hi");

    loop {
        let candidate = rng.gen_range(lo..hi);
        if is_prime(candidate) {
            return candidate;
        }
    }
}

/// Deterministic Miller-Rabin, exact for all `u64`.
fn is_prime(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if n < 2 {
        return false;
    }
    for &w in &WITNESSES {
        if n == w {
            return true;
        }
        if n % w == 0 {
            return false;
        }
    }

    // n - 1 = d · 2^r with d odd
    let mut d = n - 1;
    let mut r = 0;
    while d % 2 == 0 {
        d /= 2;
        r += 1;
    }

    'witness: for &w in &WITNESSES {
        let mut x = pow_mod(w, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 0..r - 1 {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[inline]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    (a as u128 * b as u128 % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    base %= m;
    while exp > 0 {
        if exp % 2 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp /= 2;
    }
    result
}
