use log::{debug, trace};
use num::{BigUint, One};
use rand::RngCore;

use crate::factor::{is_probable_prime, prime_divisors};
use crate::{AmmError, Result};

/// A source of uniform integers. Anything implementing `rand::RngCore` is one; tests substitute
/// scripted implementations to drive the rejection loop deterministically.
pub trait RangeSampler {
    /// Returns a uniformly random integer in `[low, high]`.
    fn sample_inclusive(&mut self, low: &BigUint, high: &BigUint) -> BigUint;
}

impl<R: RngCore + ?Sized> RangeSampler for R {
    fn sample_inclusive(&mut self, low: &BigUint, high: &BigUint) -> BigUint {
        rand_range_inclusive_from_rng(low, high, self)
    }
}

pub(crate) fn rand_range_inclusive_from_rng<R: RngCore + ?Sized>(
    low: &BigUint,
    high: &BigUint,
    rng: &mut R,
) -> BigUint {
    assert!(low <= high, "Empty range");
    let span = high - low + 1u32;

    // Our approach is to repeatedly generate random byte strings with as many bits as the span
    // until one of them happens to be below it. Each attempt succeeds with probability > 1/2.
    let bits = span.bits();
    let num_bytes = ((bits + 7) / 8) as usize;
    let bits_to_strip = num_bytes as u64 * 8 - bits;

    let mut bytes = vec![0u8; num_bytes];
    loop {
        rng.fill_bytes(&mut bytes);
        if let Some(top) = bytes.last_mut() {
            *top >>= bits_to_strip;
        }
        let candidate = BigUint::from_bytes_le(&bytes);
        if candidate < span {
            return low + candidate;
        }
    }
}

/// An element `c` of order dividing `r^s`, together with `a = c^(r^(s - 1)) != 1`. When `s >= 2`,
/// `a` has order exactly `r`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootOfUnityPair {
    pub a: BigUint,
    pub c: BigUint,
}

/// Rejection-samples `rho` in `[1, q - 1]` until `a = rho^(t * r^(s - 1))` has order exactly `r`.
///
/// When `s = 1` the refinement loop never consults `a`, and when `r` is prime every `a != 1` has
/// order `r`; in both cases only `a != 1` is checked and `r` is never factored.
///
/// With `max_attempts` set to `None` the loop is unbounded; a degenerate sampler, or a composite
/// `q`, can then make it spin forever.
pub fn find_a_and_c<S: RangeSampler + ?Sized>(
    t: &BigUint,
    r: &BigUint,
    s: u32,
    q: &BigUint,
    sampler: &mut S,
    max_attempts: Option<u64>,
) -> Result<RootOfUnityPair> {
    assert!(s >= 1, "r must divide q - 1");

    let one = BigUint::one();
    let q_minus_1 = q - 1u32;
    let r_to_s_minus_1 = r.pow(s - 1);
    // a has order exactly r iff a^(r/p) != 1 for every prime p dividing r.
    let cofactors: Vec<BigUint> = if s == 1 || is_probable_prime(r) {
        vec![one.clone()]
    } else {
        prime_divisors(r).iter().map(|p| r / p).collect()
    };

    let mut attempts = 0u64;
    loop {
        if let Some(max) = max_attempts {
            if attempts >= max {
                return Err(AmmError::SamplingExhausted {
                    r: r.clone(),
                    attempts,
                });
            }
        }
        attempts += 1;

        let rho = sampler.sample_inclusive(&one, &q_minus_1);
        let c = rho.modpow(t, q);
        let a = c.modpow(&r_to_s_minus_1, q);
        if cofactors.iter().all(|e| a.modpow(e, q) != one) {
            debug!("Found a = {} and c = {} after {} attempt(s)", a, c, attempts);
            return Ok(RootOfUnityPair { a, c });
        }
        trace!("Rejected rho = {}", rho);
    }
}
