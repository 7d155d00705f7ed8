use num::{BigUint, Integer, One, Zero};

use crate::{AmmError, Result};

/// The inputs to a root extraction: find `x` with `x^r = delta (mod q)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameters {
    /// The prime modulus. Primality is assumed, not checked.
    pub q: BigUint,
    /// The residue whose root is sought, in `[1, q)`.
    pub delta: BigUint,
    /// The root degree, which must divide `q - 1`.
    pub r: BigUint,
}

impl Parameters {
    pub fn new<Q, D, R>(q: Q, delta: D, r: R) -> Self
    where
        Q: Into<BigUint>,
        D: Into<BigUint>,
        R: Into<BigUint>,
    {
        Parameters {
            q: q.into(),
            delta: delta.into(),
            r: r.into(),
        }
    }
}

/// Rejects malformed triples, returning `q - 1` on success. The checks run in a fixed order:
/// the range of `delta` first, then the degree.
pub fn validate_parameters(params: &Parameters) -> Result<BigUint> {
    let Parameters { q, delta, r } = params;

    if delta.is_zero() {
        return Err(AmmError::DeltaTooSmall {
            delta: delta.clone(),
        });
    }
    if delta >= q {
        return Err(AmmError::DeltaTooLarge {
            delta: delta.clone(),
            q: q.clone(),
        });
    }
    // r = 0 would divide by zero and r = 1 would never stop factorising.
    if r <= &BigUint::one() {
        return Err(AmmError::DegreeTooSmall { r: r.clone() });
    }

    // delta >= 1 and q > delta, so q >= 2.
    let q_minus_1 = q - 1u32;
    if !(&q_minus_1 % r).is_zero() {
        return Err(AmmError::DegreeNotDividing {
            r: r.clone(),
            q_minus_1,
        });
    }
    Ok(q_minus_1)
}

/// Checks that `r` is invertible modulo the non-`r` part `t` of `q - 1`.
pub fn ensure_coprime(r: &BigUint, t: &BigUint) -> Result<()> {
    if r.gcd(t).is_one() {
        Ok(())
    } else {
        Err(AmmError::DegreeNotCoprime {
            r: r.clone(),
            t: t.clone(),
        })
    }
}

/// Generalised Euler criterion: `delta` has an `r`-th root iff `delta^((q - 1) / r) = 1`.
pub fn ensure_residue(params: &Parameters, q_minus_1: &BigUint) -> Result<()> {
    let Parameters { q, delta, r } = params;
    if delta.modpow(&(q_minus_1 / r), q).is_one() {
        Ok(())
    } else {
        Err(AmmError::NotResidue {
            delta: delta.clone(),
            r: r.clone(),
            q: q.clone(),
        })
    }
}
