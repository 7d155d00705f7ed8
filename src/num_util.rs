use num::{BigInt, BigUint, Integer, One, Signed, Zero};

use crate::{AmmError, Result};

fn egcd(a: BigInt, b: BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());
    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_x = &old_x - &quotient * &x;
        old_x = std::mem::replace(&mut x, next_x);
        let next_y = &old_y - &quotient * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }
    (old_r, old_x, old_y)
}

/// Computes `a^-1 mod m`, or `None` if `a` and `m` are not coprime.
pub fn modinv(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let m_bigint = BigInt::from(m.clone());
    let (g, x, _y) = egcd(BigInt::from(a % m), m_bigint.clone());
    if g.abs().is_one() {
        x.mod_floor(&m_bigint).to_biguint()
    } else {
        None
    }
}

/// Finds the least positive `u` with `r * u = 1 (mod t)`.
pub fn find_u(t: &BigUint, r: &BigUint) -> Result<BigUint> {
    // Every integer is congruent to 1 modulo 1.
    if t.is_one() {
        return Ok(BigUint::one());
    }
    modinv(r, t).ok_or_else(|| AmmError::DegreeNotCoprime {
        r: r.clone(),
        t: t.clone(),
    })
}
