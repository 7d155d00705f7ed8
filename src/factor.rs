use num::{BigUint, Integer, One, Zero};

use crate::{AmmError, Result};

/// `n = r^s * t` with `t` not divisible by `r`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factorisation {
    pub s: u32,
    pub t: BigUint,
}

/// Splits `n` into its `r`-power part and the remaining cofactor. Fails if `n` is zero or `r < 2`,
/// for which the division loop would never terminate.
pub fn factorise(n: &BigUint, r: &BigUint) -> Result<Factorisation> {
    if r <= &BigUint::one() {
        return Err(AmmError::DegreeTooSmall { r: r.clone() });
    }
    if n.is_zero() {
        return Err(AmmError::ZeroFactorisation { r: r.clone() });
    }

    let mut s = 0;
    let mut t = n.clone();
    loop {
        let (quotient, remainder) = t.div_rem(r);
        if !remainder.is_zero() {
            return Ok(Factorisation { s, t });
        }
        t = quotient;
        s += 1;
    }
}

/// Returns the distinct prime divisors of `n` in increasing order, by trial division.
pub(crate) fn prime_divisors(n: &BigUint) -> Vec<BigUint> {
    let mut divisors = Vec::new();
    let mut n = n.clone();
    let mut p = BigUint::from(2u32);
    while &p * &p <= n {
        if (&n % &p).is_zero() {
            while (&n % &p).is_zero() {
                n /= &p;
            }
            divisors.push(p.clone());
        }
        p += 1u32;
    }
    if n > BigUint::one() {
        divisors.push(n);
    }
    divisors
}

const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Miller-Rabin with the first twelve primes as witnesses. Deterministic below 3.3 * 10^24; above
/// that a composite passes with probability at most 4^-12.
pub(crate) fn is_probable_prime(n: &BigUint) -> bool {
    if n < &BigUint::from(2u32) {
        return false;
    }
    for &p in WITNESSES.iter() {
        if (n % p).is_zero() {
            return n == &BigUint::from(p);
        }
    }

    // n - 1 = 2^s * d with d odd.
    let n_minus_1 = n - 1u32;
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;

    'witness: for &a in WITNESSES.iter() {
        let mut x = BigUint::from(a).modpow(&d, n);
        if x.is_one() || x == n_minus_1 {
            continue;
        }
        for _ in 1..s {
            x = &x * &x % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use num::{BigUint, One, Zero};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::factor::{is_probable_prime, prime_divisors};
    use crate::{factorise, AmmError, Factorisation};

    fn biguints(xs: &[u32]) -> Vec<BigUint> {
        xs.iter().map(|&x| BigUint::from(x)).collect()
    }

    #[test]
    fn test_factorise() {
        let f = factorise(&BigUint::from(12u32), &BigUint::from(2u32)).unwrap();
        assert_eq!(
            f,
            Factorisation {
                s: 2,
                t: BigUint::from(3u32)
            }
        );
    }

    #[test]
    fn test_factorise_no_r_part() {
        let f = factorise(&BigUint::from(10u32), &BigUint::from(3u32)).unwrap();
        assert_eq!(f.s, 0);
        assert_eq!(f.t, BigUint::from(10u32));
    }

    #[test]
    fn test_factorise_large_exponent() {
        // 2^200 * 3
        let n = (BigUint::one() << 200) * 3u32;
        let f = factorise(&n, &BigUint::from(2u32)).unwrap();
        assert_eq!(f.s, 200);
        assert_eq!(f.t, BigUint::from(3u32));
    }

    #[test]
    fn test_factorise_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..1000 {
            let n = BigUint::from(rng.gen_range(1u64, 1 << 40));
            let r = BigUint::from(rng.gen_range(2u32, 50));
            let Factorisation { s, t } = factorise(&n, &r).unwrap();
            assert_eq!(r.pow(s) * &t, n);
            assert!(!(&t % &r).is_zero());
        }
    }

    #[test]
    fn test_factorise_degenerate_inputs() {
        let err = factorise(&BigUint::from(12u32), &BigUint::one()).unwrap_err();
        assert_eq!(err, AmmError::DegreeTooSmall { r: BigUint::one() });

        let err = factorise(&BigUint::zero(), &BigUint::from(2u32)).unwrap_err();
        assert_eq!(err.to_string(), "cannot factorise 0 by r (2)");
    }

    #[test]
    fn test_is_probable_prime() {
        let primes: Vec<u32> = (0u32..200)
            .filter(|&n| n >= 2 && (2..n).all(|d| n % d != 0))
            .collect();
        for n in 0u32..200 {
            assert_eq!(
                is_probable_prime(&BigUint::from(n)),
                primes.contains(&n),
                "n={}",
                n
            );
        }

        // Carmichael numbers.
        for &n in &[561u32, 1105, 1729, 41041, 825265] {
            assert!(!is_probable_prime(&BigUint::from(n)));
        }

        let p: BigUint = "1267650600228229401496703206331".parse().unwrap();
        assert!(is_probable_prime(&p));
        assert!(!is_probable_prime(&(&p * 3u32)));
        assert!(is_probable_prime(&((BigUint::one() << 127) - 1u32)));
    }

    #[test]
    fn test_prime_divisors() {
        assert_eq!(prime_divisors(&BigUint::from(2u32)), biguints(&[2]));
        assert_eq!(prime_divisors(&BigUint::from(12u32)), biguints(&[2, 3]));
        assert_eq!(prime_divisors(&BigUint::from(97u32)), biguints(&[97]));
        assert_eq!(prime_divisors(&BigUint::from(1024u32)), biguints(&[2]));
        assert_eq!(
            prime_divisors(&BigUint::from(2 * 3 * 5 * 7 * 49u32)),
            biguints(&[2, 3, 5, 7])
        );
    }
}
