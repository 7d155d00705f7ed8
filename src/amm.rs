use log::{debug, trace};
use num::{BigUint, One};
use rand::rngs::OsRng;

use crate::{
    discrete_log, ensure_coprime, ensure_residue, factorise, find_a_and_c, find_u,
    validate_parameters, AmmError, Factorisation, Parameters, RangeSampler, Result,
    RootOfUnityPair,
};

/// Tuning knobs for [`extract_root_with_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmmConfig {
    /// Upper bound on the number of candidates the sampler draws. `None` means unbounded.
    pub max_sampling_attempts: Option<u64>,
}

impl AmmConfig {
    pub fn with_max_sampling_attempts(mut self, max_sampling_attempts: u64) -> Self {
        self.max_sampling_attempts = Some(max_sampling_attempts);
        self
    }
}

/// Computes some `x` with `x^r = delta (mod q)`, drawing randomness from the OS.
///
/// `q` is assumed to be prime. Only one of the `r` roots of `delta` is returned; the others are
/// `x` times the `r`-th roots of unity.
pub fn extract_root(params: &Parameters) -> Result<BigUint> {
    extract_root_with_rng(params, &mut OsRng)
}

/// Same as `extract_root` but specifying the source of randomness (useful for seeded RNGs).
pub fn extract_root_with_rng<S: RangeSampler + ?Sized>(
    params: &Parameters,
    sampler: &mut S,
) -> Result<BigUint> {
    extract_root_with_config(params, sampler, &AmmConfig::default())
}

/// The Adleman-Manders-Miller algorithm.
pub fn extract_root_with_config<S: RangeSampler + ?Sized>(
    params: &Parameters,
    sampler: &mut S,
    config: &AmmConfig,
) -> Result<BigUint> {
    let q_minus_1 = validate_parameters(params)?;
    let Parameters { q, delta, r } = params;

    let Factorisation { s, t } = factorise(&q_minus_1, r)?;
    debug!("q - 1 = {}^{} * {}", r, s, t);
    ensure_coprime(r, &t)?;
    ensure_residue(params, &q_minus_1)?;

    let u = find_u(&t, r)?;
    debug!("u = {}", u);
    let RootOfUnityPair { a, mut c } =
        find_a_and_c(&t, r, s, q, sampler, config.max_sampling_attempts)?;

    // Invariant: (delta^u * h)^r = delta * b, and b^(r^(s - i)) = 1 on entry to iteration i.
    let mut b = delta.modpow(&(r * &u - 1u32), q);
    let mut h = BigUint::one();

    for i in 1..s {
        let d = b.modpow(&r.pow(s - 1 - i), q);
        let c_r = c.modpow(r, q);
        if !d.is_one() {
            // d has order dividing r, so it is a power of a. Raising to -log_a(d) is raising to
            // (q - 1) - log_a(d).
            let log = discrete_log(&a, &d, r, q).ok_or_else(|| AmmError::NoDiscreteLog {
                d: d.clone(),
                a: a.clone(),
                q: q.clone(),
            })?;
            let j = &q_minus_1 - log;
            b = b * c_r.modpow(&j, q) % q;
            h = h * c.modpow(&j, q) % q;
        }
        trace!("Iteration {}: d = {}, b = {}, h = {}", i, d, b, h);
        c = c_r;
    }

    Ok(delta.modpow(&u, q) * h % q)
}

#[cfg(test)]
mod tests {
    use num::BigUint;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::{extract_root, extract_root_with_config, AmmConfig, AmmError, Parameters};

    fn check_root(q: u32, delta: u32, r: u32) {
        let root = extract_root(&Parameters::new(q, delta, r)).unwrap();
        let q = BigUint::from(q);
        assert_eq!(
            root.modpow(&BigUint::from(r), &q),
            BigUint::from(delta),
            "q={} delta={} r={}",
            q,
            delta,
            r
        );
    }

    #[test]
    fn test_square_root() {
        check_root(11, 3, 2);
    }

    #[test]
    fn test_cube_root() {
        check_root(7, 6, 3);
    }

    #[test]
    fn test_fourth_root() {
        check_root(13, 3, 4);
    }

    #[test]
    fn test_deep_two_adicity() {
        // 257 - 1 = 2^8; every refinement layer is exercised.
        for x in 1u32..257 {
            check_root(257, x * x % 257, 2);
        }
    }

    #[test]
    fn test_composite_degree_with_deep_factorisation() {
        // 4 | 97 - 1 = 4^2 * 6; but gcd(4, 6) = 2, so q = 193 = 4^3 * 3 + 1 is used instead.
        for x in 1u32..193 {
            check_root(193, x.pow(4) % 193, 4);
        }
    }

    #[test]
    fn test_cube_roots_with_s_equal_to_3() {
        // 109 - 1 = 3^3 * 4.
        for x in 1u32..109 {
            check_root(109, x * x * x % 109, 3);
        }
    }

    #[test]
    fn test_non_residue() {
        let err = extract_root(&Parameters::new(11u32, 2u32, 2u32)).unwrap_err();
        assert_eq!(
            err,
            AmmError::NotResidue {
                delta: BigUint::from(2u32),
                r: BigUint::from(2u32),
                q: BigUint::from(11u32),
            }
        );
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let params = Parameters::new(257u32, 9u32, 2u32);
        let config = AmmConfig::default();
        let x = extract_root_with_config(&params, &mut ChaCha8Rng::seed_from_u64(7), &config);
        let y = extract_root_with_config(&params, &mut ChaCha8Rng::seed_from_u64(7), &config);
        assert_eq!(x.unwrap(), y.unwrap());
    }
}
