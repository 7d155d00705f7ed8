use std::collections::HashMap;

use num::{BigUint, One, Zero};

/// Finds the least `j` in `[0, order)` with `base^j = target (mod q)`, using baby-step giant-step
/// in `O(sqrt(order))` multiplications and memory. `base` must satisfy `base^order = 1`.
///
/// Returns `None` if `target` is not in the subgroup generated by `base`.
pub fn discrete_log(
    base: &BigUint,
    target: &BigUint,
    order: &BigUint,
    q: &BigUint,
) -> Option<BigUint> {
    if order.is_zero() {
        return None;
    }
    let target = target % q;
    if target.is_one() {
        return Some(BigUint::zero());
    }

    // m = ceil(sqrt(order)), so m^2 >= order and every exponent is i * m + j with i, j < m.
    let mut m = order.sqrt();
    if &m * &m < *order {
        m += 1u32;
    }

    // Baby steps: base^j -> j. Keep the smallest j for each value.
    let mut baby_steps = HashMap::new();
    let mut power = BigUint::one();
    let mut j = BigUint::zero();
    while j < m {
        baby_steps.entry(power.clone()).or_insert_with(|| j.clone());
        power = power * base % q;
        j += 1u32;
    }

    // Giant steps multiply by base^-m, which is base^(order - m) since base^order = 1.
    let giant_step = base.modpow(&(order - &m), q);
    let mut gamma = target;
    let mut i = BigUint::zero();
    while i < m {
        if let Some(j) = baby_steps.get(&gamma) {
            let log = &i * &m + j;
            return if log < *order { Some(log) } else { None };
        }
        gamma = gamma * &giant_step % q;
        i += 1u32;
    }
    None
}
