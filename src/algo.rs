use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Extended Euclidian algorithm. Returns `(gcd, s, t)` such that `a*s + b*t = gcd`
#[allow(clippy::many_single_char_names)]
pub fn egcd(a: &BigUint, b: &BigUint) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next);

        let next = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next);

        let next = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next);
    }
    (old_r, old_s, old_t)
}

/// Modulo inverse. Returns `None` if the inverse doesn't exist
pub fn invmod(a: &BigUint, n: &BigUint) -> Option<BigUint> {
    if n.is_zero() {
        return None;
    }
    let (gcd, inverse, _) = egcd(a, n);
    if gcd.is_one() {
        inverse.mod_floor(&BigInt::from(n.clone())).to_biguint()
    } else {
        None
    }
}

/// Computes `base^exp (mod n)`. Zero exponent gives `1 mod n`.
///
/// # Panic
///
/// Panics if `n` is zero, the same way `BigUint::modpow` does.
pub fn pow_mod(base: &BigUint, exp: &BigUint, n: &BigUint) -> BigUint {
    base.modpow(exp, n)
}

/// Number of decimal digits in `n`
pub fn digit_count(n: &BigUint) -> usize {
    n.to_str_radix(10).len()
}

/// Every term is positive and strictly exceeds the sum of all previous terms
pub fn is_superincreasing(seq: &[BigUint]) -> bool {
    let mut sum = BigUint::zero();
    for term in seq {
        if term.is_zero() || *term <= sum {
            return false;
        }
        sum += term;
    }
    true
}
