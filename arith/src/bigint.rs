//! Exact integer/rational primitives: floor-sqrt, ceil-sqrt, and floor/ceil
//! of expressions of the form `a + b*sqrt(q)` in the quadratic field
//! `Q(sqrt(q))`, computed without ever approximating `sqrt(q)`.
//!
//! Grounded on `power_sums.c`'s `fmpz_sqrt_f`/`fmpz_sqrt_c` and
//! `fmpq_floor_quad`/`fmpq_ceil_quad`. FLINT's `fmpq` supports
//! non-canonical values (numerator/denominator not coprime, or a negative
//! denominator); `num_rational::BigRational` always reduces to a positive
//! denominator, so the sign bookkeeping here relies on that invariant
//! rather than re-deriving it from scratch.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// Largest integer `r` with `r*r <= n`. Panics if `n` is negative.
pub fn isqrt_floor(n: &BigInt) -> BigInt {
    let u = n
        .to_biguint()
        .expect("isqrt_floor: argument must be nonnegative");
    BigInt::from(u.sqrt())
}

/// Smallest integer `r` with `r*r >= n`. Panics if `n` is negative.
pub fn isqrt_ceil(n: &BigInt) -> BigInt {
    let r = isqrt_floor(n);
    if &r * &r == *n {
        r
    } else {
        r + BigInt::one()
    }
}

/// `floor(num / den)` for any sign of `den`.
pub fn div_floor(num: &BigInt, den: &BigInt) -> BigInt {
    num.div_floor(den)
}

/// `ceil(num / den)` for any sign of `den`, via `ceil(x) = -floor(-x)`.
pub fn div_ceil(num: &BigInt, den: &BigInt) -> BigInt {
    -(-num).div_floor(den)
}

fn floor_rational(a: &BigRational) -> BigInt {
    div_floor(a.numer(), a.denom())
}

fn ceil_rational(a: &BigRational) -> BigInt {
    div_ceil(a.numer(), a.denom())
}

/// `floor(a + b*sqrt(q))`, `b = None` meaning `b = 0`. `q >= 1`.
pub fn floor_quad(a: &BigRational, b: Option<&BigRational>, q: &BigInt) -> BigInt {
    quad_bound(a, b, q, false)
}

/// `ceil(a + b*sqrt(q))`, `b = None` meaning `b = 0`. `q >= 1`.
pub fn ceil_quad(a: &BigRational, b: Option<&BigRational>, q: &BigInt) -> BigInt {
    quad_bound(a, b, q, true)
}

fn quad_bound(a: &BigRational, b: Option<&BigRational>, q: &BigInt, ceil: bool) -> BigInt {
    let b = match b {
        Some(b) if !b.is_zero() => b,
        _ => {
            return if ceil {
                ceil_rational(a)
            } else {
                floor_rational(a)
            }
        }
    };
    let anum = a.numer();
    let aden = a.denom();
    let bnum = b.numer();
    let bden = b.denom();

    // a + b*sqrt(q) = (anum*bden + bnum*aden*sqrt(q)) / (aden*bden), and
    // bnum*aden*sqrt(q) = sign(bnum*aden) * sqrt((bnum*aden)^2 * q); aden, bden
    // are always positive since `BigRational` keeps denominators canonical.
    let cross = aden * bnum;
    let root_arg = &cross * &cross * q;
    let positive = bnum.sign() != Sign::Minus;
    let term = match (positive, ceil) {
        (true, false) => isqrt_floor(&root_arg),
        (true, true) => isqrt_ceil(&root_arg),
        (false, false) => -isqrt_ceil(&root_arg),
        (false, true) => -isqrt_floor(&root_arg),
    };
    let numerator = anum * bden + term;
    let denom = aden * bden;
    if ceil {
        div_ceil(&numerator, &denom)
    } else {
        div_floor(&numerator, &denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bi(n: i64) -> BigInt {
        BigInt::from(n)
    }
    fn br(n: i64, d: i64) -> BigRational {
        BigRational::new(bi(n), bi(d))
    }

    #[test]
    fn isqrt_perfect_and_not() {
        assert_eq!(isqrt_floor(&bi(16)), bi(4));
        assert_eq!(isqrt_ceil(&bi(16)), bi(4));
        assert_eq!(isqrt_floor(&bi(17)), bi(4));
        assert_eq!(isqrt_ceil(&bi(17)), bi(5));
        assert_eq!(isqrt_floor(&bi(0)), bi(0));
    }

    #[test]
    fn div_floor_ceil_negative_numerator() {
        assert_eq!(div_floor(&bi(-7), &bi(2)), bi(-4));
        assert_eq!(div_ceil(&bi(-7), &bi(2)), bi(-3));
        assert_eq!(div_floor(&bi(7), &bi(2)), bi(3));
        assert_eq!(div_ceil(&bi(7), &bi(2)), bi(4));
    }

    #[test]
    fn quad_bounds_q1_reduces_to_plain_floor_ceil() {
        // sqrt(1) = 1, so a + b*sqrt(1) = a+b exactly.
        let a = br(5, 2); // 2.5
        let b = br(1, 1); // 1
        let q = bi(1);
        assert_eq!(floor_quad(&a, Some(&b), &q), bi(3));
        assert_eq!(ceil_quad(&a, Some(&b), &q), bi(4));
    }

    #[test]
    fn quad_bounds_irrational() {
        // 1 + sqrt(2) ~= 2.4142...
        let a = br(1, 1);
        let b = br(1, 1);
        let q = bi(2);
        assert_eq!(floor_quad(&a, Some(&b), &q), bi(2));
        assert_eq!(ceil_quad(&a, Some(&b), &q), bi(3));

        // -2*sqrt(2) ~= -2.828...
        let a = BigRational::zero();
        let b = br(-2, 1);
        assert_eq!(floor_quad(&a, Some(&b), &q), bi(-3));
        assert_eq!(ceil_quad(&a, Some(&b), &q), bi(-2));
    }

    #[test]
    fn quad_bound_with_no_sqrt_term() {
        let a = br(7, 3);
        assert_eq!(floor_quad(&a, None, &bi(5)), bi(2));
        assert_eq!(ceil_quad(&a, None, &bi(5)), bi(3));
    }
}
