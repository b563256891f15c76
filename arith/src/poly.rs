//! A dense, ascending-coefficient integer polynomial and the small set of
//! exact operations the search core needs on it: evaluation, derivative,
//! content, convolution, and synthetic division by a linear factor.
//!
//! Grounded on the container API shape of `field/src/polynomial/mod.rs`
//! (`PolynomialCoeffs<F>`: a `Vec` of coefficients plus `degree`/`trim`/
//! arithmetic-operator impls) and the division style of
//! `field/src/polynomial/division.rs`, but specialized to exact `BigInt`
//! coefficients and synthetic (not generic long) division, since the only
//! division the search path performs is by `(x - a)` for a known root `a`.

use std::ops::{Add, Mul, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// `coeffs[i]` is the coefficient of `x^i`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Polynomial {
    pub coeffs: Vec<BigInt>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<BigInt>) -> Self {
        Polynomial { coeffs }
    }

    pub fn zero(len: usize) -> Self {
        Polynomial::new(vec![BigInt::zero(); len])
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    /// Drops high-degree zero coefficients, leaving at least one entry.
    pub fn trim(&mut self) {
        while self.coeffs.len() > 1 && self.coeffs.last().unwrap().is_zero() {
            self.coeffs.pop();
        }
    }

    /// The coefficient of the highest-degree term. Panics on an empty
    /// polynomial; does not itself trim, so call `trim` first if the
    /// vector may carry high-degree zeros.
    pub fn lead(&self) -> &BigInt {
        self.coeffs.last().expect("lead: empty polynomial")
    }

    /// Evaluate via Horner's method.
    pub fn eval(&self, x: &BigInt) -> BigInt {
        let mut acc = BigInt::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// Formal derivative `P'(x)`.
    pub fn derivative(&self) -> Polynomial {
        if self.coeffs.len() <= 1 {
            return Polynomial::zero(1);
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * BigInt::from(i as u64))
            .collect();
        Polynomial::new(coeffs)
    }

    pub fn scale(&self, c: &BigInt) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|x| x * c).collect())
    }

    /// GCD of all (nonzero) coefficients; `0` for the zero polynomial.
    pub fn content(&self) -> BigInt {
        self.coeffs
            .iter()
            .fold(BigInt::zero(), |acc, c| acc.gcd(c))
    }

    /// Divide every coefficient by `d`, which must divide the content exactly.
    pub fn divide_exact(&self, d: &BigInt) -> Polynomial {
        Polynomial::new(
            self.coeffs
                .iter()
                .map(|c| {
                    debug_assert!(
                        (c % d).is_zero(),
                        "divide_exact: {c} not divisible by {d}"
                    );
                    c / d
                })
                .collect(),
        )
    }

    /// Synthetic division by `(x - a)`: returns `(quotient, remainder)` with
    /// `self = quotient * (x - a) + remainder`. `remainder == self.eval(a)`.
    pub fn divide_linear(&self, a: &BigInt) -> (Polynomial, BigInt) {
        let n = self.coeffs.len();
        if n == 0 {
            return (Polynomial::zero(1), BigInt::zero());
        }
        let mut q = vec![BigInt::zero(); n - 1];
        let mut carry = BigInt::zero();
        for i in (0..n).rev() {
            let cur = &self.coeffs[i] + &carry * a;
            if i > 0 {
                q[i - 1] = cur.clone();
            }
            carry = cur;
        }
        (Polynomial::new(q), carry)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: &Polynomial) -> Polynomial {
        let n = self.len().max(rhs.len());
        let mut out = vec![BigInt::zero(); n];
        for (i, c) in self.coeffs.iter().enumerate() {
            out[i] += c;
        }
        for (i, c) in rhs.coeffs.iter().enumerate() {
            out[i] += c;
        }
        Polynomial::new(out)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: &Polynomial) -> Polynomial {
        let n = self.len().max(rhs.len());
        let mut out = vec![BigInt::zero(); n];
        for (i, c) in self.coeffs.iter().enumerate() {
            out[i] += c;
        }
        for (i, c) in rhs.coeffs.iter().enumerate() {
            out[i] -= c;
        }
        Polynomial::new(out)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if self.is_empty() || rhs.is_empty() {
            return Polynomial::zero(1);
        }
        let mut out = vec![BigInt::zero(); self.len() + rhs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Polynomial::new(out)
    }
}

/// Binomial coefficient `C(n, k)`, `0` when `k > n`.
pub fn binomial(n: u64, k: u64) -> BigInt {
    if k > n {
        return BigInt::zero();
    }
    let k = k.min(n - k);
    let mut result = BigInt::one();
    for i in 0..k {
        result = result * BigInt::from(n - i) / BigInt::from(i + 1);
    }
    result
}

/// The `i`-th Chebyshev polynomial of the first kind, `T_i(cos theta) = cos(i theta)`,
/// built by the standard three-term recurrence `T_i = 2x T_{i-1} - T_{i-2}`.
pub fn chebyshev_t(i: usize) -> Polynomial {
    let mut t_prev = Polynomial::new(vec![BigInt::one()]); // T_0 = 1
    if i == 0 {
        return t_prev;
    }
    let mut t_cur = Polynomial::new(vec![BigInt::zero(), BigInt::one()]); // T_1 = x
    let two_x = Polynomial::new(vec![BigInt::zero(), BigInt::from(2)]);
    for _ in 1..i {
        let next = &(&two_x * &t_cur) - &t_prev;
        t_prev = t_cur;
        t_cur = next;
    }
    t_cur
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bi(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn eval_horner() {
        // 1 + 2x + 3x^2 at x=5 -> 1+10+75 = 86
        let p = Polynomial::new(vec![bi(1), bi(2), bi(3)]);
        assert_eq!(p.eval(&bi(5)), bi(86));
    }

    #[test]
    fn derivative_matches_calculus() {
        // d/dx (1 + 2x + 3x^2) = 2 + 6x
        let p = Polynomial::new(vec![bi(1), bi(2), bi(3)]);
        assert_eq!(p.derivative().coeffs, vec![bi(2), bi(6)]);
    }

    #[test]
    fn divide_linear_matches_eval() {
        // (x-1)(x-2) = x^2 - 3x + 2
        let p = Polynomial::new(vec![bi(2), bi(-3), bi(1)]);
        let (q, r) = p.divide_linear(&bi(1));
        assert_eq!(r, bi(0));
        assert_eq!(q.coeffs, vec![bi(-2), bi(1)]); // x - 2
        let (_, r2) = p.divide_linear(&bi(5));
        assert_eq!(r2, p.eval(&bi(5)));
    }

    #[test]
    fn content_gcd() {
        let p = Polynomial::new(vec![bi(4), bi(6), bi(10)]);
        assert_eq!(p.content(), bi(2));
    }

    #[test]
    fn chebyshev_matches_known_values() {
        // T_0=1, T_1=x, T_2=2x^2-1, T_3=4x^3-3x
        assert_eq!(chebyshev_t(0).coeffs, vec![bi(1)]);
        assert_eq!(chebyshev_t(1).coeffs, vec![bi(0), bi(1)]);
        assert_eq!(chebyshev_t(2).coeffs, vec![bi(-1), bi(0), bi(2)]);
        assert_eq!(chebyshev_t(3).coeffs, vec![bi(0), bi(-3), bi(0), bi(4)]);
    }

    #[test]
    fn binomial_matches_pascal() {
        assert_eq!(binomial(5, 2), bi(10));
        assert_eq!(binomial(5, 0), bi(1));
        assert_eq!(binomial(5, 6), bi(0));
    }

    #[test]
    fn mul_is_convolution() {
        let a = Polynomial::new(vec![bi(1), bi(1)]); // 1+x
        let b = Polynomial::new(vec![bi(1), bi(1)]); // 1+x
        let c = &a * &b; // 1 + 2x + x^2
        assert_eq!(c.coeffs, vec![bi(1), bi(2), bi(1)]);
    }
}
