//! Real-rootedness tests via a signed pseudoremainder (Sturm-like) chain
//! over exact integers.
//!
//! Grounded line-for-line on `all_roots_in_interval.c`'s
//! `_fmpz_poly_all_roots_in_interval` (operation A) and
//! `_fmpz_poly_all_roots_real` (operation B).

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::Zero;

/// Result of a real-rootedness test. `Fail(0)` is the plain "no" with no
/// stability claim; `Fail(j)` for `j >= 1` means the failure is stable
/// under any perturbation of coefficients of degree `< j` (source
/// returns `-j`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SturmOutcome {
    AllReal,
    Fail(u32),
}

fn sign_of(x: &BigInt) -> i32 {
    match x.sign() {
        Sign::Minus => -1,
        Sign::NoSign => 0,
        Sign::Plus => 1,
    }
}

fn horner(coeffs: &[BigInt], x: &BigInt) -> BigInt {
    let mut acc = BigInt::zero();
    for c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

fn derivative(coeffs: &[BigInt]) -> Vec<BigInt> {
    if coeffs.len() <= 1 {
        return vec![BigInt::zero()];
    }
    coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| c * BigInt::from(i as u64))
        .collect()
}

/// Synthetic division of `coeffs` by `(x - root)`, returning the
/// quotient (one shorter).
fn deflate(coeffs: &[BigInt], root: &BigInt) -> Vec<BigInt> {
    let n = coeffs.len();
    let mut q = vec![BigInt::zero(); n - 1];
    let mut carry = BigInt::zero();
    for i in (0..n).rev() {
        let cur = &coeffs[i] + &carry * root;
        if i > 0 {
            q[i - 1] = cur.clone();
        }
        carry = cur;
    }
    q
}

fn content(coeffs: &[BigInt]) -> BigInt {
    coeffs.iter().fold(BigInt::zero(), |acc, c| acc.gcd(c))
}

/// `allRootsInInterval`: does `poly` (ascending coefficients, `len >= 2`,
/// nonzero leading coefficient) have all its real roots in `[a, b]`?
/// Only ever returns `AllReal` or `Fail(0)` (the source never derives a
/// stronger perturbation bound for this entry point).
pub fn all_roots_in_interval(poly: &[BigInt], a: &BigInt, b: &BigInt) -> SturmOutcome {
    let mut f0 = poly.to_vec();
    let mut val0_a = horner(&f0, a);
    while val0_a.is_zero() {
        f0 = deflate(&f0, a);
        val0_a = horner(&f0, a);
    }
    let mut val0_b = horner(&f0, b);
    let c_const = a - b;
    while val0_b.is_zero() {
        f0 = deflate(&f0, b);
        // f0(a) changes by a factor of (a-b) each time a (x-b) factor is removed.
        val0_a = &val0_a / &c_const;
        val0_b = horner(&f0, b);
    }
    if f0.len() == 1 {
        return SturmOutcome::AllReal;
    }

    let mut f1 = derivative(&f0);
    let mut val1_a = horner(&f1, a);
    let mut val1_b = horner(&f1, b);
    let mut sgn0_a = sign_of(&val0_a);
    let sgn0_b = sign_of(&val0_b);

    loop {
        sgn0_a = -sgn0_a;
        if sign_of(&val1_a) != sgn0_a || sign_of(&val1_b) != sgn0_b {
            return SturmOutcome::Fail(0);
        }

        let n = f1.len(); // invariant: f0.len() == n + 1
        let l0 = f0[n].clone();
        let l1 = f1[n - 1].clone();

        let mut f2 = vec![BigInt::zero(); n];
        for j in 1..n {
            f2[j] = &l0 * &f1[j - 1];
        }
        for j in 0..n {
            f2[j] -= &l1 * &f0[j];
        }
        let c = -&f2[n - 1];
        for j in 0..(n - 1) {
            f2[j] = &f2[j] * &l1 + &c * &f1[j];
        }
        f2.truncate(n - 1);

        if f2.iter().all(|x| x.is_zero()) {
            return SturmOutcome::AllReal;
        }
        let new_n = n - 1;
        if f2[new_n - 1].is_zero() {
            return SturmOutcome::Fail(0);
        }

        let d = content(&f2);
        let val2_a = (&c * &val1_a + &l1 * (&l0 * &val1_a * a - &l1 * &val0_a)) / &d;
        let val2_b = (&c * &val1_b + &l1 * (&l0 * &val1_b * b - &l1 * &val0_b)) / &d;
        let new_f1: Vec<BigInt> = f2.into_iter().map(|c| c / &d).collect();

        val0_a = val1_a;
        val0_b = val1_b;
        f0 = f1;
        f1 = new_f1;
        val1_a = val2_a;
        val1_b = val2_b;
    }
}

/// `allRootsReal`: does `poly` have all real roots (anywhere)? Can return
/// a perturbation-stable `Fail(j)` with `j >= 1`.
pub fn all_roots_real(poly: &[BigInt]) -> SturmOutcome {
    if poly.len() == 1 {
        return SturmOutcome::AllReal;
    }
    let n0 = (poly.len() - 1) as i64;
    let mut f0 = poly.to_vec();
    let mut f1 = derivative(&f0);
    let mut n = f1.len(); // invariant: f0.len() == n+1

    let mut sgn0_l = sign_of(&f0[n]);

    loop {
        let sgn1_l = sign_of(&f1[n - 1]);
        if sgn1_l == 0 {
            return SturmOutcome::Fail(0);
        }
        if sgn1_l != sgn0_l {
            let j = 2 * n as i64 - n0 + 1;
            return if j > 0 {
                SturmOutcome::Fail(j as u32)
            } else {
                SturmOutcome::Fail(0)
            };
        }

        let l0 = f0[n].clone();
        let l1 = f1[n - 1].clone();
        let mut f2 = vec![BigInt::zero(); n];
        for j in 1..n {
            f2[j] = &l0 * &f1[j - 1];
        }
        for j in 0..n {
            f2[j] -= &l1 * &f0[j];
        }
        let c = f2[n - 1].clone();
        for j in 0..(n - 1) {
            f2[j] = &f2[j] * &l1 - &c * &f1[j];
        }
        f2.truncate(n - 1);

        if f2.iter().all(|x| x.is_zero()) {
            return SturmOutcome::AllReal;
        }
        n -= 1;
        let d = content(&f2);
        let new_f0: Vec<BigInt> = f2.into_iter().map(|c| c / &d).collect();

        f0 = f1;
        f1 = new_f0;
        sgn0_l = sign_of(&f0[n]);
    }
}
