//! Computes a tight `[lower, upper]` range for the next undetermined
//! coefficient from the Newton power sums of the roots fixed so far.
//!
//! Grounded line-for-line on `power_sums.c::set_range_from_power_sums`,
//! with its nested `set_lower`/`change_upper_quad`/… helpers reexpressed
//! as methods on `RangeBuilder` holding the shared divisor and weight
//! instead of closures over mutable scratch.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use weil_arith::bigint::{ceil_quad, floor_quad};
use weil_arith::tables::apply_sum_mat;

use crate::context::StaticContext;
use crate::state::DynamicState;
use crate::sturm::{all_roots_real, SturmOutcome};

/// Outcome of one `PowerSumRange::set_range_from_power_sums` call.
pub enum RangeOutcome {
    /// Range computed (possibly a single point); `pol`/`upper`/`sum_col`
    /// have been updated in place. Corresponds to the source's `1`.
    Narrowed,
    /// `[lower, upper]` came out empty; a plain dead end. Corresponds to
    /// the source's `0`.
    Empty,
    /// The real-rootedness test on the divided derivative failed with no
    /// stability information (source's `-1`, i.e. `allRootsReal` itself
    /// returned plain `0`).
    SturmFailedNoInfo,
    /// The real-rootedness test failed with stability magnitude `j` (the
    /// driver may ascend `j` levels); corresponds to the source returning
    /// `-(j+1)`.
    SturmUnstable(u32),
}

/// Reexpression of the source's `set_lower`/`set_upper`/`change_lower`/…
/// closures as methods holding the shared divisor `f` and weight `q`.
struct RangeBuilder<'a> {
    f: &'a BigRational,
    q: &'a BigInt,
    lower: BigInt,
    upper: BigInt,
}

impl<'a> RangeBuilder<'a> {
    fn new(f: &'a BigRational, q: &'a BigInt) -> Self {
        RangeBuilder {
            f,
            q,
            lower: BigInt::zero(),
            upper: BigInt::zero(),
        }
    }

    fn set_lower(&mut self, val: &BigRational) {
        self.lower = ceil_quad(&(val / self.f), None, self.q);
    }
    fn set_upper(&mut self, val: &BigRational) {
        self.upper = floor_quad(&(val / self.f), None, self.q);
    }
    fn set_lower_quad(&mut self, val1: &BigRational, val2: &BigRational) {
        let a = val1 / self.f;
        let b = val2 / self.f;
        self.lower = ceil_quad(&a, Some(&b), self.q);
    }
    fn set_upper_quad(&mut self, val1: &BigRational, val2: &BigRational) {
        let a = val1 / self.f;
        let b = val2 / self.f;
        self.upper = floor_quad(&a, Some(&b), self.q);
    }
    fn change_lower(&mut self, val: &BigRational) {
        let candidate = ceil_quad(&(val / self.f), None, self.q);
        if candidate > self.lower {
            self.lower = candidate;
        }
    }
    fn change_upper(&mut self, val: &BigRational) {
        let candidate = floor_quad(&(val / self.f), None, self.q);
        if candidate < self.upper {
            self.upper = candidate;
        }
    }
    fn change_lower_quad(&mut self, val1: &BigRational, val2: &BigRational) {
        let a = val1 / self.f;
        let b = val2 / self.f;
        let candidate = ceil_quad(&a, Some(&b), self.q);
        if candidate > self.lower {
            self.lower = candidate;
        }
    }
    fn change_upper_quad(&mut self, val1: &BigRational, val2: &BigRational) {
        let a = val1 / self.f;
        let b = val2 / self.f;
        let candidate = floor_quad(&a, Some(&b), self.q);
        if candidate < self.upper {
            self.upper = candidate;
        }
    }
}

fn rat(n: &BigInt) -> BigRational {
    BigRational::from_integer(n.clone())
}

pub fn set_range_from_power_sums(ctx: &StaticContext, st: &mut DynamicState) -> RangeOutcome {
    let d = ctx.d;
    let n = st.n as usize;
    let k = d + 1 - n;

    // Build tpol, the n-th divided derivative of pol: tpol[i] = C(n+i,n)*pol[n+i].
    let tpol: Vec<BigInt> = (0..k)
        .map(|i| &ctx.binom[n + i][n] * &st.pol[n + i])
        .collect();

    match all_roots_real(&tpol) {
        SturmOutcome::Fail(0) => return RangeOutcome::SturmFailedNoInfo,
        SturmOutcome::Fail(j) => return RangeOutcome::SturmUnstable(j),
        SturmOutcome::AllReal => {}
    }

    if k > d {
        return RangeOutcome::Narrowed;
    }

    // Update S_k via Newton's identity.
    let lead = &st.pol[d];
    let mut s_k = -BigRational::new(BigInt::from(k as i64) * &st.pol[d - k], lead.clone());
    for i in 1..k {
        let coeff_ratio = BigRational::new(st.pol[d - i].clone(), lead.clone());
        s_k -= coeff_ratio * &st.sum_col[k - i];
    }
    st.sum_col[k] = s_k;

    let prod = apply_sum_mat(&ctx.sum_mats[k], &st.sum_col);
    let f_value = &ctx.f[n - 1];
    let mut rb = RangeBuilder::new(f_value, &ctx.q);

    // Tier 1: symmetrized bounds.
    let two_d = BigInt::from(2 * d as i64);
    if ctx.q.is_one() {
        let m = rat(&two_d);
        rb.set_lower(&(&prod[0] - &m));
        rb.set_upper(&(&prod[0] + &m));
    } else if k % 2 == 0 {
        let scale = pow_bigint(&ctx.q, (k / 2) as u32);
        let m = rat(&(&two_d * &scale));
        rb.set_lower(&(&prod[0] - &m));
        rb.set_upper(&(&prod[0] + &m));
    } else {
        let scale = pow_bigint(&ctx.q, (k / 2) as u32);
        let m = rat(&(&two_d * &scale));
        rb.set_upper_quad(&prod[0], &m);
        rb.set_lower_quad(&prod[0], &(-&m));
    }
    if rb.lower > rb.upper {
        return RangeOutcome::Empty;
    }

    // Tier 2: endpoint Descartes. Undo one derivative to get the (n-1)-th
    // divided derivative, tpol_full[0..k].
    let mut tpol_full = vec![BigInt::zero(); k + 1];
    tpol_full[0] = st.pol[d - k].clone();
    let n_big = BigInt::from(n as i64);
    for i in 1..=k {
        tpol_full[i] = &tpol[i - 1] * &n_big / BigInt::from(i as i64);
    }
    let minus_k_over_lead = BigRational::new(-BigInt::from(k as i64), lead.clone());

    if ctx.q.is_one() {
        let val_a = eval(&tpol_full, &ctx.a);
        let t1 = &minus_k_over_lead * &val_a;
        if k % 2 == 1 {
            rb.change_upper(&t1);
        } else {
            rb.change_lower(&t1);
        }
        let val_b = eval(&tpol_full, &ctx.b);
        let t1b = &minus_k_over_lead * &val_b;
        rb.change_lower(&t1b);
    } else {
        let (even, odd) = split_even_odd(&tpol_full);
        let four_q = BigInt::from(4) * &ctx.q;
        let t0 = eval(&even, &four_q);
        let t1 = eval(&odd, &four_q) * BigInt::from(2);
        let t1q = &minus_k_over_lead * &t0;
        let t2q = &minus_k_over_lead * &t1;
        rb.change_lower_quad(&t1q, &t2q);
        let neg_t2q = -&t2q;
        if k % 2 == 1 {
            rb.change_upper_quad(&t1q, &neg_t2q);
        } else {
            rb.change_lower_quad(&t1q, &neg_t2q);
        }
    }

    // Zero-modulus shortcut.
    let modulus = &ctx.modlist[n - 1];
    if modulus.is_zero() {
        if rb.lower.is_positive() || rb.upper.is_negative() {
            return RangeOutcome::Empty;
        }
        return finalize(ctx, st, n, k, &BigInt::zero(), &BigInt::zero(), modulus);
    }

    // Tier 3 (q == 1 only).
    if ctx.q.is_one() && rb.lower <= rb.upper && k >= 2 {
        let b_scale = &ctx.b;
        let t1 = &prod[1] + &prod[2];
        let four_d = BigInt::from(4 * d as i64);
        let t2 = rat(&four_d);
        let mut t0 = &t1 - &t2;
        if k == 2 {
            t0 = t0 / rat(b_scale);
        }
        rb.change_lower(&t0);
        let mut t0u = &t1 + &t2;
        if k == 2 {
            t0u = t0u / rat(b_scale);
        }
        rb.change_upper(&t0u);

        let (t1, t2, t3) = (&prod[3], &prod[4], &prod[5]);
        if t3.is_positive() {
            let t0 = t1 - (t2 * t2) / t3;
            rb.change_upper(&t0);
        }
        let t0 = t1 - BigRational::from_integer(BigInt::from(4)) * t2;
        rb.change_lower(&t0);

        let (t1, t2, t3) = (&prod[6], &prod[7], &prod[8]);
        if k % 2 == 0 && t3.is_positive() {
            let t0 = t1 - (t2 * t2) / t3;
            rb.change_upper(&t0);
        } else if k % 2 == 1 && t3.is_negative() {
            let t0 = t1 - (t2 * t2) / t3;
            rb.change_lower(&t0);
        }
        let t0 = t1 + BigRational::from_integer(BigInt::from(4)) * t2;
        if k % 2 == 0 {
            rb.change_lower(&t0);
        } else {
            rb.change_upper(&t0);
        }

        if k % 2 == 0 {
            let t0 = &st.sum_col[k] - BigRational::from_integer(BigInt::from(4)) * &st.sum_col[k - 2];
            rb.change_lower(&t0);
        }
    }
    if rb.lower > rb.upper {
        return RangeOutcome::Empty;
    }

    finalize(ctx, st, n, k, &rb.lower, &rb.upper, modulus)
}

fn finalize(
    ctx: &StaticContext,
    st: &mut DynamicState,
    n: usize,
    k: usize,
    lower: &BigInt,
    upper: &BigInt,
    modulus: &BigInt,
) -> RangeOutcome {
    let old = st.pol[n - 1].clone();
    st.upper[n - 1] = &old + upper * modulus;
    st.sum_col[k] -= &ctx.f[n - 1] * rat(lower);
    st.pol[n - 1] = old + lower * modulus;
    RangeOutcome::Narrowed
}

fn eval(coeffs: &[BigInt], x: &BigInt) -> BigInt {
    let mut acc = BigInt::zero();
    for c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

fn split_even_odd(coeffs: &[BigInt]) -> (Vec<BigInt>, Vec<BigInt>) {
    let even: Vec<BigInt> = coeffs.iter().step_by(2).cloned().collect();
    let odd: Vec<BigInt> = coeffs.iter().skip(1).step_by(2).cloned().collect();
    (even, odd)
}

fn pow_bigint(base: &BigInt, mut exp: u32) -> BigInt {
    let mut result = BigInt::one();
    let mut b = base.clone();
    while exp > 0 {
        if exp & 1 == 1 {
            result = &result * &b;
        }
        b = &b * &b;
        exp >>= 1;
    }
    result
}
