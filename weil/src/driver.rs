//! The depth-first search state machine tying `sturm.rs`, `power_sums.rs`
//! and `state.rs` together, plus the final symmetrized-polynomial output
//! composition.
//!
//! Grounded line-for-line on `power_sums.c::next_pol`'s ascend/descend/
//! sibling-step loop.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::context::StaticContext;
use crate::power_sums::{set_range_from_power_sums, RangeOutcome};
use crate::state::DynamicState;

/// Outcome of one `next_pol` call. `Found` leaves the composed output in
/// `DynamicState::sympol`; both `Found` and `NodeLimit` leave the state
/// resumable by calling `next_pol` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOutcome {
    Found,
    Done,
    NodeLimit,
}

/// Runs the search forward from `st` until it produces a solution,
/// exhausts the tree, or hits `ctx.node_limit`.
pub fn next_pol(ctx: &StaticContext, st: &mut DynamicState) -> DriverOutcome {
    let d = ctx.d as i64;
    if st.n > d {
        return DriverOutcome::Done;
    }

    let mut n = st.n;
    let mut ascend = st.ascend;
    let mut count = st.count;
    // Mirrors the C's `i = dy_data->n` read just before it is overwritten:
    // on entry this equals `n`, so the very first range computation of a
    // call is never mistaken for a revisit.
    let mut last_n = n;

    let outcome = loop {
        if ascend > 0 {
            n += 1;
            if n > d {
                break DriverOutcome::Done;
            }
        } else {
            let i = last_n;
            last_n = n;
            st.n = n;
            match set_range_from_power_sums(ctx, st) {
                RangeOutcome::Narrowed => {
                    n -= 1;
                    if n < 0 {
                        compose_sympol(ctx, st);
                        break DriverOutcome::Found;
                    }
                    continue;
                }
                other => {
                    count += 1;
                    if let Some(limit) = ctx.node_limit {
                        if count >= limit {
                            break DriverOutcome::NodeLimit;
                        }
                    }
                    match other {
                        RangeOutcome::SturmUnstable(j) => {
                            ascend = j;
                            log::trace!("n={n}: sturm-unstable, ascend={j}");
                            continue;
                        }
                        RangeOutcome::SturmFailedNoInfo if i < n => {
                            ascend = 1;
                            log::trace!("n={n}: revisit with no stability info, ascend=1");
                            continue;
                        }
                        RangeOutcome::Empty | RangeOutcome::SturmFailedNoInfo => {}
                        RangeOutcome::Narrowed => unreachable!(),
                    }
                }
            }
        }

        // Sibling step: advance pol[n] to its next candidate value, or
        // mark this level exhausted.
        if ascend > 1 {
            ascend -= 1;
        } else if ctx.modlist[n as usize].is_zero() {
            ascend = 1;
        } else {
            st.pol[n as usize] += &ctx.modlist[n as usize];
            if st.pol[n as usize] > st.upper[n as usize] {
                ascend = 1;
            } else {
                ascend = 0;
                let k = (d - n) as usize;
                st.sum_col[k] -= &ctx.f[n as usize];
            }
        }
    };

    st.n = n;
    st.ascend = if n < 0 { 1 } else { 0 };
    st.count = count;
    outcome
}

/// Builds `sympol` from the fully-determined `pol[0..=d]`: the reciprocal
/// substitution `y = x + q/x` undone term by term, then the outer `sign`
/// and `cofactor` applied. Grounded on `power_sums.c::next_pol`'s
/// solution-output block.
fn compose_sympol(ctx: &StaticContext, st: &mut DynamicState) {
    let d = ctx.d;
    for v in st.sympol.iter_mut() {
        *v = BigInt::zero();
    }

    for i in 0..=d {
        let mut temp = BigInt::one();
        for j in 0..=i {
            let idx = d + i - 2 * j;
            st.sympol[idx] += &st.pol[i] * &temp;
            if j < i {
                temp *= &ctx.q;
                temp *= BigInt::from((i - j) as i64);
                temp /= BigInt::from((j + 1) as i64);
            }
        }
    }

    let sign = BigInt::from(ctx.sign as i64);
    for v in st.sympol[0..=2 * d].iter_mut() {
        *v *= &sign;
    }

    let convolved = convolve(&st.sympol[0..=2 * d], &ctx.cofactor_poly.coeffs);
    st.sympol[..convolved.len()].clone_from_slice(&convolved);
}

fn convolve(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    let mut out = vec![BigInt::zero(); a.len() + b.len() - 1];
    for (i, ai) in a.iter().enumerate() {
        if ai.is_zero() {
            continue;
        }
        for (j, bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaticContext;
    use std::collections::BTreeSet;

    fn enumerate_all(ctx: &StaticContext) -> Vec<Vec<BigInt>> {
        let mut st = DynamicState::new(ctx, &[]);
        let mut out = Vec::new();
        loop {
            match next_pol(ctx, &mut st) {
                DriverOutcome::Found => out.push(st.sympol.clone()),
                DriverOutcome::Done => break,
                DriverOutcome::NodeLimit => panic!("unexpected node limit in unbounded test"),
            }
        }
        out
    }

    #[test]
    fn s1_degree_one_weight_one_yields_five_solutions() {
        let ctx = StaticContext::new(1, 1, 1, 1, 0, &[1, 1], None).unwrap();
        let sols = enumerate_all(&ctx);
        assert_eq!(sols.len(), 5);
        // Every solution is x^2+b*x+1 with b in [-2,2]: sympol[0]=1, sympol[2]=1.
        let mut bs: BTreeSet<BigInt> = BTreeSet::new();
        for sol in &sols {
            assert_eq!(sol[0], BigInt::from(1));
            assert_eq!(sol[2], BigInt::from(1));
            bs.insert(sol[1].clone());
        }
        let expected: BTreeSet<BigInt> = (-2..=2).map(BigInt::from).collect();
        assert_eq!(bs, expected);
    }

    #[test]
    fn s3_weight_two_endpoints_match_q_pow_d_and_one() {
        let ctx = StaticContext::new(2, 1, 1, 2, 0, &[1, 1, 1], None).unwrap();
        let sols = enumerate_all(&ctx);
        assert!(!sols.is_empty());
        for sol in &sols {
            assert_eq!(sol[0], BigInt::from(4)); // q^d = 2^2
            assert_eq!(sol[2 * ctx.d], BigInt::from(1));
        }
    }

    #[test]
    fn node_limit_makes_search_resumable_without_losing_solutions() {
        let ctx_bounded = StaticContext::new(2, 1, 1, 1, 0, &[1, 1, 1], Some(3)).unwrap();
        let ctx_unbounded = StaticContext::new(2, 1, 1, 1, 0, &[1, 1, 1], None).unwrap();

        let mut st = DynamicState::new(&ctx_bounded, &[]);
        let mut found = Vec::new();
        loop {
            match next_pol(&ctx_bounded, &mut st) {
                DriverOutcome::Found => found.push(st.sympol.clone()),
                DriverOutcome::NodeLimit => {
                    // `count` is cumulative for the lifetime of a
                    // DynamicState; resuming a chunked budget means
                    // resetting it, not raising the limit.
                    st.count = 0;
                }
                DriverOutcome::Done => break,
            }
        }
        let all = enumerate_all(&ctx_unbounded);
        assert_eq!(found.len(), all.len());
    }
}
