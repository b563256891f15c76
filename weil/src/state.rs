//! Per-branch mutable search state: the coefficient prefix fixed so far,
//! its permitted upper bounds, the running column of Newton power sums,
//! and the output buffer for the symmetrized polynomial.
//!
//! Grounded on `power_sums.c::ps_dynamic_init`/`ps_dynamic_clone`; unlike
//! the source, which carries a raw scratch arena (`w`, `w2`) sized by
//! hand, the working buffers `sturm.rs`/`power_sums.rs` need are
//! allocated per call — see DESIGN.md for why that tradeoff was made.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::context::StaticContext;

/// One branch of the search tree: resumable, cloneable, splittable. The
/// on-wire layout is `(n, ascend, count, pol, upper, sum_col, sympol)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DynamicState {
    /// Next coefficient index to determine, going from `d` down to `-1`.
    pub n: i64,
    /// Levels of the tree left to unwind before descending again.
    pub ascend: u32,
    /// Nodes visited in this state's subtree.
    pub count: u64,
    pub pol: Vec<BigInt>,
    pub upper: Vec<BigInt>,
    pub sum_col: Vec<BigRational>,
    pub sympol: Vec<BigInt>,
}

impl DynamicState {
    /// `initial_prefix` sets `pol[0..initial_prefix.len()]`; any
    /// remaining low-order coefficients default to zero, and `pol[d]` is
    /// always fixed to the leading coefficient.
    pub fn new(ctx: &StaticContext, initial_prefix: &[BigInt]) -> Self {
        let d = ctx.d;
        let mut pol = initial_prefix.to_vec();
        pol.resize(d + 1, BigInt::zero());
        pol[d] = ctx.lead.clone();
        let upper = pol.clone();

        let mut sum_col = vec![BigRational::zero(); d + 1];
        sum_col[0] = BigRational::from_integer(BigInt::from(d as i64));

        DynamicState {
            n: d as i64,
            ascend: 0,
            count: 0,
            pol,
            upper,
            sum_col,
            sympol: vec![BigInt::zero(); 2 * d + 3],
        }
    }

    /// Carves off a sibling branch covering the upper half of the
    /// shallowest still-open coefficient at depth `>= n+2`, restricting
    /// `self` to the lower half. Grounded on `power_sums.c::ps_dynamic_split`.
    pub fn split(&mut self, ctx: &StaticContext) -> Option<DynamicState> {
        let lo = self.n + 2;
        if lo > ctx.d as i64 {
            return None;
        }
        for i in (lo as usize..=ctx.d).rev() {
            if self.pol[i] < self.upper[i] {
                let mut clone = self.clone();
                self.upper[i] = self.pol[i].clone();
                clone.n = i as i64 - 1;
                clone.ascend = 1;
                clone.count = 0;
                return Some(clone);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_fixes_leading_coefficient_and_s0() {
        let ctx = crate::context::StaticContext::new(2, 3, 1, 1, 0, &[1, 1, 1], None).unwrap();
        let st = DynamicState::new(&ctx, &[]);
        assert_eq!(st.n, 2);
        assert_eq!(st.pol[2], BigInt::from(3));
        assert_eq!(st.sum_col[0], BigRational::from_integer(BigInt::from(2)));
    }

    #[test]
    fn split_returns_none_when_nothing_above_n_plus_2() {
        let ctx = crate::context::StaticContext::new(2, 1, 1, 1, 0, &[1, 1, 1], None).unwrap();
        let mut st = DynamicState::new(&ctx, &[]);
        st.n = 2; // lo = n+2 = 4 > d=2
        assert!(st.split(&ctx).is_none());
    }

    #[test]
    fn split_carves_off_upper_half() {
        let ctx = crate::context::StaticContext::new(3, 1, 1, 1, 0, &[1, 1, 1, 1], None).unwrap();
        let mut st = DynamicState::new(&ctx, &[]);
        st.n = 0;
        st.pol[3] = BigInt::from(1);
        st.upper[3] = BigInt::from(5); // pol[3] < upper[3], splittable at i=3
        let clone = st.split(&ctx).unwrap();
        assert_eq!(st.upper[3], BigInt::from(1)); // original restricted to lower half
        assert_eq!(clone.n, 2);
        assert_eq!(clone.ascend, 1);
        assert_eq!(clone.upper[3], BigInt::from(5)); // clone keeps the wide bound
    }
}
