//! The immutable per-search configuration: degree, leading coefficient,
//! sign, Weil weight, cofactor, per-coefficient moduli, and the static
//! tables (`binom`, `sum_mats`, `f`) derived from them once and shared by
//! every `DynamicState` in the search.
//!
//! Grounded on `power_sums.c::ps_static_init`.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use weil_arith::poly::Polynomial;
use weil_arith::tables::{build_sum_mats, binomial_triangle, SumMatRows};

use crate::error::ConfigError;

/// One of the four cofactor shapes a Weil polynomial may carry: none,
/// `(x ± sqrt(q))`, or `(x^2 - q)`. `SqrtQ` and `NegSqrtQ` only make sense
/// when `q` is a perfect square; this is not checked here (an imperfect
/// square silently uses its integer floor-sqrt).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cofactor {
    One,
    SqrtQ,
    NegSqrtQ,
    XSquaredMinusQ,
}

impl Cofactor {
    fn from_code(code: i64) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Cofactor::One),
            1 => Ok(Cofactor::SqrtQ),
            2 => Ok(Cofactor::NegSqrtQ),
            3 => Ok(Cofactor::XSquaredMinusQ),
            other => Err(ConfigError::CofactorUnsupported(other)),
        }
    }

    /// The length-3 polynomial `[c0, c1, c2]` multiplied into the
    /// palindromic part of the candidate polynomial before the final real
    /// rootedness check.
    fn polynomial(self, q: &BigInt) -> Polynomial {
        match self {
            Cofactor::One => Polynomial::new(vec![BigInt::one(), BigInt::zero(), BigInt::zero()]),
            Cofactor::SqrtQ => {
                let s = weil_arith::bigint::isqrt_floor(q);
                Polynomial::new(vec![s, BigInt::one(), BigInt::zero()])
            }
            Cofactor::NegSqrtQ => {
                let s = weil_arith::bigint::isqrt_floor(q);
                Polynomial::new(vec![-s, BigInt::one(), BigInt::zero()])
            }
            Cofactor::XSquaredMinusQ => {
                Polynomial::new(vec![-q.clone(), BigInt::zero(), BigInt::one()])
            }
        }
    }
}

/// The configuration shared read-only across an entire search, and its
/// derived static tables.
pub struct StaticContext {
    pub d: usize,
    pub lead: BigInt,
    pub sign: i32,
    pub q: BigInt,
    pub cofactor: Cofactor,
    pub cofactor_poly: Polynomial,
    /// Lower endpoint of the root-containment interval: `-2` if `q == 1`,
    /// else `0`.
    pub a: BigInt,
    /// Upper endpoint: `2` if `q == 1`, else `4*q`.
    pub b: BigInt,
    /// `modlist[n]`: required divisor of `pol[n] - pol[n]_initial`, or `0`
    /// to freeze `pol[n]` at its initial value entirely.
    pub modlist: Vec<BigInt>,
    pub binom: Vec<Vec<BigInt>>,
    pub sum_mats: Vec<SumMatRows>,
    /// `f[n] = modlist[n] * (d - n) / lead`, with a frozen coordinate
    /// (`modlist[n] == 0`) treated as having an effective modulus of `1`
    /// for this scaling factor only.
    pub f: Vec<BigRational>,
    pub node_limit: Option<u64>,
}

impl StaticContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        d: i64,
        lead: i64,
        sign: i32,
        q: i64,
        cofactor_code: i64,
        modlist: &[i64],
        node_limit: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if d < 1 {
            return Err(ConfigError::DegreeTooSmall(d));
        }
        if lead == 0 {
            return Err(ConfigError::LeadZero);
        }
        if q < 1 {
            return Err(ConfigError::QZero(q));
        }
        let d = d as usize;
        if modlist.len() != d + 1 {
            return Err(ConfigError::ModlistLengthMismatch {
                expected: d + 1,
                actual: modlist.len(),
            });
        }
        let cofactor = Cofactor::from_code(cofactor_code)?;

        let lead = BigInt::from(lead);
        let q = BigInt::from(q);
        let (a, b) = if q.is_one() {
            (BigInt::from(-2), BigInt::from(2))
        } else {
            (BigInt::zero(), BigInt::from(4) * &q)
        };
        let modlist: Vec<BigInt> = modlist.iter().map(|&m| BigInt::from(m)).collect();
        let cofactor_poly = cofactor.polynomial(&q);

        let binom = binomial_triangle(d);
        let sum_mats = build_sum_mats(d, &q);

        let f = (0..=d)
            .map(|n| {
                let modulus = if modlist[n].is_zero() {
                    BigInt::one()
                } else {
                    modlist[n].clone()
                };
                BigRational::new(modulus * BigInt::from((d - n) as i64), lead.clone())
            })
            .collect();

        Ok(StaticContext {
            d,
            lead,
            sign,
            q,
            cofactor,
            cofactor_poly,
            a,
            b,
            modlist,
            binom,
            sum_mats,
            f,
            node_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(
            StaticContext::new(0, 1, 1, 1, 0, &[1, 1], None),
            Err(ConfigError::DegreeTooSmall(0))
        ));
        assert!(matches!(
            StaticContext::new(2, 0, 1, 1, 0, &[1, 1, 1], None),
            Err(ConfigError::LeadZero)
        ));
        assert!(matches!(
            StaticContext::new(2, 1, 1, 0, 0, &[1, 1, 1], None),
            Err(ConfigError::QZero(0))
        ));
        assert!(matches!(
            StaticContext::new(2, 1, 1, 1, 0, &[1, 1], None),
            Err(ConfigError::ModlistLengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
        assert!(matches!(
            StaticContext::new(2, 1, 1, 1, 9, &[1, 1, 1], None),
            Err(ConfigError::CofactorUnsupported(9))
        ));
    }

    #[test]
    fn interval_endpoints_depend_on_q() {
        let ctx = StaticContext::new(2, 1, 1, 1, 0, &[1, 1, 1], None).unwrap();
        assert_eq!(ctx.a, BigInt::from(-2));
        assert_eq!(ctx.b, BigInt::from(2));

        let ctx = StaticContext::new(2, 1, 1, 3, 0, &[1, 1, 1], None).unwrap();
        assert_eq!(ctx.a, BigInt::from(0));
        assert_eq!(ctx.b, BigInt::from(12));
    }

    #[test]
    fn frozen_coordinate_uses_unit_modulus_in_f() {
        let ctx = StaticContext::new(2, 1, 1, 1, 0, &[0, 1, 1], None).unwrap();
        // f[0] = modlist[0]*(d-0)/lead, frozen so modlist[0] acts as 1: 1*2/1 = 2
        assert_eq!(ctx.f[0], BigRational::from_integer(BigInt::from(2)));
    }
}
