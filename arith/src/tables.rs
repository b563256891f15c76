//! The static tables a search context builds once: the binomial triangle
//! and the nine-row `SumMats[i]` rational matrices used by the power-sum
//! bound computation.
//!
//! Grounded line-for-line on `power_sums.c::ps_static_init`'s construction
//! of `binom_mat` and `sum_mats`.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::poly::{binomial, chebyshev_t};

/// `base^exp` by repeated squaring, avoiding any dependency on which `Pow`
/// impls a given `num-bigint` version happens to expose.
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

/// `binom[i][j] == C(i, j)` for `0 <= i, j <= d`.
pub fn binomial_triangle(d: usize) -> Vec<Vec<BigInt>> {
    (0..=d)
        .map(|i| (0..=d).map(|j| binomial(i as u64, j as u64)).collect())
        .collect()
}

/// Row `k` of `SumMats[i]`, each a vector of length `d+1` (zero-padded).
pub type Row = Vec<BigRational>;

/// The nine derived rows of `SumMats[i]`, `i = 0..=d`, matching
/// `power_sums.c`'s `sum_mats[i]`: row 0 is `2*T_i(x/2)` (Chebyshev-T,
/// scaled by `q^{(i-j)/2}` on the `x^j` term when `q>1`); rows 1-2 reuse
/// row 0 of `SumMats[i-2]`; rows 3-5 build up `(2+x)^i`; rows 6-8 do the
/// same for `(-2+x)^i`.
#[derive(Clone, Debug)]
pub struct SumMatRows {
    pub rows: [Row; 9],
}

impl SumMatRows {
    fn zero(d: usize) -> Self {
        SumMatRows {
            rows: std::array::from_fn(|_| vec![BigRational::zero(); d + 1]),
        }
    }
}

/// `sum_mats[i].rows[r][j]`, `i = 0..=d`, grounded on
/// `power_sums.c::ps_static_init`'s loop over `i` and `j`.
pub fn build_sum_mats(d: usize, q: &BigInt) -> Vec<SumMatRows> {
    let binom = binomial_triangle(d);
    let q_is_one = q.is_one();
    let mut mats: Vec<SumMatRows> = Vec::with_capacity(d + 1);

    for i in 0..=d {
        let mut mat = SumMatRows::zero(d);
        let cheb_i = chebyshev_t(i);

        // Row 0: coefficients of 2*T_i(x/2), scaled by q^{(i-j)/2} when q != 1
        // and i, j have the same parity (the only case the coefficient of
        // T_i can be nonzero).
        for j in 0..=i.min(d) {
            let coeff = cheb_i.coeffs.get(j).cloned().unwrap_or_else(BigInt::zero);
            if coeff.is_zero() {
                continue;
            }
            // coeff / 2^j * 2 == coeff / 2^(j-1)
            let mut val = BigRational::new(coeff * BigInt::from(2u32), pow_bigint(&BigInt::from(2u32), j as u32));
            if !q_is_one && (i - j) % 2 == 0 {
                let scale = pow_bigint(q, ((i - j) / 2) as u32);
                val = val * BigRational::from_integer(scale);
            }
            mat.rows[0][j] = val;
        }

        // Row 1: row 0 of SumMats[i-2], scaled by -2.
        if i >= 2 {
            let neg_two = BigRational::from_integer(BigInt::from(-2));
            for j in 0..=d {
                mat.rows[1][j] = mats[i - 2].rows[0][j].clone() * neg_two.clone();
            }
        }

        // Row 2: row 0 of SumMats[i-2], shifted right by two columns.
        if i >= 2 {
            for j in 2..=d {
                mat.rows[2][j] = mats[i - 2].rows[0][j - 2].clone();
            }
        }

        // Row 3: coefficients of (2+x)^i, i.e. C(i,j) * 2^(i-j).
        for j in 0..=i.min(d) {
            let scaled = &binom[i][j] * pow_bigint(&BigInt::from(2u32), (i - j) as u32);
            mat.rows[3][j] = BigRational::from_integer(scaled);
        }

        // Row 4, 5: row 3 of SumMats[i-1], SumMats[i-2].
        if i >= 1 {
            mat.rows[4] = mats[i - 1].rows[3].clone();
        }
        if i >= 2 {
            mat.rows[5] = mats[i - 2].rows[3].clone();
        }

        // Row 6: coefficients of (-2+x)^i: row 3 with sign flipped on odd (i-j).
        for j in 0..=d {
            mat.rows[6][j] = if (i + j) % 2 == 1 {
                -mat.rows[3][j].clone()
            } else {
                mat.rows[3][j].clone()
            };
        }

        // Row 7, 8: row 6 of SumMats[i-1], SumMats[i-2].
        if i >= 1 {
            mat.rows[7] = mats[i - 1].rows[6].clone();
        }
        if i >= 2 {
            mat.rows[8] = mats[i - 2].rows[6].clone();
        }

        mats.push(mat);
    }

    mats
}

/// `prod = sum_mats[k].rows * sum_col`, the nine-entry column used by
/// `PowerSumRange`'s tiered bounds.
pub fn apply_sum_mat(mat: &SumMatRows, sum_col: &[BigRational]) -> [BigRational; 9] {
    std::array::from_fn(|r| {
        mat.rows[r]
            .iter()
            .zip(sum_col.iter())
            .map(|(a, b)| a * b)
            .fold(BigRational::zero(), |acc, x| acc + x)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bi(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn binomial_triangle_matches_pascal() {
        let t = binomial_triangle(4);
        assert_eq!(t[4][2], bi(6));
        assert_eq!(t[4][0], bi(1));
        assert_eq!(t[4][4], bi(1));
    }

    #[test]
    fn row0_is_chebyshev_rescaled_at_q1() {
        // At q=1, row0 of SumMats[2] should be coeffs of 2*T_2(x/2) = 2*(2*(x/2)^2-1) = x^2-2.
        let mats = build_sum_mats(4, &bi(1));
        let row0 = &mats[2].rows[0];
        assert_eq!(row0[0], BigRational::from_integer(bi(-2)));
        assert_eq!(row0[1], BigRational::zero());
        assert_eq!(row0[2], BigRational::from_integer(bi(1)));
    }

    #[test]
    fn row3_is_shifted_binomial() {
        let mats = build_sum_mats(3, &bi(1));
        // (2+x)^2 = 4 + 4x + x^2
        let row3 = &mats[2].rows[3];
        assert_eq!(row3[0], BigRational::from_integer(bi(4)));
        assert_eq!(row3[1], BigRational::from_integer(bi(4)));
        assert_eq!(row3[2], BigRational::from_integer(bi(1)));
    }

    #[test]
    fn row6_is_sign_flipped_row3() {
        let mats = build_sum_mats(3, &bi(1));
        // (-2+x)^2 = 4 - 4x + x^2
        let row6 = &mats[2].rows[6];
        assert_eq!(row6[0], BigRational::from_integer(bi(4)));
        assert_eq!(row6[1], BigRational::from_integer(bi(-4)));
        assert_eq!(row6[2], BigRational::from_integer(bi(1)));
    }
}
