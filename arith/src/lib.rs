//! Exact big-integer/big-rational arithmetic and dense integer polynomials.
//!
//! This crate carries no knowledge of Weil polynomials or the search
//! problem; it is the arena of exact primitives the `weil` crate's search
//! core is built from, the way `plonky2_field` is the finite-field arena
//! `plonky2` itself is built from.

pub mod bigint;
pub mod poly;
pub mod tables;

pub use num_bigint::BigInt;
pub use num_rational::BigRational;
