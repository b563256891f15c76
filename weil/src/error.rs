//! Configuration-time errors. The search core never fails once a
//! `StaticContext` exists (the only runtime outcomes on the hot path are
//! `Found`/`Done`/`NodeLimit`, all ordinary return values); a bad
//! `(d, lead, sign, q, cofactor, modlist)` is rejected up front instead.

use thiserror::Error;

/// Rejected at `StaticContext` construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("degree d={0} must be at least 1")]
    DegreeTooSmall(i64),
    #[error("leading coefficient `lead` must be nonzero")]
    LeadZero,
    #[error("Weil weight q={0} must be at least 1")]
    QZero(i64),
    #[error("modlist has length {actual}, expected {expected} (= d+1)")]
    ModlistLengthMismatch { expected: usize, actual: usize },
    #[error("unsupported cofactor kind {0} (expected 0..=3)")]
    CofactorUnsupported(i64),
}
