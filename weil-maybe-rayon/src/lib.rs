//! A single feature-gated primitive: run two closures, in parallel if the
//! `parallel` feature pulls in `rayon`, sequentially otherwise.
//!
//! Trimmed from `plonky2_maybe_rayon`'s `join` (the rest of that crate's
//! `MaybeParIter`/`par_chunks` trait family operates on flat slices, which
//! `weil`'s search tree never is — a `DynamicState` split produces two
//! independent recursive subtrees, not a partition of an array).

#[cfg(feature = "parallel")]
pub fn join<A, B, RA, RB>(oper_a: A, oper_b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(oper_a, oper_b)
}

#[cfg(not(feature = "parallel"))]
pub fn join<A, B, RA, RB>(oper_a: A, oper_b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (oper_a(), oper_b())
}
