//! Work-stealing fan-out over `DynamicState::split`, built on
//! `weil_maybe_rayon::join`. The search itself stays single-threaded
//! end to end; splitting a branch into siblings is the only hook needed
//! to distribute work across threads.

use num_bigint::BigInt;

use crate::context::StaticContext;
use crate::driver::{next_pol, DriverOutcome};
use crate::state::DynamicState;

/// Runs `st` to completion, collecting every solution. Whenever a
/// sibling branch can be carved off (`DynamicState::split`), it is run
/// concurrently with the remainder of `st` (via `rayon::join` under the
/// `parallel` feature, sequentially otherwise). Solutions are returned in
/// no particular order across siblings; within one leaf branch they
/// remain lexicographically ascending.
pub fn enumerate_parallel(ctx: &StaticContext, mut st: DynamicState) -> Vec<Vec<BigInt>> {
    let mut out = Vec::new();
    loop {
        if let Some(sibling) = st.split(ctx) {
            let (mut here, there) = weil_maybe_rayon::join(
                || enumerate_parallel(ctx, st.clone()),
                || enumerate_parallel(ctx, sibling),
            );
            out.append(&mut here);
            out.extend(there);
            return out;
        }
        match next_pol(ctx, &mut st) {
            DriverOutcome::Found => out.push(st.sympol.clone()),
            DriverOutcome::Done | DriverOutcome::NodeLimit => return out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaticContext;

    fn run_sequential(ctx: &StaticContext) -> Vec<Vec<BigInt>> {
        let mut st = DynamicState::new(ctx, &[]);
        let mut out = Vec::new();
        loop {
            match next_pol(ctx, &mut st) {
                DriverOutcome::Found => out.push(st.sympol.clone()),
                DriverOutcome::Done | DriverOutcome::NodeLimit => return out,
            }
        }
    }

    #[test]
    fn parallel_enumeration_matches_sequential_count() {
        let ctx = StaticContext::new(2, 1, 1, 1, 0, &[1, 1, 1], None).unwrap();
        let sequential = run_sequential(&ctx);
        let parallel = enumerate_parallel(&ctx, DynamicState::new(&ctx, &[]));
        assert_eq!(sequential.len(), parallel.len());
    }
}
