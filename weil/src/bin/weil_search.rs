//! Command-line front end: parses `(d, lead, sign, q, cofactor, modlist)`,
//! drives the search to completion (or to `node_limit`), and prints each
//! emitted polynomial's coefficients. Persisted search state round-trips
//! through JSON so a `NodeLimit` run can be resumed later.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::Env;
use log::info;
use structopt::StructOpt;

use weil::{next_pol, DriverOutcome, DynamicState, StaticContext};

#[derive(Clone, StructOpt, Debug)]
#[structopt(name = "weil_search")]
struct Options {
    /// Degree of the search polynomial in the substituted variable y = z + q/z.
    #[structopt(long)]
    d: i64,

    /// Required leading coefficient.
    #[structopt(long)]
    lead: i64,

    /// Outer sign applied to the final symmetrized polynomial.
    #[structopt(long, default_value = "1")]
    sign: i32,

    /// Weil weight.
    #[structopt(long, default_value = "1")]
    q: i64,

    /// Cofactor kind: 0 = none, 1 = (x+sqrt(q)), 2 = (x-sqrt(q)), 3 = (x^2-q).
    #[structopt(long, default_value = "0")]
    cofactor: i64,

    /// Per-coefficient divisibility modulus, comma-separated, length d+1.
    #[structopt(long, use_delimiter = true)]
    modlist: Vec<i64>,

    /// Cap on visited search nodes; omit for unbounded.
    #[structopt(long)]
    node_limit: Option<u64>,

    /// Stop after this many solutions; omit for all of them.
    #[structopt(long)]
    limit: Option<usize>,

    /// Resume from a previously saved state file instead of starting fresh.
    #[structopt(long, parse(from_os_str))]
    resume_from: Option<PathBuf>,

    /// Save the resumable state here if the run stops on NodeLimit.
    #[structopt(long, parse(from_os_str))]
    save_state_to: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let opts = Options::from_args();

    let ctx = StaticContext::new(
        opts.d,
        opts.lead,
        opts.sign,
        opts.q,
        opts.cofactor,
        &opts.modlist,
        opts.node_limit,
    )
    .context("invalid search configuration")?;

    let mut state = match &opts.resume_from {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading resume state from {}", path.display()))?;
            let mut resumed = serde_json::from_str::<DynamicState>(&contents)
                .with_context(|| format!("parsing resume state from {}", path.display()))?;
            // `count` is cumulative for a DynamicState's lifetime; a fresh
            // process gets a fresh node budget.
            resumed.count = 0;
            resumed
        }
        None => DynamicState::new(&ctx, &[]),
    };

    let mut emitted = 0usize;
    loop {
        if let Some(limit) = opts.limit {
            if emitted >= limit {
                break;
            }
        }
        match next_pol(&ctx, &mut state) {
            DriverOutcome::Found => {
                emitted += 1;
                let coeffs: Vec<String> = state.sympol.iter().map(|c| c.to_string()).collect();
                println!("{}", coeffs.join(" "));
            }
            DriverOutcome::Done => {
                info!("search exhausted after {emitted} solutions");
                break;
            }
            DriverOutcome::NodeLimit => {
                info!("node limit reached after {emitted} solutions this run");
                if let Some(path) = &opts.save_state_to {
                    let json = serde_json::to_string(&state)?;
                    fs::write(path, json)
                        .with_context(|| format!("writing state to {}", path.display()))?;
                    info!("resumable state saved to {}", path.display());
                }
                break;
            }
        }
    }

    Ok(())
}
