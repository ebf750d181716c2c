//! CLI command implementations.

mod check;
mod coverage;
mod load;
mod lookup;
mod normalize;

pub use check::{run_check, CheckArgs};
pub use coverage::{run_coverage, CoverageArgs};
pub use lookup::{run_lookup, LookupArgs};
pub use normalize::{run_normalize, NormalizeArgs};
