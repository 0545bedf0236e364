// Load-then-aggregate workflows that the CLI subcommands drive.

pub mod likelihoods;
pub mod proportions;
