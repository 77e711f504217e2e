//! Command-line interface definitions.
//!
//! Credentials come from the environment (or a `.env` file), not from flags;
//! see [`crate::config`].

use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Write today's draft unless it already exists
/// daily_econ_digest
///
/// # Replace today's draft
/// daily_econ_digest --overwrite
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Replace draft files that already exist for today
    #[arg(long)]
    pub overwrite: bool,
}
