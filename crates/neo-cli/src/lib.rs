//! # neo-cli
//!
//! Command-line explorer for near-Earth object close approaches.
//!
//! The `neo` binary loads the NEO catalogue and close-approach data with
//! `neo-loader`, then either inspects a single object or runs a filtered
//! query and prints or saves the results.

#![warn(missing_docs)]

#[allow(missing_docs)]
pub mod args;
pub mod commands;

pub use args::{Cli, Command};
pub use commands::run;
