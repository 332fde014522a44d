//! Sign-up CLI - command-line view over the form session and record store
//!
//! Subcommands:
//! - `serve`: run the `/customers` server over an in-memory store
//! - `list`: print the remote listing
//! - `submit`: fill and submit a form session
//! - `validate`: evaluate values without submitting

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;

pub use cli::{command, Cli, Invocation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
