//! Command handlers for modpatch CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod build;
pub mod configure;
pub mod list;
pub mod patch;
