//! CLI module for GeNe
//!
//! Every command builds node arguments the same way: collect a
//! configuration snapshot from a field source, then map it to flags.

pub mod error;
pub mod output;

pub mod node_args;

pub mod args;
pub mod config;
pub mod flags;
pub mod start;
pub mod stop;

pub mod tui;
