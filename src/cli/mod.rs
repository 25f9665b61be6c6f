//! Command-Line Interface
//!
//! Subcommand implementations and the HTTP client they use to talk to a
//! running daemon. Argument parsing lives in the binary.

pub mod client;
pub mod commands;

pub use client::ApiClient;
