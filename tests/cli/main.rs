//! CLI integration tests for blockdown.
//!
//! These tests execute the compiled binary and verify:
//! - Outline and JSON output of the parse subcommand
//! - Stdin handling and config discovery
//! - Include resolution relative to the input file
//! - Exit codes on errors

mod common;
mod parse;
