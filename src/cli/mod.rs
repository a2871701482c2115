//! CLI module for lofidoro.
//!
//! This module provides the command-line interface:
//! - `commands`: argument definitions using clap derive
//! - `display`: output formatting and display logic

pub mod commands;
pub mod display;

pub use commands::Cli;
pub use display::Display;
