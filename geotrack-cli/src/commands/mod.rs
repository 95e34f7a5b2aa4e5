//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (get, set, list, path, init)
//! - [`distance`] - Distance between two coordinates
//! - [`record`] - Replay a sample file through the recorder

pub mod common;
pub mod config;
pub mod distance;
pub mod record;
