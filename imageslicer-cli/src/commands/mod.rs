//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`slice`] - Slice one image into tiles

pub mod common;
pub mod config;
pub mod slice;
