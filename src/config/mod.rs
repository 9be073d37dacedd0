//! Configuration module
//!
//! Settings loaded from a TOML file in the user's config directory.

pub mod config;
