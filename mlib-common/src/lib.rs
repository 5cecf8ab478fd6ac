//! # mlib Common Library
//!
//! Shared code for the mlib crates:
//! - Error types (`Error`, `Result`)
//! - TOML bootstrap configuration and config file discovery

pub mod config;
pub mod error;

pub use error::{Error, Result};
