//! # Lyrica Common Library
//!
//! Shared code for the Lyrica workspace:
//! - Error and result types
//! - TOML bootstrap configuration and its resolution order

pub mod config;
pub mod error;

pub use config::{ConfigOrigin, ConfigResolver, LoggingConfig, TomlConfig};
pub use error::{Error, Result};
