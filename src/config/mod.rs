//! Configuration module for fa-grab
//!
//! This module handles loading, parsing, and validating the TOML policy file.
//! Every key has a default, so the hooks run against the live site without a file.
//!
//! # Example
//!
//! ```no_run
//! use fa_grab::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("grab.toml")).unwrap();
//! println!("Attempt ceiling: {}", config.session.max_total_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, MarkerConfig, PolicyConfig, SessionConfig, SiteConfig, TrackerConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
