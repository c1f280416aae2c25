//! Configuration module for Catalog Walker
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section is optional: a missing section (or a missing file,
//! when no `--config` is given) falls back to the built-in defaults for the
//! target retailer.
//!
//! # Example
//!
//! ```no_run
//! use catalog_walker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("walker.toml")).unwrap();
//! println!("Walking from: {}", config.site.root_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, LoaderConfig, OutputConfig, SelectorConfig, SiteConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{
    builtin_config, compute_config_hash, load_config, load_config_with_hash, parse_config,
};
pub use validation::validate;
