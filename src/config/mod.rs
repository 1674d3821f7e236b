//! Configuration module for sitesift
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All fields carry defaults, so the binary runs without a config file.
//!
//! # Example
//!
//! ```no_run
//! use sitesift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitesift.toml")).unwrap();
//! println!("Will probe up to {} links", config.verifier.max_probes);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, OutputConfig, ServiceConfig, VerifierConfig};

// Re-export parser functions
pub use parser::load_config;
