//! Shared types, error model, and configuration for toponymy.
//!
//! This crate is the foundation depended on by all other toponymy crates.
//! It provides:
//! - [`ToponymyError`]: the unified error type
//! - Domain types ([`Entry`], [`EntryMap`], [`KeywordSet`], [`FilteredResult`])
//! - Configuration ([`AppConfig`], [`ExtractConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_EXTRA_UPPERCASE, DEFAULT_MIN_TOKEN_LEN, ExtractConfig, ExtractDefaults,
    HeadingsConfig, ReportConfig, ReportFormat, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{Result, ToponymyError};
pub use types::{Entry, EntryMap, FilteredEntry, FilteredResult, KeywordSet};
