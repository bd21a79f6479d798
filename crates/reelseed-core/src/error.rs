//! # Error Types
//!
//! Defines `SeedError`, the unified error enum for every failure mode in the
//! seeding pipeline. Each variant carries enough context (file path, table,
//! column, underlying cause) to act on the message without digging through
//! logs. Every variant is terminal: the pipeline never retries.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur while generating a seed script.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Movie id population at {path} is unusable: {message}\n  Expected a non-empty JSON array of integer ids, e.g. [1, 2, 3]\n  Export the ids from the movie table before running the seeder.")]
    MovieIds { path: PathBuf, message: String },

    #[error("Value of kind '{kind}' has no SQL literal form ({table}.{column})")]
    UnsupportedValueKind {
        kind: &'static str,
        table: &'static str,
        column: &'static str,
    },

    #[error("Circular dependency detected at seed section: {sections}")]
    CircularDependency { sections: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Output error: {message}: {source}")]
    Output {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SeedError>;
