pub mod config;
pub mod error;
pub mod generate;
pub mod graph;
pub mod movies;
pub mod output;
pub mod seed;

// Re-export key types for convenience
pub use error::{Result, SeedError};
pub use movies::MovieIds;
pub use seed::{generate, plan, SeedScript, SeedSettings, Section};
