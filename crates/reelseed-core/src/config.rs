//! # Configuration File Parser
//!
//! Reads and parses `reelseed.toml`, the optional file that replaces the
//! built-in row counts and reference vocabularies. Supports:
//!
//! - `[generate]` — seed, pinned base time, output paths, transaction wrapper
//! - `[counts]` — requested rows per table (all tables required)
//! - `[vocabulary]` — reference lists backing the vocabulary tables
//!
//! Example `reelseed.toml`:
//!
//! ```toml
//! [generate]
//! seed = 42
//! base_time = "2025-01-01 00:00:00"
//! transaction = true
//! output = "sql/data.sql"
//! movie_ids = "scripts/safe_movie_ids.json"
//! primary_flags = "loose"
//!
//! [counts]
//! users = 500
//! user_follows = 1000
//! languages = 100
//! countries = 200
//! studios = 250
//! movie_languages = 2000
//! movie_studios = 2000
//! events = 200
//! releases = 1000
//! movie_releases = 1500
//! tags = 300
//! movie_lists = 1000
//! movie_lists_movie = 3000
//! movie_lists_tags = 1500
//! watches = 5000
//! watch_comments = 2000
//!
//! [vocabulary]
//! languages = ["English", "Spanish", "French"]
//! release_types = ["theatrical", "digital"]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use crate::error::{Result, SeedError};
use crate::generate::relationships::PrimaryFlagPolicy;
use crate::generate::vocabulary::{self, to_owned_list};
use crate::movies::DEFAULT_MOVIE_IDS_PATH;

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "reelseed.toml";

/// Default path of the generated script.
pub const DEFAULT_OUTPUT_PATH: &str = "sql/data.sql";

/// Top-level reelseed.toml structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Run settings.
    pub generate: GenerateConfig,
    /// Requested row count per table.
    pub counts: RowCounts,
    /// Reference lists for vocabulary-backed tables.
    pub vocabulary: Vocabulary,
}

/// Run settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Fixed random seed for reproducible scripts.
    pub seed: Option<u64>,
    /// Anchor for every generated timestamp; defaults to the current UTC time.
    #[serde(deserialize_with = "deserialize_base_time")]
    pub base_time: Option<NaiveDateTime>,
    /// Wrap the script in `START TRANSACTION;` / `COMMIT;`.
    pub transaction: bool,
    /// Where the script is written.
    pub output: PathBuf,
    /// JSON array of existing movie ids.
    pub movie_ids: PathBuf,
    /// How `is_primary` flags are assigned.
    pub primary_flags: PrimaryFlagPolicy,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: None,
            base_time: None,
            transaction: true,
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            movie_ids: PathBuf::from(DEFAULT_MOVIE_IDS_PATH),
            primary_flags: PrimaryFlagPolicy::default(),
        }
    }
}

/// Accepts `2025-01-01 00:00:00` as well as the ISO `2025-01-01T00:00:00`.
fn deserialize_base_time<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .map(Some)
        .ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid base_time '{}': expected YYYY-MM-DD HH:MM:SS",
                raw
            ))
        })
}

/// Requested rows per table.
///
/// When the `[counts]` section is present every table must be listed; there
/// are no partial overrides. Vocabulary tables are clamped to their
/// vocabulary size at generation time, and relationship tables may come out
/// shorter when the parent populations cannot supply enough distinct pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowCounts {
    pub users: usize,
    pub user_follows: usize,
    pub languages: usize,
    pub countries: usize,
    pub studios: usize,
    pub movie_languages: usize,
    pub movie_studios: usize,
    pub events: usize,
    pub releases: usize,
    pub movie_releases: usize,
    pub tags: usize,
    pub movie_lists: usize,
    pub movie_lists_movie: usize,
    pub movie_lists_tags: usize,
    pub watches: usize,
    pub watch_comments: usize,
}

impl Default for RowCounts {
    fn default() -> Self {
        Self {
            users: 500,
            user_follows: 1000,
            languages: 100,
            countries: 200,
            studios: 250,
            movie_languages: 2000,
            movie_studios: 2000,
            events: 200,
            releases: 1000,
            movie_releases: 1500,
            tags: 300,
            movie_lists: 1000,
            movie_lists_movie: 3000,
            movie_lists_tags: 1500,
            watches: 5000,
            watch_comments: 2000,
        }
    }
}

/// Reference vocabularies. Each list may be replaced individually.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Vocabulary {
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub tags: Vec<String>,
    pub festivals: Vec<String>,
    pub release_types: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            languages: to_owned_list(vocabulary::LANGUAGES),
            countries: to_owned_list(vocabulary::COUNTRIES),
            tags: to_owned_list(vocabulary::TAG_NAMES),
            festivals: to_owned_list(vocabulary::FESTIVALS),
            release_types: to_owned_list(vocabulary::RELEASE_TYPES),
        }
    }
}

impl Vocabulary {
    /// Events are festival editions, one per festival per edition year.
    pub fn festival_editions(&self) -> Vec<String> {
        vocabulary::festival_editions(&self.festivals)
    }

    fn lists(&self) -> [(&'static str, &[String]); 5] {
        [
            ("languages", self.languages.as_slice()),
            ("countries", self.countries.as_slice()),
            ("tags", self.tags.as_slice()),
            ("festivals", self.festivals.as_slice()),
            ("release_types", self.release_types.as_slice()),
        ]
    }
}

/// Read `reelseed.toml` from the given directory.
///
/// Returns `None` if the file doesn't exist (config is optional).
/// Returns an error if the file exists but can't be parsed.
pub fn read_config(dir: &Path) -> Result<Option<SeedConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    read_config_file(&path).map(Some)
}

/// Read an explicitly named config file. A missing file is an error.
pub fn read_config_file(path: &Path) -> Result<SeedConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SeedError::Config {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;

    let config: SeedConfig = toml::from_str(&content).map_err(|e| SeedError::Config {
        message: format!("Failed to parse {}: {}", path.display(), e),
    })?;

    config.validate()?;

    Ok(config)
}

impl SeedConfig {
    /// Validate constraints serde cannot enforce: vocabularies must be
    /// non-empty and free of duplicates, since row `i` of a vocabulary table
    /// gets id `i + 1` and names are expected to be unique.
    pub fn validate(&self) -> Result<()> {
        for (name, list) in self.vocabulary.lists() {
            if list.is_empty() {
                return Err(SeedError::Config {
                    message: format!("[vocabulary] {} must not be empty", name),
                });
            }
            let mut seen = HashSet::new();
            if let Some(dup) = list.iter().find(|entry| !seen.insert(entry.as_str())) {
                return Err(SeedError::Config {
                    message: format!(
                        "[vocabulary] {} lists '{}' more than once. Entries must be unique.",
                        name, dup
                    ),
                });
            }
        }
        Ok(())
    }
}
