//! # Movie Id Population
//!
//! The movie table is not generated here; its primary keys are exported from
//! a live database beforehand as a JSON array. That array is loaded once,
//! validated, and held immutably for the run.

use std::path::Path;

use indexmap::IndexSet;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::{Result, SeedError};
use crate::generate::sampler::IdSpace;

/// Default location of the exported movie ids.
pub const DEFAULT_MOVIE_IDS_PATH: &str = "scripts/safe_movie_ids.json";

/// A non-empty set of existing movie ids, in export order.
#[derive(Debug, Clone)]
pub struct MovieIds {
    ids: Vec<i64>,
}

impl MovieIds {
    /// Read and validate the id file. Any problem is fatal for the run.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SeedError::MovieIds {
            path: path.to_path_buf(),
            message: format!("cannot read file: {}", e),
        })?;
        Self::parse(&content, path)
    }

    /// Parse a JSON array of integer ids. `path` is only used in errors.
    ///
    /// Duplicate ids are collapsed, keeping the first occurrence, so the
    /// population can back a unique-pair identifier space.
    pub fn parse(json: &str, path: &Path) -> Result<Self> {
        let invalid = |message: String| SeedError::MovieIds {
            path: path.to_path_buf(),
            message,
        };

        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| invalid(format!("invalid JSON: {}", e)))?;
        let items = value
            .as_array()
            .ok_or_else(|| invalid(format!("expected a JSON array, found {}", json_kind(&value))))?;
        if items.is_empty() {
            return Err(invalid("array is empty".to_string()));
        }

        let mut ids = IndexSet::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let id = item
                .as_i64()
                .ok_or_else(|| invalid(format!("element {} is not an integer: {}", i, item)))?;
            ids.insert(id);
        }

        if ids.len() < items.len() {
            tracing::warn!(
                "Collapsed {} duplicate movie ids in {}",
                items.len() - ids.len(),
                path.display()
            );
        }

        Ok(Self {
            ids: ids.into_iter().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false; an empty population is rejected on load.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.ids
    }

    pub fn id_space(&self) -> IdSpace<'_> {
        IdSpace::Population(&self.ids)
    }

    /// A uniformly random movie id.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<i64> {
        self.ids.choose(rng).copied()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<MovieIds> {
        MovieIds::parse(json, Path::new("safe_movie_ids.json"))
    }

    #[test]
    fn test_parse_valid_array() {
        let movies = parse("[5, 3, 900]").unwrap();
        assert_eq!(movies.as_slice(), &[5, 3, 900]);
        assert_eq!(movies.len(), 3);
    }

    #[test]
    fn test_duplicates_are_collapsed_in_order() {
        let movies = parse("[7, 2, 7, 9, 2]").unwrap();
        assert_eq!(movies.as_slice(), &[7, 2, 9]);
    }

    #[test]
    fn test_empty_array_is_rejected() {
        let err = parse("[]").unwrap_err();
        assert!(matches!(err, SeedError::MovieIds { .. }));
        assert!(err.to_string().contains("array is empty"));
    }

    #[test]
    fn test_non_array_is_rejected() {
        let err = parse(r#"{"ids": [1, 2]}"#).unwrap_err();
        assert!(err.to_string().contains("expected a JSON array, found an object"));
    }

    #[test]
    fn test_non_integer_element_is_rejected() {
        let err = parse(r#"[1, "two", 3]"#).unwrap_err();
        assert!(err.to_string().contains("element 1 is not an integer"));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(parse("[1, 2,").is_err());
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = MovieIds::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read file"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.json");
        std::fs::write(&path, "[\n  1,\n  2,\n  3\n]").unwrap();
        let movies = MovieIds::load(&path).unwrap();
        assert_eq!(movies.len(), 3);
    }
}
