use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::core::{DataStore, Note};

pub const NOTES_FILE: &str = "notes.json";
pub const CATEGORIES_FILE: &str = "categories.json";

pub const DEFAULT_CATEGORIES: [&str; 5] = ["all", "General", "Quick Notes", "Other", "JAVA"];

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let raw = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn read_notes(path: &Path) -> Result<Vec<Note>, DataError> {
    let raw: Vec<Value> = read_json(path)?;
    let notes = raw
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value::<Note>(value) {
            Ok(note) => Some(note),
            Err(e) => {
                tracing::warn!(index = idx, error = %e, "skipping malformed note");
                None
            }
        })
        .collect();
    Ok(notes)
}

pub fn read_categories(path: &Path) -> Result<Vec<String>, DataError> {
    read_json(path)
}

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

pub fn load_store(data_dir: &Path) -> DataStore {
    let notes = match read_notes(&data_dir.join(NOTES_FILE)) {
        Ok(notes) => notes,
        Err(e) => {
            tracing::warn!(error = %e, "notes unavailable, starting with an empty list");
            Vec::new()
        }
    };
    let categories = match read_categories(&data_dir.join(CATEGORIES_FILE)) {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!(error = %e, "categories unavailable, using defaults");
            default_categories()
        }
    };
    tracing::info!(
        notes = notes.len(),
        categories = categories.len(),
        dir = %data_dir.display(),
        "data loaded"
    );
    DataStore::new(notes, categories)
}
