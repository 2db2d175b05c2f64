//! Loading arena configs and recordings from disk.
//!
//! All validation happens at load time; a config that loads is safe to hand
//! to an [`ItemField`](arena_core::field::ItemField).

use std::path::Path;

use arena_core::error::ArenaError;
use arena_core::recording::BattleRecording;
use arena_core::rules::ArenaConfig;
use thiserror::Error;

/// Errors that can occur while loading tool inputs.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON file.
    #[error("Failed to parse RON file '{path}': {source}")]
    ParseError {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Config parsed but failed validation.
    #[error("Validation failed for config '{path}': {errors:?}")]
    ValidationError {
        /// Path to the file.
        path: String,
        /// List of validation errors.
        errors: Vec<String>,
    },

    /// Recording could not be loaded.
    #[error("Failed to load recording '{path}': {source}")]
    RecordingError {
        /// Path to the file.
        path: String,
        /// Underlying recording error.
        #[source]
        source: ArenaError,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|source| LoadError::IoError {
        path: path.display().to_string(),
        source,
    })
}

/// Load and validate an arena config from a RON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid RON, or fails
/// validation.
pub fn load_config(path: &Path) -> LoadResult<ArenaConfig> {
    let text = read_file(path)?;
    let config: ArenaConfig = ron::from_str(&text).map_err(|source| LoadError::ParseError {
        path: path.display().to_string(),
        source,
    })?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(LoadError::ValidationError {
            path: path.display().to_string(),
            errors,
        });
    }

    tracing::debug!(
        path = %path.display(),
        width = config.rules.width(),
        height = config.rules.height(),
        seed = config.seed,
        "Loaded arena config"
    );
    Ok(config)
}

/// Load a battle recording.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a recording of the
/// current format version.
pub fn load_recording(path: &Path) -> LoadResult<BattleRecording> {
    let text = read_file(path)?;
    BattleRecording::from_ron_str(&text).map_err(|source| LoadError::RecordingError {
        path: path.display().to_string(),
        source,
    })
}
