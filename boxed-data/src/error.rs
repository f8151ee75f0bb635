//! Error taxonomy for dataset assembly and queries.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling or querying the dataset.
///
/// Assembly-time errors abort the whole [`crate::Dataset::load`] call; no
/// partial dataset is ever returned. Query-time errors abort only that query.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Root folder is missing or not a directory.
    #[error("dataset root does not exist or is not a directory: {0}")]
    InvalidRoot(PathBuf),

    /// A matched file's directory path does not encode a participant and a
    /// scene number (fewer than two digit runs).
    #[error("cannot recover participant/scene numbers from path: {0}")]
    MalformedPath(PathBuf),

    /// A dataset file could not be parsed (malformed JSON, missing fields,
    /// or a non-numeric object-ID suffix).
    #[error("malformed record in {path}: {reason}")]
    RecordParse { path: PathBuf, reason: String },

    /// No trajectory file matched an object name (strict mode only), or the
    /// camera trajectory file for a scene is missing.
    #[error("no trajectory file for '{name}' (participant {participant}, scene {scene})")]
    TrajectoryNotFound {
        name: String,
        participant: u32,
        scene: u32,
    },

    /// Unknown object name or grasp kind passed to a query.
    #[error("invalid object selection: {0}")]
    InvalidObjectName(String),

    /// A scene duration was requested but an endpoint object has no
    /// trajectory samples.
    #[error("empty trajectory for '{name}' (participant {participant}, scene {scene})")]
    EmptyTrajectory {
        name: String,
        participant: u32,
        scene: u32,
    },

    /// Underlying filesystem failure while walking or reading files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
