//! Error types for the nested navigation-frame engine.

use crate::types::FrameId;
use thiserror::Error;

/// Bundle persistence errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bundle codec error: {0}")]
    Codec(String),

    #[error("Bundle fingerprint mismatch: expected {expected}, got {actual}")]
    FingerprintMismatch { expected: String, actual: String },
}

/// Navigation errors
///
/// `InvalidNavigation` and `EmptyFrame` indicate programmer errors and are
/// surfaced immediately. `NavigationBusy` is transient and never mutates
/// state. `RestoreMismatch` degrades to root-only state at the lifecycle
/// layer instead of crashing.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Invalid navigation: {0}")]
    InvalidNavigation(String),

    #[error("Frame has never been navigated: {0}")]
    EmptyFrame(FrameId),

    #[error("Navigation rejected, transition in flight on {0}")]
    NavigationBusy(FrameId),

    #[error("Frame not found: {0}")]
    FrameNotFound(FrameId),

    #[error("Restore bundle mismatch: {0}")]
    RestoreMismatch(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),
}
