//! Shared identifier types for the navigation engine.

use crate::error::NavigationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a frame within a registry.
///
/// Ids are allocated by the registry and preserved verbatim across
/// suspend/resume so that restored topology matches the captured one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct FrameId(u64);

impl FrameId {
    pub(crate) fn new(raw: u64) -> Self {
        FrameId(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame-{}", self.0)
    }
}

/// Opaque, stable token identifying a navigable screen.
///
/// Two entries with equal page identity describe the same navigational state
/// for reuse checks (e.g. `players-list`, `player-details:2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Validate and wrap a raw page token. Empty or whitespace-only tokens
    /// are rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self, NavigationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(NavigationError::InvalidNavigation(
                "page identity must be non-empty".to_string(),
            ));
        }
        Ok(PageId(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named mount point for a nested frame within a host page.
///
/// A page hosting a single nested frame uses the default (empty) slot; pages
/// embedding several sibling frames distinguish them by slot name.
pub type SlotId = String;

/// BLAKE3 fingerprint of an encoded state bundle.
pub type Fingerprint = [u8; 32];
