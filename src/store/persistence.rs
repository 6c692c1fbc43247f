//! Sled-backed bundle persistence.
//!
//! Stores the encoded bundle envelope under a single well-known key. The
//! envelope carries its own BLAKE3 fingerprint, so a corrupted value is
//! detected on load and surfaces as a storage error instead of restoring
//! mangled navigation state.

use crate::error::StorageError;
use crate::frame::snapshot::{decode_bundle, encode_bundle, StateBundle};
use crate::store::BundleStore;
use std::path::{Path, PathBuf};

const BUNDLE_KEY: &[u8] = b"bundle:current";

/// Sled-based implementation of `BundleStore`.
pub struct SledBundleStore {
    db: sled::Db,
}

impl SledBundleStore {
    /// Open (or create) the bundle database at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(to_storage_io)?;
        Ok(Self { db })
    }

    /// Default on-disk location under the platform data directory, e.g.
    /// `$XDG_DATA_HOME/navframe/state`.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "navframe")
            .map(|dirs| dirs.data_dir().join("state"))
            .unwrap_or_else(|| PathBuf::from(".navframe/state"))
    }

    pub fn db(&self) -> &sled::Db {
        &self.db
    }
}

impl BundleStore for SledBundleStore {
    fn put(&self, bundle: &StateBundle) -> Result<(), StorageError> {
        let bytes = encode_bundle(bundle)?;
        self.db.insert(BUNDLE_KEY, bytes).map_err(to_storage_io)?;
        self.db.flush().map_err(to_storage_io)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<StateBundle>, StorageError> {
        match self.db.get(BUNDLE_KEY).map_err(to_storage_io)? {
            Some(value) => decode_bundle(&value).map(Some),
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.db.remove(BUNDLE_KEY).map_err(to_storage_io)?;
        self.db.flush().map_err(to_storage_io)?;
        Ok(())
    }
}

fn to_storage_io(err: sled::Error) -> StorageError {
    StorageError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        err.to_string(),
    ))
}
