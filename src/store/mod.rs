//! Suspend/resume bundle storage.
//!
//! The lifecycle coordinator persists one composite bundle per process
//! through the `BundleStore` port. The in-memory adapter lives here; the
//! sled-backed adapter is in `persistence`.

pub mod persistence;

pub use persistence::SledBundleStore;

use crate::error::StorageError;
use crate::frame::snapshot::{decode_bundle, encode_bundle, StateBundle};
use parking_lot::RwLock;

/// Storage port for the composite suspend/resume bundle.
pub trait BundleStore: Send + Sync {
    fn put(&self, bundle: &StateBundle) -> Result<(), StorageError>;
    fn load(&self) -> Result<Option<StateBundle>, StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory bundle store.
///
/// Holds the encoded envelope rather than the decoded bundle so tests
/// exercise the same codec and fingerprint path as the sled adapter.
#[derive(Default)]
pub struct MemoryBundleStore {
    slot: RwLock<Option<Vec<u8>>>,
}

impl MemoryBundleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored bytes directly. Test hook for corruption
    /// scenarios.
    pub fn inject_raw(&self, bytes: Vec<u8>) {
        *self.slot.write() = Some(bytes);
    }
}

impl BundleStore for MemoryBundleStore {
    fn put(&self, bundle: &StateBundle) -> Result<(), StorageError> {
        let bytes = encode_bundle(bundle)?;
        *self.slot.write() = Some(bytes);
        Ok(())
    }

    fn load(&self) -> Result<Option<StateBundle>, StorageError> {
        match self.slot.read().as_deref() {
            Some(bytes) => decode_bundle(bytes).map(Some),
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.write() = None;
        Ok(())
    }
}
