//! Serialized navigation state
//!
//! Snapshot model for single frames (recursive, nested frames folded into
//! the entries that host them) and for the whole registry (flat table, one
//! record per registered frame). Persisted bundles are bincode-encoded and
//! carry a BLAKE3 fingerprint so corruption is detected on load rather than
//! surfacing as mangled navigation state.

use crate::error::StorageError;
use crate::frame::{NavigationEntry, ParentLink};
use crate::transition::TransitionSpec;
use crate::types::{Fingerprint, FrameId, PageId, SlotId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialized form of one stack entry.
///
/// `nested` holds the serialized state of the nested frames this page
/// hosts, keyed by slot. It is populated when a snapshot is taken through
/// the registry; a bare `Frame::snapshot` leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub page: PageId,
    pub transition: TransitionSpec,
    pub hosts_nested: bool,
    #[serde(default)]
    pub nested: BTreeMap<SlotId, FrameSnapshot>,
}

impl EntrySnapshot {
    pub(crate) fn from_entry(entry: &NavigationEntry) -> Self {
        Self {
            page: entry.page.clone(),
            transition: entry.transition,
            hosts_nested: entry.hosts_nested,
            nested: BTreeMap::new(),
        }
    }
}

/// Serialized form of a frame's full stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub stack: Vec<EntrySnapshot>,
}

/// One registered frame in a composite bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub id: FrameId,
    pub parent: Option<ParentLink>,
    pub snapshot: FrameSnapshot,
}

/// Composite suspend/resume bundle: the entire frame table at the moment of
/// backgrounding, suspended nested frames included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBundle {
    pub root: FrameId,
    pub frames: Vec<FrameRecord>,
}

impl StateBundle {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn record(&self, id: FrameId) -> Option<&FrameRecord> {
        self.frames.iter().find(|record| record.id == id)
    }
}

/// Envelope written to storage: fingerprint over the encoded bundle.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedBundle {
    fingerprint: Fingerprint,
    payload: Vec<u8>,
}

/// Fingerprint of an encoded bundle payload, domain-separated from other
/// BLAKE3 uses.
pub fn bundle_fingerprint(payload: &[u8]) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"navframe.bundle:");
    hasher.update(payload);
    *hasher.finalize().as_bytes()
}

/// Encode a bundle for persistence, prefixing the fingerprint of the
/// payload.
pub fn encode_bundle(bundle: &StateBundle) -> Result<Vec<u8>, StorageError> {
    let payload = bincode::serialize(bundle)
        .map_err(|e| StorageError::Codec(format!("failed to serialize bundle: {e}")))?;
    let envelope = PersistedBundle {
        fingerprint: bundle_fingerprint(&payload),
        payload,
    };
    bincode::serialize(&envelope)
        .map_err(|e| StorageError::Codec(format!("failed to serialize bundle envelope: {e}")))
}

/// Decode a persisted bundle, verifying the fingerprint before trusting the
/// payload.
pub fn decode_bundle(bytes: &[u8]) -> Result<StateBundle, StorageError> {
    let envelope: PersistedBundle = bincode::deserialize(bytes)
        .map_err(|e| StorageError::Codec(format!("failed to deserialize bundle envelope: {e}")))?;
    let actual = bundle_fingerprint(&envelope.payload);
    if actual != envelope.fingerprint {
        return Err(StorageError::FingerprintMismatch {
            expected: hex::encode(envelope.fingerprint),
            actual: hex::encode(actual),
        });
    }
    bincode::deserialize(&envelope.payload)
        .map_err(|e| StorageError::Codec(format!("failed to deserialize bundle: {e}")))
}
