//! Navigation Frames
//!
//! A frame is an independently navigable back-stack of pages. The top entry
//! is the active page. Once a frame has performed its first navigation its
//! stack never becomes empty again: popping the last entry is a no-op and
//! back-delegation to the parent frame is the registry's job.

pub mod snapshot;

pub use snapshot::{EntrySnapshot, FrameSnapshot, StateBundle};

use crate::error::NavigationError;
use crate::transition::TransitionSpec;
use crate::types::{FrameId, PageId, SlotId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single stack element: target page identity, the transition used to
/// reach it, and whether the page hosts nested frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub page: PageId,
    pub transition: TransitionSpec,
    pub hosts_nested: bool,
}

impl NavigationEntry {
    pub fn new(page: PageId, transition: TransitionSpec, hosts_nested: bool) -> Self {
        Self {
            page,
            transition,
            hosts_nested,
        }
    }
}

/// Reference from a nested frame to the host page that mounts it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentLink {
    pub frame: FrameId,
    pub page: PageId,
    pub slot: SlotId,
}

/// An ordered back-stack of navigation entries.
///
/// All mutations are atomic: a rejected call leaves the stack exactly as it
/// was. While a non-instant transition is in flight the frame rejects
/// further navigation with `NavigationBusy` until `complete_transition` is
/// called; this is the engine's only suspension point.
#[derive(Debug, Clone)]
pub struct Frame {
    id: FrameId,
    parent: Option<ParentLink>,
    stack: Vec<NavigationEntry>,
    in_flight: Option<TransitionSpec>,
}

impl Frame {
    pub(crate) fn new(id: FrameId, parent: Option<ParentLink>) -> Self {
        Self {
            id,
            parent,
            stack: Vec::new(),
            in_flight: None,
        }
    }

    pub(crate) fn from_parts(
        id: FrameId,
        parent: Option<ParentLink>,
        stack: Vec<NavigationEntry>,
    ) -> Self {
        Self {
            id,
            parent,
            stack,
            in_flight: None,
        }
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn parent(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    /// Number of entries on the back-stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether a non-instant transition is awaiting its completion signal.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.stack
    }

    /// Push a new entry with the given transition.
    ///
    /// Rejected with `NavigationBusy` while a transition is in flight; the
    /// stack is left untouched on any error.
    pub fn navigate(
        &mut self,
        page: PageId,
        transition: TransitionSpec,
        hosts_nested: bool,
    ) -> Result<(), NavigationError> {
        if self.in_flight.is_some() {
            return Err(NavigationError::NavigationBusy(self.id));
        }
        if !transition.is_instant() {
            self.in_flight = Some(transition);
        }
        debug!(frame = %self.id, page = %page, kind = transition.kind.as_str(), "navigate");
        self.stack.push(NavigationEntry::new(page, transition, hosts_nested));
        Ok(())
    }

    /// Pop the top entry.
    ///
    /// Returns `Ok(true)` and the new top becomes active when the stack has
    /// more than one entry. At a stack of one this is a no-op returning
    /// `Ok(false)`; the caller decides whether to delegate to the parent.
    pub fn go_back(&mut self) -> Result<bool, NavigationError> {
        self.pop_entry().map(|popped| popped.is_some())
    }

    /// Pop the top entry, returning it for suspension bookkeeping.
    pub(crate) fn pop_entry(&mut self) -> Result<Option<NavigationEntry>, NavigationError> {
        if self.in_flight.is_some() {
            return Err(NavigationError::NavigationBusy(self.id));
        }
        if self.stack.len() <= 1 {
            return Ok(None);
        }
        let popped = self
            .stack
            .pop()
            .ok_or(NavigationError::EmptyFrame(self.id))?;
        // Back navigation replays the arrival transition in reverse, so it
        // gates admission the same way the forward navigation did.
        if !popped.transition.is_instant() {
            self.in_flight = Some(popped.transition);
        }
        debug!(frame = %self.id, page = %popped.page, "go_back");
        Ok(Some(popped))
    }

    /// The active entry (top of stack).
    pub fn current(&self) -> Result<&NavigationEntry, NavigationError> {
        self.stack.last().ok_or(NavigationError::EmptyFrame(self.id))
    }

    /// Signal that the in-flight transition finished. Returns whether a
    /// transition was actually pending.
    pub fn complete_transition(&mut self) -> bool {
        self.in_flight.take().is_some()
    }

    /// Deterministic, side-effect-free capture of this frame's stack.
    ///
    /// Live nested-frame state is folded in by the registry, which owns the
    /// child frames; a bare frame snapshot carries empty nested maps.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            stack: self.stack.iter().map(EntrySnapshot::from_entry).collect(),
        }
    }

    /// Replace the stack wholesale from a snapshot. Idempotent; any pending
    /// transition is discarded since the restored state is post-transition.
    pub fn restore(&mut self, snapshot: &FrameSnapshot) {
        self.stack = snapshot
            .stack
            .iter()
            .map(|entry| NavigationEntry::new(entry.page.clone(), entry.transition, entry.hosts_nested))
            .collect();
        self.in_flight = None;
    }
}
