//! Process-wide frame registry.
//!
//! The registry owns every live frame (root and nested), resolves nested
//! frames by `(parent frame, host page, slot)`, tracks the active chain,
//! and captures/restores the whole frame table for suspend/resume. All
//! mutation is serialized through a single-writer lock; frames are never
//! reachable outside it.

use crate::error::NavigationError;
use crate::frame::{
    snapshot::{FrameRecord, StateBundle},
    Frame, FrameSnapshot, NavigationEntry, ParentLink,
};
use crate::transition::TransitionSpec;
use crate::types::{FrameId, PageId, SlotId};
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info, warn};

/// Default bound on retained suspended nested frames.
pub const DEFAULT_SUSPENDED_FRAME_CAP: usize = 32;

type ChildKey = (FrameId, PageId, SlotId);

struct RegistryInner {
    frames: HashMap<FrameId, Frame>,
    children: HashMap<ChildKey, FrameId>,
    /// Suspended nested frames in suspension order, oldest first.
    suspended: VecDeque<FrameId>,
    root: FrameId,
    next_id: u64,
    suspended_cap: usize,
}

/// Indexed registry of all live frames.
///
/// Suspension policy: a nested frame whose host entry is popped stays
/// registered (inactive) so that revisiting the host page restores its
/// stack unchanged. Retention is bounded: beyond `suspended_cap` the
/// least-recently-suspended frame and its descendants are unregistered and
/// a later revisit starts a fresh child.
pub struct FrameRegistry {
    inner: RwLock<RegistryInner>,
}

impl FrameRegistry {
    /// Create a registry with its root frame.
    pub fn new(suspended_cap: usize) -> Self {
        let root = FrameId::new(1);
        let mut frames = HashMap::new();
        frames.insert(root, Frame::new(root, None));
        Self {
            inner: RwLock::new(RegistryInner {
                frames,
                children: HashMap::new(),
                suspended: VecDeque::new(),
                root,
                next_id: 2,
                suspended_cap,
            }),
        }
    }

    pub fn root_id(&self) -> FrameId {
        self.inner.read().root
    }

    pub fn len(&self) -> usize {
        self.inner.read().frames.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root frame always exists.
        false
    }

    pub fn contains(&self, frame: FrameId) -> bool {
        self.inner.read().frames.contains_key(&frame)
    }

    /// Push a new entry onto the given frame.
    ///
    /// If the destination page hosts a nested frame, the default-slot child
    /// is resolved-or-created now that the page is active.
    pub fn navigate(
        &self,
        frame: FrameId,
        page: PageId,
        transition: TransitionSpec,
        hosts_nested: bool,
    ) -> Result<(), NavigationError> {
        let mut inner = self.inner.write();
        let f = inner
            .frames
            .get_mut(&frame)
            .ok_or(NavigationError::FrameNotFound(frame))?;
        f.navigate(page.clone(), transition, hosts_nested)?;
        if hosts_nested {
            resolve_or_create_locked(&mut inner, frame, page, SlotId::new())?;
        }
        Ok(())
    }

    /// Pop the top entry of the given frame.
    ///
    /// Returns `Ok(false)` without mutation at a stack of one; the caller
    /// (typically `resolve_back_target`) decides whether to try the parent.
    /// Popping past a host page suspends its nested frames.
    pub fn go_back(&self, frame: FrameId) -> Result<bool, NavigationError> {
        let mut inner = self.inner.write();
        let f = inner
            .frames
            .get_mut(&frame)
            .ok_or(NavigationError::FrameNotFound(frame))?;
        let Some(popped) = f.pop_entry()? else {
            return Ok(false);
        };
        if popped.hosts_nested {
            suspend_children_locked(&mut inner, frame, &popped.page);
        }
        reactivate_top_locked(&mut inner, frame)?;
        Ok(true)
    }

    /// Resolve the nested frame mounted at `(parent, page, slot)`, creating
    /// it on first activation and reusing it afterwards.
    pub fn resolve_or_create_child(
        &self,
        parent: FrameId,
        page: PageId,
        slot: SlotId,
    ) -> Result<FrameId, NavigationError> {
        let mut inner = self.inner.write();
        resolve_or_create_locked(&mut inner, parent, page, slot)
    }

    /// Look up a nested frame without creating it.
    pub fn resolve_child(&self, parent: FrameId, page: &PageId, slot: &str) -> Option<FrameId> {
        let inner = self.inner.read();
        inner
            .children
            .get(&(parent, page.clone(), slot.to_string()))
            .copied()
    }

    /// Remove a frame and all of its descendants from the registry. The
    /// root frame cannot be unregistered.
    pub fn unregister(&self, frame: FrameId) -> Result<(), NavigationError> {
        let mut inner = self.inner.write();
        if frame == inner.root {
            return Err(NavigationError::InvalidNavigation(
                "root frame cannot be unregistered".to_string(),
            ));
        }
        if !inner.frames.contains_key(&frame) {
            return Err(NavigationError::FrameNotFound(frame));
        }
        remove_subtree_locked(&mut inner, frame);
        Ok(())
    }

    /// Signal transition completion on one frame.
    pub fn complete_transition(&self, frame: FrameId) -> Result<bool, NavigationError> {
        let mut inner = self.inner.write();
        let f = inner
            .frames
            .get_mut(&frame)
            .ok_or(NavigationError::FrameNotFound(frame))?;
        Ok(f.complete_transition())
    }

    /// Deterministically finish every in-flight transition. Called before
    /// snapshotting so suspend never races an animation.
    pub fn finish_transitions(&self) {
        let mut inner = self.inner.write();
        for frame in inner.frames.values_mut() {
            frame.complete_transition();
        }
    }

    /// The path from the root frame to the deepest active nested frame.
    pub fn active_chain(&self) -> Vec<FrameId> {
        let inner = self.inner.read();
        active_chain_locked(&inner)
    }

    /// The deepest frame of the active chain — the default navigation
    /// target.
    pub fn active_frame(&self) -> FrameId {
        let inner = self.inner.read();
        *active_chain_locked(&inner)
            .last()
            .unwrap_or(&inner.root)
    }

    /// Concatenation of active pages along the chain: what is visibly
    /// rendered.
    pub fn active_pages(&self) -> Vec<PageId> {
        let inner = self.inner.read();
        active_chain_locked(&inner)
            .iter()
            .filter_map(|id| inner.frames.get(id))
            .filter_map(|frame| frame.current().ok())
            .map(|entry| entry.page.clone())
            .collect()
    }

    /// Walk the active chain from the deepest nested frame upward and
    /// return the first frame whose `go_back` would pop an entry. `None`
    /// means the application is at its home state.
    pub fn resolve_back_target(&self) -> Option<FrameId> {
        let inner = self.inner.read();
        active_chain_locked(&inner)
            .into_iter()
            .rev()
            .find(|id| inner.frames.get(id).map(Frame::depth).unwrap_or(0) > 1)
    }

    pub fn depth(&self, frame: FrameId) -> Result<usize, NavigationError> {
        let inner = self.inner.read();
        inner
            .frames
            .get(&frame)
            .map(Frame::depth)
            .ok_or(NavigationError::FrameNotFound(frame))
    }

    pub fn is_busy(&self, frame: FrameId) -> Result<bool, NavigationError> {
        let inner = self.inner.read();
        inner
            .frames
            .get(&frame)
            .map(Frame::is_busy)
            .ok_or(NavigationError::FrameNotFound(frame))
    }

    pub fn current_page(&self, frame: FrameId) -> Result<PageId, NavigationError> {
        let inner = self.inner.read();
        let f = inner
            .frames
            .get(&frame)
            .ok_or(NavigationError::FrameNotFound(frame))?;
        Ok(f.current()?.page.clone())
    }

    /// Cloned stack entries, top last. For inspection and tests.
    pub fn entries(&self, frame: FrameId) -> Result<Vec<NavigationEntry>, NavigationError> {
        let inner = self.inner.read();
        let f = inner
            .frames
            .get(&frame)
            .ok_or(NavigationError::FrameNotFound(frame))?;
        Ok(f.entries().to_vec())
    }

    /// Recursive snapshot of one frame with the state of its live nested
    /// frames folded into the entries that host them.
    pub fn snapshot_frame(&self, frame: FrameId) -> Result<FrameSnapshot, NavigationError> {
        let inner = self.inner.read();
        snapshot_frame_locked(&inner, frame)
    }

    /// Restore one frame from a recursive snapshot, materializing the
    /// nested frames its entries reference.
    pub fn restore_frame(
        &self,
        frame: FrameId,
        snapshot: &FrameSnapshot,
    ) -> Result<(), NavigationError> {
        let mut inner = self.inner.write();
        restore_frame_locked(&mut inner, frame, snapshot)
    }

    /// Capture the entire frame table, suspended frames included.
    pub fn snapshot_all(&self) -> StateBundle {
        let inner = self.inner.read();
        let mut records: Vec<FrameRecord> = inner
            .frames
            .values()
            .map(|frame| FrameRecord {
                id: frame.id(),
                parent: frame.parent().cloned(),
                snapshot: frame.snapshot(),
            })
            .collect();
        records.sort_by_key(|record| record.id);
        StateBundle {
            root: inner.root,
            frames: records,
        }
    }

    /// Replace the whole frame table from a bundle.
    ///
    /// Validates topology before touching any state: unknown parent
    /// references, a missing root record, or duplicate ids yield
    /// `RestoreMismatch` and leave the registry untouched. Idempotent.
    pub fn restore_all(&self, bundle: &StateBundle) -> Result<(), NavigationError> {
        let mut inner = self.inner.write();
        validate_bundle(bundle)?;

        let mut frames = HashMap::new();
        let mut children = HashMap::new();
        for record in &bundle.frames {
            let stack = record
                .snapshot
                .stack
                .iter()
                .map(|entry| {
                    NavigationEntry::new(entry.page.clone(), entry.transition, entry.hosts_nested)
                })
                .collect();
            frames.insert(
                record.id,
                Frame::from_parts(record.id, record.parent.clone(), stack),
            );
            if let Some(link) = &record.parent {
                children.insert(
                    (link.frame, link.page.clone(), link.slot.clone()),
                    record.id,
                );
            }
        }

        // A nested frame whose host page is no longer on its parent's stack
        // was suspended at capture time. Suspension order is not part of the
        // bundle; ids give a deterministic replacement.
        let mut suspended: Vec<FrameId> = bundle
            .frames
            .iter()
            .filter_map(|record| {
                let link = record.parent.as_ref()?;
                let parent = frames.get(&link.frame)?;
                let on_stack = parent
                    .entries()
                    .iter()
                    .any(|entry| entry.hosts_nested && entry.page == link.page);
                (!on_stack).then_some(record.id)
            })
            .collect();
        suspended.sort();

        let next_id = bundle
            .frames
            .iter()
            .map(|record| record.id.as_u64())
            .max()
            .unwrap_or(1)
            + 1;

        inner.frames = frames;
        inner.children = children;
        inner.suspended = suspended.into();
        inner.root = bundle.root;
        inner.next_id = next_id;
        info!(frames = inner.frames.len(), "registry restored from bundle");
        Ok(())
    }

    /// Drop everything but the root frame. Fallback for unreadable or
    /// mismatched restore bundles.
    pub fn retain_root_only(&self) {
        let mut inner = self.inner.write();
        let root = inner.root;
        inner.frames.retain(|id, _| *id == root);
        inner.children.clear();
        inner.suspended.clear();
    }
}

fn resolve_or_create_locked(
    inner: &mut RegistryInner,
    parent: FrameId,
    page: PageId,
    slot: SlotId,
) -> Result<FrameId, NavigationError> {
    if !inner.frames.contains_key(&parent) {
        return Err(NavigationError::FrameNotFound(parent));
    }
    let key = (parent, page.clone(), slot.clone());
    if let Some(existing) = inner.children.get(&key).copied() {
        // Reuse: the host page was revisited, the child resumes as left.
        inner.suspended.retain(|id| *id != existing);
        return Ok(existing);
    }
    let id = FrameId::new(inner.next_id);
    inner.next_id += 1;
    let link = ParentLink {
        frame: parent,
        page: page.clone(),
        slot,
    };
    inner.frames.insert(id, Frame::new(id, Some(link)));
    inner.children.insert(key, id);
    debug!(parent = %parent, page = %page, child = %id, "nested frame created");
    Ok(id)
}

/// Suspend every nested frame mounted on `page`, unless another entry for
/// the same page remains on the parent's stack.
fn suspend_children_locked(inner: &mut RegistryInner, parent: FrameId, page: &PageId) {
    let still_hosted = inner
        .frames
        .get(&parent)
        .map(|frame| {
            frame
                .entries()
                .iter()
                .any(|entry| entry.hosts_nested && entry.page == *page)
        })
        .unwrap_or(false);
    if still_hosted {
        return;
    }
    let mut ids: Vec<FrameId> = inner
        .children
        .iter()
        .filter(|((p, pg, _), _)| *p == parent && pg == page)
        .map(|(_, id)| *id)
        .collect();
    ids.sort();
    for id in ids {
        if !inner.suspended.contains(&id) {
            debug!(frame = %id, page = %page, "nested frame suspended");
            inner.suspended.push_back(id);
        }
    }
    enforce_cap_locked(inner);
}

/// After a pop, lazily resolve nested frames for the newly active page.
fn reactivate_top_locked(
    inner: &mut RegistryInner,
    frame: FrameId,
) -> Result<(), NavigationError> {
    let top = match inner.frames.get(&frame) {
        Some(f) => match f.current() {
            Ok(entry) => (entry.page.clone(), entry.hosts_nested),
            Err(_) => return Ok(()),
        },
        None => return Ok(()),
    };
    if top.1 {
        resolve_or_create_locked(inner, frame, top.0, SlotId::new())?;
    }
    Ok(())
}

fn enforce_cap_locked(inner: &mut RegistryInner) {
    while inner.suspended.len() > inner.suspended_cap {
        let Some(oldest) = inner.suspended.pop_front() else {
            break;
        };
        warn!(frame = %oldest, cap = inner.suspended_cap, "evicting suspended nested frame");
        remove_subtree_locked(inner, oldest);
    }
}

fn remove_subtree_locked(inner: &mut RegistryInner, frame: FrameId) {
    let mut doomed = vec![frame];
    let mut queue = vec![frame];
    while let Some(parent) = queue.pop() {
        let kids: Vec<FrameId> = inner
            .children
            .iter()
            .filter(|((p, _, _), _)| *p == parent)
            .map(|(_, id)| *id)
            .collect();
        for kid in kids {
            doomed.push(kid);
            queue.push(kid);
        }
    }
    for id in &doomed {
        inner.frames.remove(id);
    }
    inner.children.retain(|_, id| !doomed.contains(id));
    inner.suspended.retain(|id| !doomed.contains(id));
}

fn active_chain_locked(inner: &RegistryInner) -> Vec<FrameId> {
    let mut chain = vec![inner.root];
    let mut current = inner.root;
    loop {
        let Some(frame) = inner.frames.get(&current) else {
            break;
        };
        let Ok(top) = frame.current() else {
            break;
        };
        if !top.hosts_nested {
            break;
        }
        // Sibling frames on one page are visited in slot order. A child
        // that has never been navigated shows no content yet, so the first
        // non-empty child continues the chain; an all-empty page falls
        // back to the first slot.
        let mut candidates: Vec<(&SlotId, FrameId)> = inner
            .children
            .iter()
            .filter(|((p, pg, _), _)| *p == current && *pg == top.page)
            .map(|((_, _, slot), id)| (slot, *id))
            .collect();
        candidates.sort();
        let chosen = candidates
            .iter()
            .find(|(_, id)| inner.frames.get(id).map(Frame::depth).unwrap_or(0) > 0)
            .or_else(|| candidates.first());
        let Some((_, child)) = chosen else {
            break;
        };
        chain.push(*child);
        current = *child;
    }
    chain
}

fn snapshot_frame_locked(
    inner: &RegistryInner,
    frame: FrameId,
) -> Result<FrameSnapshot, NavigationError> {
    let f = inner
        .frames
        .get(&frame)
        .ok_or(NavigationError::FrameNotFound(frame))?;
    let mut snapshot = f.snapshot();
    for entry in &mut snapshot.stack {
        if !entry.hosts_nested {
            continue;
        }
        let slots: Vec<(SlotId, FrameId)> = inner
            .children
            .iter()
            .filter(|((p, pg, _), _)| *p == frame && *pg == entry.page)
            .map(|((_, _, slot), id)| (slot.clone(), *id))
            .collect();
        for (slot, child) in slots {
            entry
                .nested
                .insert(slot, snapshot_frame_locked(inner, child)?);
        }
    }
    Ok(snapshot)
}

fn restore_frame_locked(
    inner: &mut RegistryInner,
    frame: FrameId,
    snapshot: &FrameSnapshot,
) -> Result<(), NavigationError> {
    let f = inner
        .frames
        .get_mut(&frame)
        .ok_or(NavigationError::FrameNotFound(frame))?;
    f.restore(snapshot);

    let mut work: Vec<(FrameId, PageId, SlotId, FrameSnapshot)> = Vec::new();
    queue_nested(&mut work, frame, snapshot);
    while let Some((parent, page, slot, child_snapshot)) = work.pop() {
        let child = resolve_or_create_locked(inner, parent, page, slot)?;
        let child_frame = inner
            .frames
            .get_mut(&child)
            .ok_or(NavigationError::FrameNotFound(child))?;
        child_frame.restore(&child_snapshot);
        queue_nested(&mut work, child, &child_snapshot);
    }
    Ok(())
}

fn queue_nested(
    work: &mut Vec<(FrameId, PageId, SlotId, FrameSnapshot)>,
    parent: FrameId,
    snapshot: &FrameSnapshot,
) {
    for entry in &snapshot.stack {
        for (slot, nested) in &entry.nested {
            work.push((parent, entry.page.clone(), slot.clone(), nested.clone()));
        }
    }
}

fn validate_bundle(bundle: &StateBundle) -> Result<(), NavigationError> {
    let mut ids = std::collections::HashSet::new();
    for record in &bundle.frames {
        if !ids.insert(record.id) {
            return Err(NavigationError::RestoreMismatch(format!(
                "duplicate frame id {}",
                record.id
            )));
        }
    }
    let root = bundle
        .record(bundle.root)
        .ok_or_else(|| {
            NavigationError::RestoreMismatch(format!("root {} missing from bundle", bundle.root))
        })?;
    if root.parent.is_some() {
        return Err(NavigationError::RestoreMismatch(
            "root frame has a parent reference".to_string(),
        ));
    }
    for record in &bundle.frames {
        if let Some(link) = &record.parent {
            if !ids.contains(&link.frame) {
                return Err(NavigationError::RestoreMismatch(format!(
                    "{} references unknown parent {}",
                    record.id, link.frame
                )));
            }
        }
    }
    Ok(())
}
