//! Application lifecycle coordination.
//!
//! Listens for suspend/resume signals and drives the registry through a
//! save/restore cycle: backgrounding captures the full frame tree into one
//! composite bundle and persists it; foregrounding reinstates the exact
//! pre-suspend topology before any navigation is accepted.

use crate::error::NavigationError;
use crate::registry::FrameRegistry;
use crate::store::BundleStore;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

/// Application lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Foreground,
    Background,
}

/// Drives the registry through suspend/resume.
///
/// Suspend is atomic with respect to in-flight navigation: any pending
/// transitions are completed (never cancelled — committed navigations
/// stand) before the snapshot is taken. A bundle that cannot be read back
/// or references unknown topology degrades to root-only state with a
/// logged warning instead of crashing.
pub struct LifecycleCoordinator {
    registry: Arc<FrameRegistry>,
    store: Arc<dyn BundleStore>,
    state: Mutex<AppState>,
}

impl LifecycleCoordinator {
    pub fn new(registry: Arc<FrameRegistry>, store: Arc<dyn BundleStore>) -> Self {
        Self {
            registry,
            store,
            state: Mutex::new(AppState::Foreground),
        }
    }

    pub fn state(&self) -> AppState {
        *self.state.lock()
    }

    /// Foreground → Background: snapshot every registered frame and persist
    /// the composite bundle. A duplicate signal is a no-op.
    pub fn on_background(&self) -> Result<(), NavigationError> {
        let mut state = self.state.lock();
        if *state == AppState::Background {
            return Ok(());
        }
        self.registry.finish_transitions();
        let bundle = self.registry.snapshot_all();
        self.store.put(&bundle)?;
        *state = AppState::Background;
        info!(frames = bundle.frame_count(), "navigation state persisted");
        Ok(())
    }

    /// Background → Foreground: rebuild every frame from the persisted
    /// bundle. A duplicate signal is a no-op; an unreadable or mismatched
    /// bundle falls back to root-only state.
    pub fn on_foreground(&self) -> Result<(), NavigationError> {
        let mut state = self.state.lock();
        if *state == AppState::Foreground {
            return Ok(());
        }
        self.restore_from_store();
        *state = AppState::Foreground;
        info!("navigation state restored");
        Ok(())
    }

    /// Rebuild state from the persisted bundle regardless of lifecycle
    /// state. Called at process start when the previous instance was
    /// killed while backgrounded, so there was no paired foreground
    /// signal.
    pub fn recover(&self) -> Result<(), NavigationError> {
        let mut state = self.state.lock();
        self.restore_from_store();
        *state = AppState::Foreground;
        info!("navigation state recovered at process start");
        Ok(())
    }

    fn restore_from_store(&self) {
        match self.store.load() {
            Ok(Some(bundle)) => {
                if let Err(err) = self.registry.restore_all(&bundle) {
                    warn!(error = %err, "restore bundle mismatch, falling back to root-only state");
                    self.registry.retain_root_only();
                }
            }
            Ok(None) => {
                // Nothing persisted: keep whatever state is in memory.
            }
            Err(err) => {
                warn!(error = %err, "persisted bundle unreadable, falling back to root-only state");
                self.registry.retain_root_only();
            }
        }
    }
}
