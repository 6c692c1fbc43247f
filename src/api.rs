//! Engine surface for the application shell.
//!
//! The shell wires platform events to these calls: hardware back,
//! app backgrounding/foregrounding, and UI-driven navigation. Everything
//! else in the crate is reachable through the registry this facade owns.

use crate::error::NavigationError;
use crate::lifecycle::{AppState, LifecycleCoordinator};
use crate::registry::FrameRegistry;
use crate::store::BundleStore;
use crate::transition::TransitionSpec;
use crate::types::{FrameId, PageId, SlotId};
use std::sync::Arc;

/// Per-request navigation options.
#[derive(Debug, Clone, Default)]
pub struct NavigateOptions {
    pub transition: TransitionSpec,
    /// Whether the destination page hosts a nested frame (default slot).
    pub hosts_nested: bool,
    /// Explicit target frame; defaults to the deepest active frame.
    pub frame: Option<FrameId>,
}

impl NavigateOptions {
    pub fn with_transition(transition: TransitionSpec) -> Self {
        Self {
            transition,
            ..Self::default()
        }
    }

    pub fn nested_host(transition: TransitionSpec) -> Self {
        Self {
            transition,
            hosts_nested: true,
            frame: None,
        }
    }

    pub fn on_frame(mut self, frame: FrameId) -> Self {
        self.frame = Some(frame);
        self
    }
}

/// The navigation engine as seen by the embedding application.
pub struct NavigationApi {
    registry: Arc<FrameRegistry>,
    lifecycle: LifecycleCoordinator,
}

impl NavigationApi {
    pub fn new(registry: Arc<FrameRegistry>, store: Arc<dyn BundleStore>) -> Self {
        let lifecycle = LifecycleCoordinator::new(registry.clone(), store);
        Self {
            registry,
            lifecycle,
        }
    }

    pub fn registry(&self) -> &Arc<FrameRegistry> {
        &self.registry
    }

    pub fn app_state(&self) -> AppState {
        self.lifecycle.state()
    }

    /// Navigate to a page. Invoked by UI event handlers (e.g. a list item
    /// tap).
    pub fn navigate_to(&self, page: &str, options: NavigateOptions) -> Result<(), NavigationError> {
        let page = PageId::new(page)?;
        let frame = options.frame.unwrap_or_else(|| self.registry.active_frame());
        self.registry
            .navigate(frame, page, options.transition, options.hosts_nested)
    }

    /// Programmatic back navigation on the deepest frame that can go back.
    /// Returns whether an entry was popped.
    pub fn go_back(&self) -> Result<bool, NavigationError> {
        match self.registry.resolve_back_target() {
            Some(frame) => self.registry.go_back(frame),
            None => Ok(false),
        }
    }

    /// Back navigation on a specific frame (e.g. a back button rendered
    /// inside a nested frame).
    pub fn go_back_on(&self, frame: FrameId) -> Result<bool, NavigationError> {
        self.registry.go_back(frame)
    }

    /// Platform back-button handling. Returns `false` when no frame in the
    /// active chain can go back — the caller then applies the platform
    /// default (exit or ignore).
    pub fn on_hardware_back(&self) -> Result<bool, NavigationError> {
        self.go_back()
    }

    pub fn on_app_background(&self) -> Result<(), NavigationError> {
        self.lifecycle.on_background()
    }

    pub fn on_app_foreground(&self) -> Result<(), NavigationError> {
        self.lifecycle.on_foreground()
    }

    /// Cold-start recovery: reinstate persisted state when the previous
    /// process instance was killed while backgrounded.
    pub fn recover_persisted(&self) -> Result<(), NavigationError> {
        self.lifecycle.recover()
    }

    /// Completion signal from the shell's animation layer. Finishes the
    /// deepest in-flight transition on the active chain; returns whether
    /// one was pending.
    pub fn complete_transition(&self) -> Result<bool, NavigationError> {
        for frame in self.registry.active_chain().into_iter().rev() {
            if self.registry.is_busy(frame)? {
                return self.registry.complete_transition(frame);
            }
        }
        Ok(false)
    }

    /// Mount a nested frame in a named slot of a host page. Pages hosting a
    /// single frame use the default slot implicitly via `NavigateOptions`.
    pub fn mount_nested(
        &self,
        parent: FrameId,
        page: &str,
        slot: &str,
    ) -> Result<FrameId, NavigationError> {
        let page = PageId::new(page)?;
        self.registry
            .resolve_or_create_child(parent, page, SlotId::from(slot))
    }

    /// The visibly rendered pages, root-first.
    pub fn active_pages(&self) -> Vec<PageId> {
        self.registry.active_pages()
    }
}
