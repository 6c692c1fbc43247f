//! Visual transition descriptors attached to navigation entries.
//!
//! A `TransitionSpec` is created at navigation-request time and carried on
//! the entry it produced. The engine itself only distinguishes `None` from
//! everything else: non-instant transitions gate admission of the next
//! navigation until the embedding shell signals completion.

use serde::{Deserialize, Serialize};

/// Default duration used when a request does not specify one.
pub const DEFAULT_TRANSITION_MS: u64 = 300;

/// Enumerated transition style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Default,
    Slide,
    Fade,
    Flip,
    None,
}

impl TransitionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionKind::Default => "default",
            TransitionKind::Slide => "slide",
            TransitionKind::Fade => "fade",
            TransitionKind::Flip => "flip",
            TransitionKind::None => "none",
        }
    }
}

/// Direction hint for directional transition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Immutable descriptor of a navigation's visual effect and duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub kind: TransitionKind,
    #[serde(default)]
    pub direction: Option<TransitionDirection>,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

fn default_duration_ms() -> u64 {
    DEFAULT_TRANSITION_MS
}

impl TransitionSpec {
    pub fn new(kind: TransitionKind, direction: Option<TransitionDirection>, duration_ms: u64) -> Self {
        Self {
            kind,
            direction,
            duration_ms,
        }
    }

    /// Transition that finishes immediately and never gates admission.
    pub const fn none() -> Self {
        Self {
            kind: TransitionKind::None,
            direction: None,
            duration_ms: 0,
        }
    }

    pub fn slide(direction: TransitionDirection) -> Self {
        Self::new(TransitionKind::Slide, Some(direction), DEFAULT_TRANSITION_MS)
    }

    /// Whether this transition completes without an explicit completion
    /// signal. Only `None` is instant; duration is carried for the renderer
    /// and never inspected for gating.
    pub fn is_instant(&self) -> bool {
        matches!(self.kind, TransitionKind::None)
    }
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self::new(TransitionKind::Default, None, DEFAULT_TRANSITION_MS)
    }
}
