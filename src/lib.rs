//! Navframe: Nested Navigation-Frame Engine
//!
//! Manages independently navigable page stacks ("frames") that can nest
//! inside pages of other frames: forward navigation with configurable
//! transitions, back navigation with parent delegation, and exact
//! preservation of the whole frame tree across process suspend/resume.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod lifecycle;
pub mod logging;
pub mod registry;
pub mod store;
pub mod transition;
pub mod types;
