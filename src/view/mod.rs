//! UI-agnostic view models, one builder per dashboard tab.
//!
//! Each builder runs the shared derivation pipeline over its record
//! collection and maps the visible rows to a [`common::TableViewModel`].
//! The export functions reuse the same cell text without pagination.

pub mod annotations;
pub mod common;
pub mod experts;
pub mod projects;
pub mod queue;
pub mod runs;
pub mod tasks;
pub mod versions;
