//! Utility helpers shared across the crate.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and state
//! logic to improve reuse and testability.

pub mod feedback;
pub mod redirect;
pub(crate) mod sync;
