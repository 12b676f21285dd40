//! Backing storage for a screen's `ViewState`.
//!
//! DESIGN
//! ======
//! The controller writes through `ViewStore` so the same lifecycle code drives
//! a reactive `RwSignal` in the browser and a plain mutex-backed cell in
//! headless hosts and tests. `write` reports `false` once the storage is gone
//! (a disposed signal), letting late results fall on the floor.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex};

use leptos::prelude::{GetUntracked, RwSignal, Update};

use super::session::ViewState;
use crate::util::sync::lock;

pub trait ViewStore: Clone + Send + Sync + 'static {
    /// Snapshot of the current state (default if the storage is gone).
    fn read(&self) -> ViewState;

    /// Mutate the state in place. Returns `false` if nothing was written.
    fn write(&self, f: impl FnOnce(&mut ViewState)) -> bool;
}

impl ViewStore for RwSignal<ViewState> {
    fn read(&self) -> ViewState {
        self.try_get_untracked().unwrap_or_default()
    }

    fn write(&self, f: impl FnOnce(&mut ViewState)) -> bool {
        self.try_update(f).is_some()
    }
}

/// Mutex-backed `ViewStore` for hosts without a reactive runtime.
#[derive(Clone, Debug, Default)]
pub struct SharedViewState(Arc<Mutex<ViewState>>);

impl SharedViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewStore for SharedViewState {
    fn read(&self) -> ViewState {
        lock(&self.0).clone()
    }

    fn write(&self, f: impl FnOnce(&mut ViewState)) -> bool {
        f(&mut lock(&self.0));
        true
    }
}
