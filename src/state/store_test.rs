use super::*;
use leptos::prelude::Dispose;

// =============================================================
// SharedViewState
// =============================================================

#[test]
fn shared_view_state_clones_share_storage() {
    let store = SharedViewState::new();
    let other = store.clone();
    assert!(store.write(|s| s.is_busy = true));
    assert!(other.read().is_busy);
}

// =============================================================
// RwSignal<ViewState>
// =============================================================

#[test]
fn signal_store_reads_back_writes() {
    let signal = RwSignal::new(ViewState::default());
    assert!(signal.write(|s| s.is_busy = true));
    assert!(ViewStore::read(&signal).is_busy);
}

#[test]
fn disposed_signal_ignores_writes() {
    let signal = RwSignal::new(ViewState::default());
    signal.dispose();
    assert!(!signal.write(|s| s.is_busy = true));
    assert_eq!(ViewStore::read(&signal), ViewState::default());
}
