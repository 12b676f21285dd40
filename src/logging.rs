//! Log output setup.
//!
//! Events are emitted with `tracing`. Native hosts install a `fmt` subscriber;
//! in the browser `tracing`'s `log` feature forwards events to the `log`
//! facade, which `console_log` writes to the devtools console.

/// Install the stderr `fmt` subscriber. Later calls are no-ops.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    let _ = tracing_subscriber::fmt().try_init();
}

/// Route panics and log records to the browser console. Later calls are no-ops.
#[cfg(feature = "csr")]
pub fn init_browser() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}
