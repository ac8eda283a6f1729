//! One-time process bootstrap.
//!
//! A warm environment may run the entry point more than once; setup must run
//! at most once per process and be safe to skip.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ObservabilityConfig;
use crate::observability::logging::init_diagnostics;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Run setup unless it already ran. Returns true when this call ran it.
pub fn init(config: &ObservabilityConfig) -> bool {
    if INITIALIZED
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return false;
    }

    let installed = init_diagnostics(config);
    tracing::debug!(
        subscriber_installed = installed,
        diag_debug = config.diag_debug(),
        "Bootstrap complete"
    );
    true
}

pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}
