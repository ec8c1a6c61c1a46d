#![doc(test(attr(deny(warnings))))]

//! Admissions Prompt turns an applicant's form answers into a structured
//! prompt for an admissions-advisor model, keeping the form and its source
//! list persisted between runs.

pub mod cli;
pub mod clipboard;
pub mod errors;
pub mod progress;
pub mod session;
pub mod utils;

pub use apg_config as config;
pub use apg_core as core;
pub use apg_domain as domain;
pub use apg_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Admissions Prompt tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
