#![doc(test(attr(deny(warnings))))]

//! Finance Core keeps income, expense, budget and investment records in a
//! reactive in-process store and derives the dashboard, report and budget
//! views from its snapshots.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
