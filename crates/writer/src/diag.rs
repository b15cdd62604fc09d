//! Diagnostic reporting for non-fatal writer conditions.
//!
//! The writer never prints; anything it cannot represent is reported to an
//! injected sink and the write continues. The only condition reported today
//! is a node kind the dispatcher has no builder for.

use std::sync::{Mutex, PoisonError};

/// Receives human-readable reports about nodes the writer skipped.
///
/// Reporting must not abort the write; implementations should be cheap and
/// infallible.
pub trait DiagnosticSink {
    fn report(&self, message: &str);
}

/// Default sink: forwards every report to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, message: &str) {
        tracing::warn!(target: "girkit_writer", "{message}");
    }
}

/// Sink that retains every report for later inspection. Intended for tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports received so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
