//! Ambient request context stamped into new envelopes

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Context of the request that produces events.
///
/// Clones share one sequence counter, so envelopes wrapped through any clone
/// get strictly increasing sequence numbers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID
    pub request_uid: String,
    /// Optional session ID for tracking across requests
    pub session_uid: Option<String>,
    sequence: Arc<AtomicU64>,
}

impl RequestContext {
    /// Create a context with a fresh request ID and a counter starting at 1
    pub fn new() -> Self {
        Self {
            request_uid: Uuid::new_v4().to_string(),
            session_uid: None,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Set the request ID
    pub fn with_request_uid(mut self, uid: impl Into<String>) -> Self {
        self.request_uid = uid.into();
        self
    }

    /// Set the session ID
    pub fn with_session_uid(mut self, uid: impl Into<String>) -> Self {
        self.session_uid = Some(uid.into());
        self
    }

    /// Continue numbering after `last` (e.g. the highest number already stored)
    pub fn with_last_sequence_number(self, last: u64) -> Self {
        self.sequence.store(last, Ordering::SeqCst);
        self
    }

    /// Claim the next sequence number
    pub fn next_sequence_number(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The most recently claimed sequence number, 0 when none was claimed
    pub fn last_sequence_number(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "context/context_tests.rs"]
mod context_tests;
