//! doctag-runtime - Types used by generated event-sourcing code
//!
//! Generated wrapper and aggregate units refer to this crate by absolute path.
//! It provides:
//! - [`Envelope`], the serialized event plus identity, ordering and typing metadata
//! - [`Event`], implemented by every generated event type
//! - [`RequestContext`], the ambient context stamped into new envelopes
//! - [`EventError`] for dispatch and decoding failures
//! - [`replay`] and [`ReplayState`], the stop-at-first-failure apply loop

mod context;
mod envelope;
mod error;
mod replay;

pub use context::RequestContext;
pub use envelope::{Envelope, Event};
pub use error::{EventError, EventResult};
pub use replay::{ReplayState, replay};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Envelope, Event, EventError, EventResult, ReplayState, RequestContext};
}
