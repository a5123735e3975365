//! Event envelope and the trait implemented by generated event types

use crate::context::RequestContext;
use crate::error::{EventError, EventResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An event type belonging to an aggregate.
///
/// Implemented by generated wrapper units; `EVENT_TYPE_NAME` is the tag that
/// dispatch matches on.
pub trait Event: Serialize + DeserializeOwned {
    /// Tag stored in [`Envelope::event_type_name`]
    const EVENT_TYPE_NAME: &'static str;

    /// Name of the aggregate the event belongs to
    const AGGREGATE_NAME: &'static str;

    /// Identifier of the aggregate instance, empty when the event does not name one
    fn aggregate_uid(&self) -> String {
        String::new()
    }
}

/// A serialized event with identity, ordering and typing metadata.
///
/// The wire shape uses camelCase names: `uuid`, `sequenceNumber`,
/// `timestamp`, `aggregateName`, `aggregateUid`, `eventTypeName`, `eventData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Unique identifier of this envelope
    pub uuid: String,
    /// Position assigned by the producing request context
    pub sequence_number: u64,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    pub aggregate_name: String,
    pub aggregate_uid: String,
    pub event_type_name: String,
    /// JSON-encoded event
    pub event_data: String,
}

impl Envelope {
    /// Serialize `event` into a new envelope stamped from `ctx`
    pub fn wrap<E: Event>(event: &E, ctx: &RequestContext) -> EventResult<Self> {
        let event_data =
            serde_json::to_string(event).map_err(|e| EventError::encode(E::EVENT_TYPE_NAME, e))?;

        let envelope = Self {
            uuid: Uuid::new_v4().to_string(),
            sequence_number: ctx.next_sequence_number(),
            timestamp: Utc::now(),
            aggregate_name: E::AGGREGATE_NAME.to_string(),
            aggregate_uid: event.aggregate_uid(),
            event_type_name: E::EVENT_TYPE_NAME.to_string(),
            event_data,
        };
        tracing::trace!(
            "Wrapped {} #{} for {} `{}`",
            envelope.event_type_name,
            envelope.sequence_number,
            envelope.aggregate_name,
            envelope.aggregate_uid
        );
        Ok(envelope)
    }

    /// Whether the envelope carries an `E`
    pub fn is_event<E: Event>(&self) -> bool {
        self.event_type_name == E::EVENT_TYPE_NAME
    }

    /// Decode the payload as an `E`.
    ///
    /// Fails when the envelope carries another event type or the payload does
    /// not decode.
    pub fn unwrap_event<E: Event>(&self) -> EventResult<E> {
        if !self.is_event::<E>() {
            return Err(EventError::decode(
                E::EVENT_TYPE_NAME,
                format!("envelope carries a {} event", self.event_type_name),
            ));
        }
        serde_json::from_str(&self.event_data).map_err(|e| EventError::decode(E::EVENT_TYPE_NAME, e))
    }

    /// Decode the payload when the envelope carries an `E` that decodes
    pub fn get_if_event<E: Event>(&self) -> Option<E> {
        if !self.is_event::<E>() {
            return None;
        }
        self.unwrap_event().ok()
    }
}
