// Update sequencer - decides whether an inbound snapshot supersedes state
use crate::application::transport::StreamEvent;
use crate::domain::telemetry::{AcceptedSnapshot, SnapshotPayload};
use serde_json::Value;
use thiserror::Error;

/// Why an event was dropped. Both variants are recovered locally by the
/// caller; neither is ever fatal.
#[derive(Debug, Error, PartialEq)]
pub enum Rejection {
    #[error("stale update {id}, last accepted {last_accepted}")]
    Stale { id: i64, last_accepted: i64 },
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Gatekeeper for inbound snapshots. Transport guarantees neither ordering
/// nor delivery, so acceptance is keyed on a monotonically increasing
/// event id: anything at or below the last accepted id is stale.
#[derive(Debug, Default)]
pub struct UpdateSequencer {
    last_accepted_id: i64,
}

impl UpdateSequencer {
    pub fn new() -> Self {
        Self { last_accepted_id: 0 }
    }

    pub fn last_accepted_id(&self) -> i64 {
        self.last_accepted_id
    }

    /// Validate and order one inbound event. Id freshness gates the deeper
    /// shape inspection: a stale event is reported stale even when its
    /// payload is also malformed. The only side effect of success is
    /// advancing `last_accepted_id`.
    pub fn accept(&mut self, event: &StreamEvent) -> Result<AcceptedSnapshot, Rejection> {
        let id: i64 = event
            .id
            .trim()
            .parse()
            .map_err(|_| Rejection::Malformed(format!("event id '{}' is not an integer", event.id)))?;

        if id <= self.last_accepted_id {
            return Err(Rejection::Stale {
                id,
                last_accepted: self.last_accepted_id,
            });
        }

        let value: Value = serde_json::from_str(&event.data)
            .map_err(|e| Rejection::Malformed(format!("payload is not JSON: {}", e)))?;

        check_shape(&value)?;

        let payload: SnapshotPayload = serde_json::from_value(value)
            .map_err(|e| Rejection::Malformed(e.to_string()))?;

        self.last_accepted_id = id;
        Ok(AcceptedSnapshot::new(id, payload))
    }
}

/// Structural (not deep) validation of the snapshot shape. A single
/// missing field rejects the whole snapshot; there is no partial apply.
fn check_shape(value: &Value) -> Result<(), Rejection> {
    let object = value
        .as_object()
        .ok_or_else(|| Rejection::Malformed("payload is not an object".to_string()))?;

    if !object.contains_key("temperature") {
        return Err(Rejection::Malformed("missing field 'temperature'".to_string()));
    }

    let kegs = object
        .get("kegs")
        .and_then(Value::as_array)
        .ok_or_else(|| Rejection::Malformed("missing field 'kegs'".to_string()))?;

    for (i, keg) in kegs.iter().enumerate() {
        let keg = keg
            .as_object()
            .ok_or_else(|| Rejection::Malformed(format!("kegs[{}] is not an object", i)))?;

        for field in ["beer", "consumption", "remaining"] {
            if !keg.contains_key(field) {
                return Err(Rejection::Malformed(format!(
                    "kegs[{}] missing field '{}'",
                    i, field
                )));
            }
        }
    }

    Ok(())
}
