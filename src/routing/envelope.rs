//! # Wire representation of a cross-window fire.
//!
//! An [`Envelope`] is what actually crosses the IPC boundary: the action
//! name, the payload as fired, and the origin window. The origin is the
//! loop-breaking invariant: a window never re-forwards an envelope it just
//! received, and discards envelopes stamped with its own id.

use serde::{Deserialize, Serialize};

use crate::channels::Payload;
use crate::routing::WindowId;

/// A forwarded action crossing the window boundary.
///
/// ## Example
/// ```
/// use actionbus::{Envelope, WindowId};
/// use serde_json::json;
///
/// let envelope = Envelope::new("ping-peer", json!({ "count": 1 }), WindowId(2));
/// let wire = serde_json::to_string(&envelope).unwrap();
/// let back: Envelope = serde_json::from_str(&wire).unwrap();
/// assert_eq!(back.name, "ping-peer");
/// assert_eq!(back.origin, WindowId(2));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// The fired action's name.
    pub name: String,
    /// The payload exactly as passed to `fire`.
    pub payload: Payload,
    /// The window the fire originated in.
    pub origin: WindowId,
}

impl Envelope {
    /// Creates an envelope for a fire originating in `origin`.
    pub fn new(name: impl Into<String>, payload: Payload, origin: WindowId) -> Self {
        Self {
            name: name.into(),
            payload,
            origin,
        }
    }
}
