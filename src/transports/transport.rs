//! # Transport trait - the host-provided messaging seam.
//!
//! The router depends on exactly two outbound verbs; any inter-window
//! messaging substrate that can satisfy them (Electron-style IPC, a
//! compositor bus, an in-process hub) plugs in here. Inbound delivery is the
//! host's side of the contract: it hands received envelopes to
//! [`Router::receive`](crate::Router::receive), either directly from its own
//! event loop or through
//! [`Router::spawn_listener`](crate::Router::spawn_listener).
//!
//! ## Rules
//! - Both verbs must be **non-blocking**: enqueue the envelope and return.
//!   The router calls them from inside a synchronous `fire`.
//! - `broadcast_to_others` must not deliver back to `envelope.origin`.
//!   (Receivers discard their own echoes anyway, but an echoing transport
//!   wastes a round trip.)
//! - Delivery is best-effort: an error here is logged by the router and
//!   swallowed, never surfaced to the firer.

use crate::error::TransportError;
use crate::routing::Envelope;

/// Point-to-point and broadcast message passing between window processes.
pub trait Transport: Send + Sync + 'static {
    /// Queues the envelope for the main window.
    fn send_to_main(&self, envelope: Envelope) -> Result<(), TransportError>;

    /// Queues the envelope for every live window except `envelope.origin`.
    fn broadcast_to_others(&self, envelope: Envelope) -> Result<(), TransportError>;
}
