//! Cross-window routing: scope dispatch, envelopes, window identity.
//!
//! ## Contents
//! - [`Router`] — two-phase dispatch (local fan-out + transport forwarding)
//!   and the receive path that replays forwarded fires
//! - [`Action`] — callable per-name handle, resolved once
//! - [`Envelope`] — the serialized shape that crosses the IPC boundary
//! - [`WindowId`], [`RouterConfig`] — window identity for one router
//!
//! ## Quick reference
//! - **Outbound**: `Router::fire` → registry lookup → `Channel::fire` and/or
//!   `Transport::send_to_main` / `Transport::broadcast_to_others`.
//! - **Inbound**: host glue (or `Router::spawn_listener`) → `Router::receive`
//!   → direct `Channel::fire`, never forwarded again.

mod envelope;
mod router;
mod window;

pub use envelope::Envelope;
pub use router::{Action, Router};
pub use window::{RouterConfig, WindowId};
