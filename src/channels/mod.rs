//! Local pub/sub primitives: channels and subscription handles.
//!
//! This module groups the **in-process** half of the action system: the
//! synchronous fan-out stream backing each action and the handle that
//! removes a listener again.
//!
//! ## Contents
//! - [`Channel`] — one named event stream, insertion-order synchronous fan-out
//! - [`Subscription`] — RAII unlisten capability with idempotent release
//! - [`Payload`] — the opaque value carried by a fired action
//!
//! Cross-window behavior lives in the [`Router`](crate::Router); a `Channel`
//! itself knows nothing about scopes or transports.

pub(crate) mod channel;
mod subscription;

pub use channel::{Channel, Payload};
pub use subscription::Subscription;
