//! # Cross-window transports.
//!
//! The [`Transport`] trait is the seam between the router and the host's
//! inter-window messaging substrate, plus two built-in implementations:
//!
//! - [`NullTransport`] — single-window mode; discards every envelope.
//! - [`LocalHub`] / [`LocalTransport`] — in-process wiring of N windows over
//!   bounded queues; backs the multi-window test suite and fits
//!   single-process hosts that model windows as panes.
//!
//! Hosts with a real IPC boundary (one process per window) implement
//! [`Transport`] over their own substrate and feed received envelopes to
//! [`Router::receive`](crate::Router::receive).

mod local;
mod null;
mod transport;

pub use local::{LocalHub, LocalTransport, DEFAULT_QUEUE_CAPACITY};
pub use null::NullTransport;
pub use transport::Transport;
