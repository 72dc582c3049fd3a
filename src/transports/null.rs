//! # NullTransport - single-window mode.
//!
//! Discards every outbound envelope. With no peer windows there is nobody to
//! forward to: `Global` actions behave exactly like `Window` ones (the local
//! fan-out already ran before the transport is consulted), and `MainWindow`
//! actions fired from the main window never reach the transport at all.

use crate::error::TransportError;
use crate::routing::Envelope;
use crate::transports::Transport;

/// Transport for a process with no peer windows.
///
/// ## Example
/// ```
/// use std::sync::Arc;
/// use actionbus::{NullTransport, Registry, Router, RouterConfig, Scope, WindowId};
/// use serde_json::json;
///
/// let registry = Registry::from_table([("ping-peer", Scope::Global)])?;
/// let router = Router::new(
///     registry,
///     Arc::new(NullTransport),
///     RouterConfig::main(WindowId(1)),
/// );
///
/// // Indistinguishable from a purely local action.
/// let _sub = router.subscribe("ping-peer", |_| {})?;
/// router.fire("ping-peer", json!({ "count": 1 }))?;
/// # Ok::<(), actionbus::RegistryError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn send_to_main(&self, _envelope: Envelope) -> Result<(), TransportError> {
        Ok(())
    }

    fn broadcast_to_others(&self, _envelope: Envelope) -> Result<(), TransportError> {
        Ok(())
    }
}
