//! Error types used by the action registry and the cross-window transport.
//!
//! This module defines two main error enums:
//!
//! - [`RegistryError`] — errors raised when registering or resolving actions.
//! - [`TransportError`] — errors raised by transport implementations when an
//!   envelope cannot be handed to a peer window.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics. Subscriber panics are deliberately **not** represented
//! here: they are caught per-subscriber during dispatch and reported as
//! diagnostics, never surfaced to the firer.

use thiserror::Error;

use crate::routing::WindowId;

/// # Errors produced by the action registry.
///
/// [`RegistryError::DuplicateAction`] is a configuration bug and should be
/// treated as fatal at startup. [`RegistryError::UnknownAction`] is fatal when
/// returned from a local fire (programmer error), but logged-and-dropped on
/// the receive path, where peer-window version skew must not crash the
/// receiver.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The action name is already registered; the first registration stays intact.
    #[error("action \"{name}\" is already registered")]
    DuplicateAction {
        /// The colliding action name.
        name: String,
    },

    /// The action name is not registered in this window's registry.
    #[error("action \"{name}\" is not registered")]
    UnknownAction {
        /// The unresolved action name.
        name: String,
    },
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use actionbus::RegistryError;
    ///
    /// let err = RegistryError::DuplicateAction { name: "send-draft".into() };
    /// assert_eq!(err.as_label(), "duplicate_action");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::DuplicateAction { .. } => "duplicate_action",
            RegistryError::UnknownAction { .. } => "unknown_action",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RegistryError::DuplicateAction { name } => {
                format!("duplicate registration for action \"{name}\"")
            }
            RegistryError::UnknownAction { name } => {
                format!("no action registered under \"{name}\"")
            }
        }
    }

    /// Returns the action name the error refers to.
    pub fn name(&self) -> &str {
        match self {
            RegistryError::DuplicateAction { name } | RegistryError::UnknownAction { name } => name,
        }
    }
}

/// # Errors produced by cross-window transports.
///
/// These represent delivery failures on the outbound path, such as a target
/// window that closed mid-flight. The router logs them and swallows them:
/// `fire` is fire-and-forget, and local effects of a fire are never rolled
/// back because a peer could not be reached.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransportError {
    /// No main window is attached, or its inbound queue is closed.
    #[error("main window link is closed")]
    MainClosed,

    /// A peer window's inbound queue is closed (window torn down mid-flight).
    #[error("link to window {window} is closed")]
    PeerClosed {
        /// The unreachable window.
        window: WindowId,
    },

    /// A window's bounded inbound queue is full; the envelope was dropped for
    /// that window only.
    #[error("inbound queue for window {window} is full")]
    QueueFull {
        /// The window whose queue overflowed.
        window: WindowId,
    },
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use actionbus::{TransportError, WindowId};
    ///
    /// let err = TransportError::PeerClosed { window: WindowId(3) };
    /// assert_eq!(err.as_label(), "transport_peer_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::MainClosed => "transport_main_closed",
            TransportError::PeerClosed { .. } => "transport_peer_closed",
            TransportError::QueueFull { .. } => "transport_queue_full",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TransportError::MainClosed => "main window link is closed".to_string(),
            TransportError::PeerClosed { window } => {
                format!("link to window {window} is closed")
            }
            TransportError::QueueFull { window } => {
                format!("inbound queue for window {window} is full; envelope dropped")
            }
        }
    }
}
