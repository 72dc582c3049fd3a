//! # Window identity and router configuration.
//!
//! Each OS-level window runs its own registry and router; the only thing a
//! router needs to know about its host is **which** window it is and whether
//! that window is the main one. Both are fixed for the window's lifetime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an OS-level window participating in action routing.
///
/// Assigned by the host environment (window manager, desktop runtime) and
/// carried in every [`Envelope`](crate::Envelope) as the origin, so receivers
/// can discard their own echoes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-window configuration for a [`Router`](crate::Router).
///
/// ## Field semantics
/// - `window`: this window's identity, stamped on every outbound envelope
/// - `is_main`: whether this window hosts the main-window action handlers;
///   exactly one live window should claim it
///
/// ## Example
/// ```
/// use actionbus::{RouterConfig, WindowId};
///
/// let main = RouterConfig::main(WindowId(1));
/// assert!(main.is_main);
///
/// let child = RouterConfig::secondary(WindowId(2));
/// assert!(!child.is_main);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouterConfig {
    /// This window's identity.
    pub window: WindowId,
    /// Whether this window is the main window.
    pub is_main: bool,
}

impl RouterConfig {
    /// Configuration for the main window.
    #[inline]
    pub fn main(window: WindowId) -> Self {
        Self {
            window,
            is_main: true,
        }
    }

    /// Configuration for a non-main window.
    #[inline]
    pub fn secondary(window: WindowId) -> Self {
        Self {
            window,
            is_main: false,
        }
    }
}
