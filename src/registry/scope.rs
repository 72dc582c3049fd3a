//! # Propagation scope of an action.
//!
//! [`Scope`] is fixed at declaration time and never changes for the lifetime
//! of the process. It drives the router's dispatch table: which windows
//! observe a fired action, and whether the transport is involved at all.

use serde::{Deserialize, Serialize};

/// Policy governing which windows observe a fired action.
///
/// | Scope | Fire behavior |
/// |---|---|
/// | `Window` | local fan-out only; the transport is never involved |
/// | `MainWindow` | executes only in the main window; fires from elsewhere are forwarded there and do **not** run locally |
/// | `Global` | fires locally first, then is broadcast to every other window |
///
/// ## Example
/// ```
/// use actionbus::Scope;
///
/// assert!(!Scope::Window.is_cross_window());
/// assert!(Scope::Global.is_cross_window());
/// assert_eq!(Scope::MainWindow.as_label(), "main_window");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Observed only by the window that fired it.
    Window,
    /// Executed only in the main window, wherever it was fired.
    MainWindow,
    /// Observed by every live window exactly once.
    Global,
}

impl Scope {
    /// Returns `true` if firing under this scope can involve the transport.
    #[inline]
    pub fn is_cross_window(self) -> bool {
        matches!(self, Scope::MainWindow | Scope::Global)
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    #[inline]
    pub fn as_label(self) -> &'static str {
        match self {
            Scope::Window => "window",
            Scope::MainWindow => "main_window",
            Scope::Global => "global",
        }
    }
}
