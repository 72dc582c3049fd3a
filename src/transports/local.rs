//! # LocalHub - in-process wiring of multiple windows.
//!
//! [`LocalHub`] connects any number of routers living in one process over
//! bounded queues: each attached window gets a [`LocalTransport`] (its
//! outbound seam) and an inbound [`mpsc::Receiver`] of envelopes to drain
//! into [`Router::receive`](crate::Router::receive) — directly or via
//! [`Router::spawn_listener`](crate::Router::spawn_listener).
//!
//! This is the transport behind the multi-window test suite, and a real
//! option for single-process hosts that model "windows" as panes or tabs.
//!
//! ## Architecture
//! ```text
//! window 1 ── LocalTransport ──┐
//! window 2 ── LocalTransport ──┼──► HubState { main, links } ──► per-window
//! window 3 ── LocalTransport ──┘        (shared, mutex)           bounded queue
//! ```
//!
//! ## Rules
//! - Queues are **bounded**; an overflowing window drops the envelope for
//!   that window only ([`TransportError::QueueFull`]). Actions are
//!   fire-and-forget, so buffering without limit behind a stalled window is
//!   worse than dropping.
//! - FIFO per sender-receiver pair, nothing more.
//! - A window whose receiver was dropped is pruned on the next send that
//!   hits it ([`TransportError::PeerClosed`] / [`TransportError::MainClosed`]).
//! - Re-attaching a window id replaces its queue.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::TransportError;
use crate::routing::{Envelope, WindowId};
use crate::transports::Transport;

/// Default per-window inbound queue capacity.
///
/// Enough for burst handling without memory bloat; a window that falls this
/// far behind starts dropping forwarded actions.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

struct HubState {
    main: Option<WindowId>,
    links: HashMap<WindowId, mpsc::Sender<Envelope>>,
}

/// In-process hub connecting the transports of attached windows.
///
/// Cheap to clone; all clones share the same link table.
///
/// ## Example
/// ```
/// use actionbus::{LocalHub, WindowId};
///
/// let hub = LocalHub::new();
/// let (main_transport, _main_inbox) = hub.attach_main(WindowId(1));
/// let (child_transport, _child_inbox) = hub.attach(WindowId(2));
/// ```
#[derive(Clone)]
pub struct LocalHub {
    state: Arc<Mutex<HubState>>,
    capacity: usize,
}

impl LocalHub {
    /// Creates a hub with [`DEFAULT_QUEUE_CAPACITY`] per window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Creates a hub with the given per-window queue capacity (min 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(HubState {
                main: None,
                links: HashMap::new(),
            })),
            capacity: capacity.max(1),
        }
    }

    /// Attaches a window and returns its transport plus its inbound queue.
    pub fn attach(&self, window: WindowId) -> (LocalTransport, mpsc::Receiver<Envelope>) {
        let (sender, receiver) = mpsc::channel(self.capacity);
        let mut state = self.state.lock().expect("hub state lock poisoned");
        state.links.insert(window, sender);
        (
            LocalTransport {
                state: Arc::clone(&self.state),
            },
            receiver,
        )
    }

    /// Attaches a window and marks it as the main window.
    pub fn attach_main(&self, window: WindowId) -> (LocalTransport, mpsc::Receiver<Envelope>) {
        let attached = self.attach(window);
        let mut state = self.state.lock().expect("hub state lock poisoned");
        state.main = Some(window);
        attached
    }

    /// Detaches a window (teardown); in-flight envelopes for it are dropped.
    pub fn detach(&self, window: WindowId) {
        let mut state = self.state.lock().expect("hub state lock poisoned");
        state.links.remove(&window);
        if state.main == Some(window) {
            state.main = None;
        }
    }
}

impl Default for LocalHub {
    fn default() -> Self {
        Self::new()
    }
}

/// One window's outbound seam into a [`LocalHub`].
pub struct LocalTransport {
    state: Arc<Mutex<HubState>>,
}

impl Transport for LocalTransport {
    fn send_to_main(&self, envelope: Envelope) -> Result<(), TransportError> {
        let mut state = self.state.lock().expect("hub state lock poisoned");
        let main = state.main.ok_or(TransportError::MainClosed)?;
        let sender = state.links.get(&main).ok_or(TransportError::MainClosed)?;
        match sender.try_send(envelope) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(TransportError::QueueFull { window: main }),
            Err(TrySendError::Closed(_)) => {
                state.links.remove(&main);
                Err(TransportError::MainClosed)
            }
        }
    }

    fn broadcast_to_others(&self, envelope: Envelope) -> Result<(), TransportError> {
        let mut state = self.state.lock().expect("hub state lock poisoned");
        let mut first_error = None;
        let mut dead = Vec::new();

        for (window, sender) in &state.links {
            if *window == envelope.origin {
                continue;
            }
            match sender.try_send(envelope.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    if first_error.is_none() {
                        first_error = Some(TransportError::QueueFull { window: *window });
                    }
                }
                Err(TrySendError::Closed(_)) => {
                    dead.push(*window);
                    if first_error.is_none() {
                        first_error = Some(TransportError::PeerClosed { window: *window });
                    }
                }
            }
        }

        for window in dead {
            state.links.remove(&window);
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
