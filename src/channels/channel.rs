//! # Synchronous pub/sub channel backing one action.
//!
//! [`Channel`] is the in-process fan-out primitive: one named event stream
//! with an insertion-ordered subscriber list. Firing invokes every subscriber
//! synchronously on the calling thread, in registration order.
//!
//! ## Architecture
//! ```text
//! fire(payload)
//!     │  snapshot subscriber list (lock released before any callback runs)
//!     ├──► subscriber 1 ──► panic → caught, logged, fan-out continues
//!     ├──► subscriber 2
//!     └──► subscriber N
//! ```
//!
//! ## Rules
//! - **Insertion order**: subscribers are notified in the order they subscribed.
//! - **Snapshot dispatch**: the list is snapshotted at fire time, so a
//!   subscriber that unsubscribes (itself or a peer) mid-fire never corrupts
//!   the in-progress fan-out; the removal takes effect from the next fire.
//! - **Panic isolation**: a panicking subscriber is caught and reported; it
//!   never aborts the remaining subscribers and never reaches the firer.
//! - **No I/O**: `fire` is a pure in-process fan-out and never blocks.
//!
//! ## Example
//! ```
//! use actionbus::{Registry, Scope};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! let channel = registry.register("draft-saved", Scope::Window)?;
//!
//! let sub = channel.subscribe(|payload| {
//!     assert_eq!(payload["id"], "d1");
//! });
//! channel.fire(&json!({ "id": "d1" }));
//! sub.unsubscribe();
//! # Ok::<(), actionbus::RegistryError>(())
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use crate::channels::Subscription;

/// The value carried by a fired action.
///
/// Payloads are opaque, structurally-cloneable data: cloned for local fan-out
/// and serialized as-is when an action crosses a window boundary.
pub type Payload = serde_json::Value;

type Callback = dyn Fn(&Payload) + Send + Sync;

/// One registered subscriber.
struct Entry {
    id: u64,
    callback: Arc<Callback>,
}

impl Clone for Entry {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
        }
    }
}

/// State shared between a [`Channel`] and its [`Subscription`] handles.
pub(crate) struct ChannelShared {
    name: Arc<str>,
    next_id: AtomicU64,
    subscribers: Mutex<Vec<Entry>>,
}

impl ChannelShared {
    /// Removes the subscriber with the given id; no-op if already removed.
    pub(crate) fn remove(&self, id: u64) {
        let mut subs = self.subscribers.lock().expect("subscriber list lock poisoned");
        subs.retain(|entry| entry.id != id);
    }

    pub(crate) fn contains(&self, id: u64) -> bool {
        let subs = self.subscribers.lock().expect("subscriber list lock poisoned");
        subs.iter().any(|entry| entry.id == id)
    }
}

/// A single named, typed event stream with synchronous local fan-out.
///
/// Channels are created by the [`Registry`](crate::Registry), one per action
/// name, and live for the process lifetime. The handle is cheap to clone;
/// all clones share the same subscriber list.
#[derive(Clone)]
pub struct Channel {
    shared: Arc<ChannelShared>,
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.shared.name)
            .finish()
    }
}

impl Channel {
    /// Creates a new channel bound to the given action name.
    pub(crate) fn new(name: Arc<str>) -> Self {
        Self {
            shared: Arc::new(ChannelShared {
                name,
                next_id: AtomicU64::new(0),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Returns the action name this channel is bound to.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Registers a subscriber and returns its [`Subscription`] handle.
    ///
    /// The callback receives exactly the payload passed to [`Channel::fire`].
    /// Never fails. Dropping the returned handle unsubscribes; call
    /// [`Subscription::detach`] to keep the listener for the channel's
    /// lifetime.
    pub fn subscribe(&self, callback: impl Fn(&Payload) + Send + Sync + 'static) -> Subscription {
        let id = self.shared.next_id.fetch_add(1, AtomicOrdering::Relaxed);
        {
            let mut subs = self
                .shared
                .subscribers
                .lock()
                .expect("subscriber list lock poisoned");
            subs.push(Entry {
                id,
                callback: Arc::new(callback),
            });
        }
        Subscription::new(id, Arc::downgrade(&self.shared))
    }

    /// Invokes every currently-registered subscriber synchronously, in
    /// insertion order, on the calling thread.
    ///
    /// Dispatch iterates over a snapshot of the subscriber list taken at fire
    /// time; subscribing or unsubscribing from within a callback affects the
    /// next fire, not this one. A panicking subscriber is caught, reported
    /// with the action name and subscriber id, and does not prevent the
    /// remaining subscribers from being notified.
    pub fn fire(&self, payload: &Payload) {
        let snapshot: Vec<Entry> = {
            let subs = self
                .shared
                .subscribers
                .lock()
                .expect("subscriber list lock poisoned");
            subs.clone()
        };

        for entry in &snapshot {
            let call = AssertUnwindSafe(|| (entry.callback)(payload));
            if let Err(cause) = panic::catch_unwind(call) {
                let info = {
                    let any = &*cause;
                    if let Some(msg) = any.downcast_ref::<&'static str>() {
                        (*msg).to_string()
                    } else if let Some(msg) = any.downcast_ref::<String>() {
                        msg.clone()
                    } else {
                        "unknown panic".to_string()
                    }
                };
                tracing::error!(
                    action = %self.shared.name,
                    subscriber = entry.id,
                    panic = %info,
                    "subscriber panicked during fire"
                );
            }
        }
    }

    /// Returns the number of currently-registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        let subs = self
            .shared
            .subscribers
            .lock()
            .expect("subscriber list lock poisoned");
        subs.len()
    }
}
