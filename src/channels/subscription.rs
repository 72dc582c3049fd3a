//! # Subscription handle with idempotent release.
//!
//! [`Subscription`] represents one listener's registration on a
//! [`Channel`](crate::Channel). It is exclusively owned by the caller that
//! created it and is the capability to remove that listener again.
//!
//! ## Rules
//! - **Release on drop**: dropping the handle unsubscribes the listener, so
//!   a component that goes away takes its listeners with it.
//! - **Explicit release**: [`Subscription::unsubscribe`] consumes the handle;
//!   releasing twice is unrepresentable, and the underlying removal is a
//!   no-op if the listener is already gone.
//! - **Detach**: [`Subscription::detach`] gives up the capability and leaves
//!   the listener registered for the channel's lifetime.
//! - Releasing is safe during an active fire: the in-flight fan-out iterates
//!   over a snapshot and is not mutated mid-iteration.

use std::sync::Weak;

use crate::channels::channel::ChannelShared;

/// Handle to one listener registration on a [`Channel`](crate::Channel).
///
/// ## Example
/// ```
/// use actionbus::{Registry, Scope};
/// use serde_json::json;
///
/// let registry = Registry::new();
/// let channel = registry.register("task-queued", Scope::Window)?;
///
/// let sub = channel.subscribe(|_| {});
/// assert!(sub.is_active());
/// sub.unsubscribe();
/// assert_eq!(channel.subscriber_count(), 0);
/// # Ok::<(), actionbus::RegistryError>(())
/// ```
#[must_use = "dropping a Subscription unsubscribes immediately; hold it or call detach()"]
pub struct Subscription {
    id: u64,
    channel: Weak<ChannelShared>,
    detached: bool,
}

impl Subscription {
    pub(crate) fn new(id: u64, channel: Weak<ChannelShared>) -> Self {
        Self {
            id,
            channel,
            detached: false,
        }
    }

    /// Removes the listener from its channel and consumes the handle.
    ///
    /// Equivalent to dropping the handle; the method exists to make the
    /// intent explicit at call sites.
    pub fn unsubscribe(mut self) {
        self.release();
        self.detached = true;
    }

    /// Gives up the handle and keeps the listener registered for the
    /// channel's lifetime.
    pub fn detach(mut self) {
        self.detached = true;
    }

    /// Returns `true` while the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.channel
            .upgrade()
            .is_some_and(|shared| shared.contains(self.id))
    }

    fn release(&mut self) {
        if let Some(shared) = self.channel.upgrade() {
            shared.remove(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.detached {
            self.release();
        }
    }
}
