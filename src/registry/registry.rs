//! # Action registry - process-wide mapping from name to channel and scope.
//!
//! The [`Registry`] owns every action declared in a window: one
//! [`Channel`] per name plus the declared [`Scope`]. It is built once at
//! startup from a static declaration table and read-mostly afterwards;
//! late registrations are permitted and still enforce uniqueness.
//!
//! ## Rules
//! - Names are globally unique; a collision fails fast with
//!   [`RegistryError::DuplicateAction`] and leaves the first registration
//!   intact.
//! - Channels are never removed: an action lives for the process lifetime.
//! - [`Registry::list_by_scope`] is a diagnostics surface, not dispatch
//!   state; the three scope lists are disjoint and keep registration order.
//!
//! ## Example
//! ```
//! use actionbus::{Registry, Scope};
//!
//! let registry = Registry::from_table([
//!     ("ping-peer", Scope::Global),
//!     ("queue-job", Scope::MainWindow),
//!     ("draft-saved", Scope::Window),
//! ])?;
//!
//! let (_channel, scope) = registry.resolve("queue-job")?;
//! assert_eq!(scope, Scope::MainWindow);
//! assert_eq!(registry.list_by_scope(Scope::Global).len(), 1);
//! # Ok::<(), actionbus::RegistryError>(())
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::channels::Channel;
use crate::error::RegistryError;
use crate::registry::Scope;

/// One declared action.
struct ActionEntry {
    channel: Channel,
    scope: Scope,
}

#[derive(Default)]
struct RegistryInner {
    actions: HashMap<Arc<str>, ActionEntry>,
    /// Names in registration order, for the diagnostics lists.
    order: Vec<Arc<str>>,
}

/// Process-wide mapping from action name to [`Channel`] and [`Scope`].
///
/// Constructed once per window process and shared (`Arc`) with every
/// consumer; independent registries can coexist, which is how the test
/// suite simulates multiple windows in one process.
pub struct Registry {
    inner: RwLock<RegistryInner>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().expect("registry lock poisoned");
        f.debug_struct("Registry")
            .field("actions", &inner.order)
            .finish()
    }
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(RegistryInner::default()),
        })
    }

    /// Builds a registry from a static declaration table, processed once.
    ///
    /// A duplicate name anywhere in the table is a startup-time fatal error.
    pub fn from_table<'a>(
        table: impl IntoIterator<Item = (&'a str, Scope)>,
    ) -> Result<Arc<Self>, RegistryError> {
        let registry = Self::new();
        for (name, scope) in table {
            registry.register(name, scope)?;
        }
        Ok(registry)
    }

    /// Registers a new action and returns its channel.
    ///
    /// Fails with [`RegistryError::DuplicateAction`] if the name is taken;
    /// the existing registration is untouched.
    pub fn register(&self, name: &str, scope: Scope) -> Result<Channel, RegistryError> {
        let mut inner = self.inner.write().expect("registry lock poisoned");
        if inner.actions.contains_key(name) {
            return Err(RegistryError::DuplicateAction {
                name: name.to_string(),
            });
        }

        let key: Arc<str> = Arc::from(name);
        let channel = Channel::new(Arc::clone(&key));
        inner.actions.insert(
            Arc::clone(&key),
            ActionEntry {
                channel: channel.clone(),
                scope,
            },
        );
        inner.order.push(key);
        Ok(channel)
    }

    /// Looks up an action's channel and scope.
    ///
    /// Fails with [`RegistryError::UnknownAction`] if the name was never
    /// registered in this window.
    pub fn resolve(&self, name: &str) -> Result<(Channel, Scope), RegistryError> {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner
            .actions
            .get(name)
            .map(|entry| (entry.channel.clone(), entry.scope))
            .ok_or_else(|| RegistryError::UnknownAction {
                name: name.to_string(),
            })
    }

    /// Looks up an action's channel only.
    pub fn channel(&self, name: &str) -> Result<Channel, RegistryError> {
        self.resolve(name).map(|(channel, _scope)| channel)
    }

    /// Returns `true` if the name is registered.
    pub fn contains(&self, name: &str) -> bool {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner.actions.contains_key(name)
    }

    /// Returns the number of registered actions.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner.actions.len()
    }

    /// Returns `true` if no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every registered name, in registration order.
    pub fn names(&self) -> Vec<Arc<str>> {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner.order.clone()
    }

    /// Returns the names declared with the given scope, in registration order.
    ///
    /// Diagnostics surface only; dispatch never consults these lists.
    pub fn list_by_scope(&self, scope: Scope) -> Vec<Arc<str>> {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner
            .order
            .iter()
            .filter(|name| {
                inner
                    .actions
                    .get(name.as_ref())
                    .is_some_and(|entry| entry.scope == scope)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [(&str, Scope); 4] = [
        ("ping-peer", Scope::Global),
        ("queue-job", Scope::MainWindow),
        ("draft-saved", Scope::Window),
        ("draft-closed", Scope::Window),
    ];

    #[test]
    fn test_resolve_returns_declared_scope() {
        let registry = Registry::from_table(TABLE).unwrap();
        for (name, scope) in TABLE {
            let (channel, resolved) = registry.resolve(name).unwrap();
            assert_eq!(resolved, scope, "scope mismatch for {name}");
            assert_eq!(channel.name(), name);
        }
    }

    #[test]
    fn test_duplicate_registration_fails_and_first_wins() {
        let registry = Registry::new();
        let first = registry.register("ping-peer", Scope::Global).unwrap();
        let _keep = first.subscribe(|_| {});

        let err = registry.register("ping-peer", Scope::Window).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateAction { ref name } if name == "ping-peer"));

        let (channel, scope) = registry.resolve("ping-peer").unwrap();
        assert_eq!(scope, Scope::Global, "first registration must stay intact");
        assert_eq!(channel.subscriber_count(), 1);
    }

    #[test]
    fn test_duplicate_in_table_fails_startup() {
        let err = Registry::from_table([("a", Scope::Window), ("a", Scope::Global)]).unwrap_err();
        assert_eq!(err.as_label(), "duplicate_action");
    }

    #[test]
    fn test_unknown_action_errors() {
        let registry = Registry::new();
        let err = registry.resolve("nope").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownAction { ref name } if name == "nope"));
    }

    #[test]
    fn test_scope_lists_are_disjoint_and_ordered() {
        let registry = Registry::from_table(TABLE).unwrap();

        assert_eq!(
            registry.list_by_scope(Scope::Global),
            vec![Arc::<str>::from("ping-peer")]
        );
        assert_eq!(
            registry.list_by_scope(Scope::MainWindow),
            vec![Arc::<str>::from("queue-job")]
        );
        assert_eq!(
            registry.list_by_scope(Scope::Window),
            vec![Arc::<str>::from("draft-saved"), Arc::<str>::from("draft-closed")],
            "window list must keep registration order"
        );

        let total: usize = [Scope::Window, Scope::MainWindow, Scope::Global]
            .into_iter()
            .map(|scope| registry.list_by_scope(scope).len())
            .sum();
        assert_eq!(total, registry.len(), "every name in exactly one list");
    }

    #[test]
    fn test_late_registration_still_enforces_uniqueness() {
        let registry = Registry::from_table(TABLE).unwrap();
        registry.register("late-action", Scope::Window).unwrap();
        assert!(registry.contains("late-action"));
        assert!(registry.register("late-action", Scope::Window).is_err());
    }
}
