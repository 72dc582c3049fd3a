//! Action declarations: names, scopes, and the process-wide registry.
//!
//! ## Contents
//! - [`Scope`] — propagation policy fixed at declaration time
//! - [`Registry`] — name → ([`Channel`](crate::Channel), [`Scope`]) mapping,
//!   built once from a static table, extensible afterwards
//!
//! The registry holds no routing logic; the [`Router`](crate::Router)
//! consults it on every fire and on every received envelope.

#[allow(clippy::module_inception)]
mod registry;
mod scope;

pub use registry::Registry;
pub use scope::Scope;
