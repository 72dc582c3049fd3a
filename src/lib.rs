//! # actionbus
//!
//! **actionbus** is a registry of named *actions* (typed event channels with
//! a declared propagation scope) for multi-window desktop applications. It
//! decouples UI components from business-logic stores: call sites fire a
//! named action, subscribers anywhere observe it, and the declared
//! [`Scope`] decides which OS-level windows that means.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   fire("ping-peer", payload)                         window A (origin)
//!        │
//!        ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Router (per window)                                             │
//! │  - Registry (name → Channel + Scope, built once at startup)      │
//! │  - phase 1: Channel.fire — synchronous local fan-out             │
//! │  - phase 2: Transport send/broadcast, per Scope                  │
//! └──────┬──────────────────────────────────────────────┬────────────┘
//!        ▼                                              ▼
//!   local subscribers                         Transport (host IPC)
//!   (insertion order,                                   │ async delivery
//!    panic-isolated)                                    ▼
//!                                    ┌──────────────────────────────────┐
//!                                    │  peer window's Router.receive()  │
//!                                    │  → direct Channel.fire           │
//!                                    │    (never forwarded again)       │
//!                                    └──────────────────────────────────┘
//! ```
//!
//! ### Scopes
//! | Scope | Who observes a fire |
//! |---|---|
//! | [`Scope::Window`] | only the firing window |
//! | [`Scope::MainWindow`] | only the main window, wherever the fire came from |
//! | [`Scope::Global`] | every live window, exactly once each |
//!
//! ## Features
//! | Area | Description | Key types / traits |
//! |---|---|---|
//! | **Channels** | Synchronous local pub/sub with RAII unlisten handles. | [`Channel`], [`Subscription`] |
//! | **Registry** | Name → channel + scope, built from a static table, collision-checked. | [`Registry`], [`Scope`] |
//! | **Routing** | Scope dispatch, loop-free receive path, callable action handles. | [`Router`], [`Action`], [`Envelope`] |
//! | **Transports** | Host messaging seam plus built-in single-process wiring. | [`Transport`], [`NullTransport`], [`LocalHub`] |
//! | **Errors** | Typed errors for registration and delivery. | [`RegistryError`], [`TransportError`] |
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use actionbus::{LocalHub, Registry, Router, RouterConfig, Scope, WindowId};
//! use serde_json::json;
//!
//! const ACTIONS: [(&str, Scope); 2] = [
//!     ("ping-peer", Scope::Global),
//!     ("queue-job", Scope::MainWindow),
//! ];
//!
//! // Two windows in one process, wired through a LocalHub.
//! let hub = LocalHub::new();
//! let (main_transport, mut main_inbox) = hub.attach_main(WindowId(1));
//! let (child_transport, child_inbox) = hub.attach(WindowId(2));
//!
//! let main = Router::new(
//!     Registry::from_table(ACTIONS)?,
//!     Arc::new(main_transport),
//!     RouterConfig::main(WindowId(1)),
//! );
//! let child = Router::new(
//!     Registry::from_table(ACTIONS)?,
//!     Arc::new(child_transport),
//!     RouterConfig::secondary(WindowId(2)),
//! );
//!
//! let queued = Arc::new(AtomicUsize::new(0));
//! let seen = Arc::clone(&queued);
//! let _sub = main.subscribe("queue-job", move |payload| {
//!     assert_eq!(payload["id"], "x");
//!     seen.fetch_add(1, Ordering::Relaxed);
//! })?;
//!
//! // Fired from the child window, a MainWindow-scoped action runs nothing
//! // locally; the envelope is queued for the main window.
//! child.fire("queue-job", json!({ "id": "x" }))?;
//!
//! // In production each window drains its inbox on its own event loop
//! // (see `Router::spawn_listener`); here we pump by hand.
//! while let Ok(envelope) = main_inbox.try_recv() {
//!     main.receive(envelope);
//! }
//! assert_eq!(queued.load(Ordering::Relaxed), 1);
//! # drop(child_inbox);
//! # Ok::<(), actionbus::RegistryError>(())
//! ```

mod channels;
mod error;
mod registry;
mod routing;
mod transports;

// ---- Public re-exports ----

pub use channels::{Channel, Payload, Subscription};
pub use error::{RegistryError, TransportError};
pub use registry::{Registry, Scope};
pub use routing::{Action, Envelope, Router, RouterConfig, WindowId};
pub use transports::{LocalHub, LocalTransport, NullTransport, Transport, DEFAULT_QUEUE_CAPACITY};
