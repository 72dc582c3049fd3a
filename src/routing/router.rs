//! # Router - scope-driven two-phase dispatch.
//!
//! The [`Router`] is the core of the action system. Every fire goes through
//! it: phase one is the synchronous local fan-out on the action's
//! [`Channel`], phase two hands an [`Envelope`] to the [`Transport`] when the
//! declared [`Scope`] crosses the window boundary. The two phases are
//! explicit and independently testable.
//!
//! ## Architecture
//! ```text
//! fire(name, payload)
//!     │ resolve (name → channel, scope)
//!     ├─ Window      ──► channel.fire()                      (local only)
//!     ├─ MainWindow  ──► main window:  channel.fire()
//!     │                  elsewhere:    transport.send_to_main(envelope)
//!     │                                (no local fan-out at the origin)
//!     └─ Global      ──► channel.fire(), then
//!                        transport.broadcast_to_others(envelope)
//!
//! receive(envelope)            (host delivers, async, on this window's turn)
//!     │ origin == self? ──► drop (transport echo)
//!     │ resolve name    ──► unknown? log + drop (peer version skew)
//!     └─ channel.fire()     direct, bypassing the dispatch table:
//!                           a receive NEVER re-enters the forwarding path
//! ```
//!
//! ## Rules
//! - `fire` never blocks: local fan-out is synchronous, transport sends are
//!   enqueue-and-return.
//! - Transport failures are logged and swallowed; local effects of a fire
//!   are never rolled back (no atomicity across windows).
//! - `UnknownAction` from a local `fire` is returned to the caller
//!   (programmer error); the same error on the receive path is logged and
//!   dropped, because peer-window version skew must not crash the receiver.
//! - `Global` fires locally first, so a single-window setup behaves exactly
//!   like a purely local action.
//! - `MainWindow` suppresses local fan-out at non-main origins: the handler
//!   logic lives only in the main window, and firing at the origin too would
//!   double-execute it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::channels::{Channel, Payload, Subscription};
use crate::error::RegistryError;
use crate::registry::{Registry, Scope};
use crate::routing::{Envelope, RouterConfig, WindowId};
use crate::transports::Transport;

struct RouterInner {
    registry: Arc<Registry>,
    transport: Arc<dyn Transport>,
    window: WindowId,
    is_main: bool,
}

/// Scope-driven dispatcher for one window.
///
/// Cheap to clone; all clones share the same registry and transport. One
/// router per window process.
///
/// ## Example
/// ```
/// use std::sync::Arc;
/// use actionbus::{NullTransport, Registry, Router, RouterConfig, Scope, WindowId};
/// use serde_json::json;
///
/// let registry = Registry::from_table([("draft-saved", Scope::Window)])?;
/// let router = Router::new(
///     registry,
///     Arc::new(NullTransport),
///     RouterConfig::main(WindowId(1)),
/// );
///
/// let _sub = router.subscribe("draft-saved", |payload| {
///     assert_eq!(payload["id"], "d1");
/// })?;
/// router.fire("draft-saved", json!({ "id": "d1" }))?;
/// # Ok::<(), actionbus::RegistryError>(())
/// ```
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

impl Router {
    /// Creates a router for the window described by `config`.
    pub fn new(
        registry: Arc<Registry>,
        transport: Arc<dyn Transport>,
        config: RouterConfig,
    ) -> Self {
        Self {
            inner: Arc::new(RouterInner {
                registry,
                transport,
                window: config.window,
                is_main: config.is_main,
            }),
        }
    }

    /// Returns the registry this router dispatches against.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.inner.registry
    }

    /// Returns this window's identity.
    pub fn window(&self) -> WindowId {
        self.inner.window
    }

    /// Returns `true` if this router runs in the main window.
    pub fn is_main(&self) -> bool {
        self.inner.is_main
    }

    /// Fires the named action per its declared scope.
    ///
    /// Local subscribers (where the scope says they run) are notified
    /// synchronously before this returns. Cross-window delivery is
    /// fire-and-forget: transport failures are logged, never returned.
    ///
    /// Fails with [`RegistryError::UnknownAction`] if the name was never
    /// registered (a programmer error at the call site).
    pub fn fire(&self, name: &str, payload: Payload) -> Result<(), RegistryError> {
        let (channel, scope) = self.inner.registry.resolve(name)?;
        self.dispatch(&channel, scope, payload);
        Ok(())
    }

    /// Subscribes to the named action's local channel.
    pub fn subscribe(
        &self,
        name: &str,
        callback: impl Fn(&Payload) + Send + Sync + 'static,
    ) -> Result<Subscription, RegistryError> {
        Ok(self.inner.registry.channel(name)?.subscribe(callback))
    }

    /// Returns a callable [`Action`] handle, resolved once.
    pub fn action(&self, name: &str) -> Result<Action, RegistryError> {
        let (channel, scope) = self.inner.registry.resolve(name)?;
        Ok(Action {
            router: self.clone(),
            channel,
            scope,
        })
    }

    /// Replays a forwarded envelope as a local fire.
    ///
    /// Called by the host's transport glue (or [`Router::spawn_listener`])
    /// on this window's own control flow. The re-fire goes straight to the
    /// channel, bypassing the scope dispatch table: a received action is
    /// never forwarded again.
    ///
    /// Envelopes stamped with this window's own id are discarded: the
    /// transport contract excludes the origin from broadcasts, but an
    /// echoing substrate must not cause double delivery.
    pub fn receive(&self, envelope: Envelope) {
        if envelope.origin == self.inner.window {
            return;
        }
        match self.inner.registry.resolve(&envelope.name) {
            Ok((channel, _scope)) => channel.fire(&envelope.payload),
            Err(error) => {
                tracing::warn!(
                    action = %envelope.name,
                    origin = %envelope.origin,
                    error = %error,
                    "dropping forwarded action unknown to this window"
                );
            }
        }
    }

    /// Spawns a task that drains inbound envelopes into [`Router::receive`].
    ///
    /// Runs until `shutdown` fires or the sending side closes. Hosts whose
    /// transport delivers messages through its own event loop can skip this
    /// and call [`Router::receive`] directly.
    pub fn spawn_listener(
        &self,
        mut receiver: mpsc::Receiver<Envelope>,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let me = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    message = receiver.recv() => match message {
                        Some(envelope) => me.receive(envelope),
                        None => break,
                    }
                }
            }
        })
    }

    /// Phase dispatch for an already-resolved action.
    fn dispatch(&self, channel: &Channel, scope: Scope, payload: Payload) {
        match scope {
            Scope::Window => channel.fire(&payload),
            Scope::MainWindow => {
                if self.inner.is_main {
                    channel.fire(&payload);
                } else {
                    let envelope = Envelope::new(channel.name(), payload, self.inner.window);
                    if let Err(error) = self.inner.transport.send_to_main(envelope) {
                        tracing::warn!(
                            action = %channel.name(),
                            error = %error,
                            "send to main window failed; action dropped"
                        );
                    }
                }
            }
            Scope::Global => {
                channel.fire(&payload);
                let envelope = Envelope::new(channel.name(), payload, self.inner.window);
                if let Err(error) = self.inner.transport.broadcast_to_others(envelope) {
                    tracing::warn!(
                        action = %channel.name(),
                        error = %error,
                        "broadcast to peer windows failed"
                    );
                }
            }
        }
    }
}

/// Callable handle to one named action.
///
/// The Rust rendition of `actions.<name>(payload)`: resolved once, then
/// [`Action::fire`] goes through the same scope dispatch as
/// [`Router::fire`], and [`Action::subscribe`] targets the local channel.
#[derive(Clone)]
pub struct Action {
    router: Router,
    channel: Channel,
    scope: Scope,
}

impl Action {
    /// Returns the action's name.
    pub fn name(&self) -> &str {
        self.channel.name()
    }

    /// Returns the action's declared scope.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Fires this action per its declared scope.
    pub fn fire(&self, payload: Payload) {
        self.router.dispatch(&self.channel, self.scope, payload);
    }

    /// Subscribes to this action's local channel.
    pub fn subscribe(&self, callback: impl Fn(&Payload) + Send + Sync + 'static) -> Subscription {
        self.channel.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::transports::LocalHub;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Mutex;

    const TABLE: [(&str, Scope); 3] = [
        ("ping-peer", Scope::Global),
        ("queue-job", Scope::MainWindow),
        ("draft-saved", Scope::Window),
    ];

    /// Transport double that records every outbound call and never fails.
    #[derive(Default)]
    struct RecordingTransport {
        to_main: Mutex<Vec<Envelope>>,
        broadcasts: Mutex<Vec<Envelope>>,
    }

    impl RecordingTransport {
        fn send_count(&self) -> usize {
            self.to_main.lock().unwrap().len() + self.broadcasts.lock().unwrap().len()
        }
    }

    impl Transport for RecordingTransport {
        fn send_to_main(&self, envelope: Envelope) -> Result<(), TransportError> {
            self.to_main.lock().unwrap().push(envelope);
            Ok(())
        }

        fn broadcast_to_others(&self, envelope: Envelope) -> Result<(), TransportError> {
            self.broadcasts.lock().unwrap().push(envelope);
            Ok(())
        }
    }

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&Payload) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let hook = Arc::clone(&count);
        (count, move |_: &Payload| {
            hook.fetch_add(1, AtomicOrdering::Relaxed);
        })
    }

    fn router_with_recorder(config: RouterConfig) -> (Router, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let router = Router::new(
            Registry::from_table(TABLE).unwrap(),
            Arc::clone(&transport) as Arc<dyn Transport>,
            config,
        );
        (router, transport)
    }

    /// Drains every queued envelope into the given router.
    fn pump(receiver: &mut mpsc::Receiver<Envelope>, router: &Router) -> usize {
        let mut drained = 0;
        while let Ok(envelope) = receiver.try_recv() {
            router.receive(envelope);
            drained += 1;
        }
        drained
    }

    /// Three windows (1 = main, 2, 3) wired through a LocalHub, each with its
    /// own registry built from the same table.
    fn three_windows() -> (
        Vec<Router>,
        Vec<mpsc::Receiver<Envelope>>,
    ) {
        let hub = LocalHub::new();
        let mut routers = Vec::new();
        let mut inboxes = Vec::new();
        for id in 1..=3u64 {
            let window = WindowId(id);
            let (transport, inbox) = if id == 1 {
                hub.attach_main(window)
            } else {
                hub.attach(window)
            };
            let config = if id == 1 {
                RouterConfig::main(window)
            } else {
                RouterConfig::secondary(window)
            };
            routers.push(Router::new(
                Registry::from_table(TABLE).unwrap(),
                Arc::new(transport),
                config,
            ));
            inboxes.push(inbox);
        }
        (routers, inboxes)
    }

    #[test]
    fn test_window_scope_never_touches_transport_or_peers() {
        let (routers, mut inboxes) = three_windows();
        let (count_a, hook_a) = counter();
        let (count_b, hook_b) = counter();
        let _sub_a = routers[0].subscribe("draft-saved", hook_a).unwrap();
        let _sub_b = routers[1].subscribe("draft-saved", hook_b).unwrap();

        routers[0].fire("draft-saved", json!({ "id": "d1" })).unwrap();

        for (inbox, router) in inboxes.iter_mut().zip(&routers) {
            assert_eq!(pump(inbox, router), 0, "no envelope may be in flight");
        }
        assert_eq!(count_a.load(AtomicOrdering::Relaxed), 1);
        assert_eq!(count_b.load(AtomicOrdering::Relaxed), 0);
    }

    #[test]
    fn test_main_window_scope_fired_from_secondary_runs_only_in_main() {
        let (routers, mut inboxes) = three_windows();
        let (count_main, hook_main) = counter();
        let (count_origin, hook_origin) = counter();
        let _sub_main = routers[0].subscribe("queue-job", hook_main).unwrap();
        let _sub_origin = routers[1].subscribe("queue-job", hook_origin).unwrap();

        routers[1].fire("queue-job", json!({ "id": "x" })).unwrap();
        assert_eq!(
            count_origin.load(AtomicOrdering::Relaxed),
            0,
            "origin window must not run main-window handlers"
        );

        pump(&mut inboxes[0], &routers[0]);
        assert_eq!(count_main.load(AtomicOrdering::Relaxed), 1);
    }

    #[test]
    fn test_main_window_scope_fired_from_main_stays_local() {
        let (router, transport) = router_with_recorder(RouterConfig::main(WindowId(1)));
        let (count, hook) = counter();
        let _sub = router.subscribe("queue-job", hook).unwrap();

        router.fire("queue-job", json!({ "id": "x" })).unwrap();

        assert_eq!(count.load(AtomicOrdering::Relaxed), 1);
        assert_eq!(
            transport.send_count(),
            0,
            "main-origin fire of a MainWindow action must not touch the transport"
        );
    }

    #[test]
    fn test_global_scope_reaches_every_window_exactly_once() {
        let (routers, mut inboxes) = three_windows();
        let counters: Vec<_> = routers
            .iter()
            .map(|router| {
                let (count, hook) = counter();
                let sub = router.subscribe("ping-peer", hook).unwrap();
                (count, sub)
            })
            .collect();

        routers[0].fire("ping-peer", json!({ "count": 1 })).unwrap();

        // Origin sees it synchronously, before any pumping.
        assert_eq!(counters[0].0.load(AtomicOrdering::Relaxed), 1);

        for (inbox, router) in inboxes.iter_mut().zip(&routers) {
            pump(inbox, router);
        }
        for (i, (count, _sub)) in counters.iter().enumerate() {
            assert_eq!(
                count.load(AtomicOrdering::Relaxed),
                1,
                "window {} must see exactly one notification",
                i + 1
            );
        }
    }

    #[test]
    fn test_receive_never_reenters_the_forwarding_path() {
        let (router, transport) = router_with_recorder(RouterConfig::secondary(WindowId(2)));
        let (count, hook) = counter();
        let _sub = router.subscribe("ping-peer", hook).unwrap();

        router.receive(Envelope::new("ping-peer", json!({ "count": 1 }), WindowId(1)));

        assert_eq!(count.load(AtomicOrdering::Relaxed), 1);
        assert_eq!(
            transport.send_count(),
            0,
            "a received envelope must never produce a transport send"
        );
    }

    #[test]
    fn test_transport_sends_match_origin_fires() {
        let (router, transport) = router_with_recorder(RouterConfig::secondary(WindowId(2)));

        router.fire("ping-peer", json!(1)).unwrap();
        router.fire("ping-peer", json!(2)).unwrap();
        router.fire("queue-job", json!(3)).unwrap();
        router.receive(Envelope::new("ping-peer", json!(4), WindowId(1)));

        assert_eq!(transport.broadcasts.lock().unwrap().len(), 2);
        assert_eq!(transport.to_main.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_receive_drops_own_echo() {
        let (router, _transport) = router_with_recorder(RouterConfig::secondary(WindowId(2)));
        let (count, hook) = counter();
        let _sub = router.subscribe("ping-peer", hook).unwrap();

        router.receive(Envelope::new("ping-peer", json!(null), WindowId(2)));
        assert_eq!(count.load(AtomicOrdering::Relaxed), 0);
    }

    #[test]
    fn test_receive_unknown_action_is_dropped_not_fatal() {
        let (router, _transport) = router_with_recorder(RouterConfig::main(WindowId(1)));
        router.receive(Envelope::new("from-a-newer-build", json!(null), WindowId(9)));
    }

    #[test]
    fn test_fire_unknown_action_is_an_error() {
        let (router, _transport) = router_with_recorder(RouterConfig::main(WindowId(1)));
        let err = router.fire("nope", json!(null)).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownAction { .. }));
    }

    #[test]
    fn test_transport_failure_is_swallowed_and_local_effects_stand() {
        struct ClosedTransport;
        impl Transport for ClosedTransport {
            fn send_to_main(&self, _: Envelope) -> Result<(), TransportError> {
                Err(TransportError::MainClosed)
            }
            fn broadcast_to_others(&self, envelope: Envelope) -> Result<(), TransportError> {
                Err(TransportError::PeerClosed {
                    window: envelope.origin,
                })
            }
        }

        let router = Router::new(
            Registry::from_table(TABLE).unwrap(),
            Arc::new(ClosedTransport),
            RouterConfig::secondary(WindowId(2)),
        );
        let (count, hook) = counter();
        let _sub = router.subscribe("ping-peer", hook).unwrap();

        router.fire("ping-peer", json!(null)).unwrap();
        router.fire("queue-job", json!(null)).unwrap();
        assert_eq!(
            count.load(AtomicOrdering::Relaxed),
            1,
            "local fan-out of a Global fire must survive a dead transport"
        );
    }

    #[test]
    fn test_action_handle_dispatches_like_router_fire() {
        let (router, transport) = router_with_recorder(RouterConfig::secondary(WindowId(2)));
        let ping = router.action("ping-peer").unwrap();
        let (count, hook) = counter();
        let _sub = ping.subscribe(hook);

        assert_eq!(ping.name(), "ping-peer");
        assert_eq!(ping.scope(), Scope::Global);

        ping.fire(json!({ "count": 1 }));
        assert_eq!(count.load(AtomicOrdering::Relaxed), 1);
        assert_eq!(transport.broadcasts.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_example_scenario_ping_peer_and_queue_job() {
        let (routers, mut inboxes) = three_windows();

        let ping_counts: Vec<_> = routers
            .iter()
            .map(|router| {
                let count = Arc::new(AtomicUsize::new(0));
                let hook = Arc::clone(&count);
                let sub = router
                    .subscribe("ping-peer", move |payload| {
                        assert_eq!(payload, &json!({ "count": 1 }));
                        hook.fetch_add(1, AtomicOrdering::Relaxed);
                    })
                    .unwrap();
                (count, sub)
            })
            .collect();

        let queue_count = Arc::new(AtomicUsize::new(0));
        let queue_hook = Arc::clone(&queue_count);
        let _queue_sub = routers[0]
            .subscribe("queue-job", move |payload| {
                assert_eq!(payload, &json!({ "id": "x" }));
                queue_hook.fetch_add(1, AtomicOrdering::Relaxed);
            })
            .unwrap();

        routers[0].fire("ping-peer", json!({ "count": 1 })).unwrap();
        routers[1].fire("queue-job", json!({ "id": "x" })).unwrap();

        for (inbox, router) in inboxes.iter_mut().zip(&routers) {
            pump(inbox, router);
        }

        for (count, _sub) in &ping_counts {
            assert_eq!(count.load(AtomicOrdering::Relaxed), 1);
        }
        assert_eq!(queue_count.load(AtomicOrdering::Relaxed), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_spawn_listener_delivers_and_stops_on_cancel() {
        let hub = LocalHub::new();
        let (transport_main, _inbox_main) = hub.attach_main(WindowId(1));
        let (transport_child, inbox_child) = hub.attach(WindowId(2));

        let main = Router::new(
            Registry::from_table(TABLE).unwrap(),
            Arc::new(transport_main),
            RouterConfig::main(WindowId(1)),
        );
        let child = Router::new(
            Registry::from_table(TABLE).unwrap(),
            Arc::new(transport_child),
            RouterConfig::secondary(WindowId(2)),
        );

        let (count, hook) = counter();
        let _sub = child.subscribe("ping-peer", hook).unwrap();

        let shutdown = CancellationToken::new();
        let listener = child.spawn_listener(inbox_child, shutdown.clone());

        main.fire("ping-peer", json!({ "count": 1 })).unwrap();

        tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while count.load(AtomicOrdering::Relaxed) == 0 {
                tokio::time::sleep(std::time::Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("forwarded fire never reached the child window");

        shutdown.cancel();
        listener.await.expect("listener task panicked");
        assert_eq!(count.load(AtomicOrdering::Relaxed), 1);
    }
}
