//! Session lifecycle coordination for the peer-connection observer.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use huddle_common::{Error, PeerId, Result, SignalPayload};

use crate::observer::{ClientObserver, SignalReceiver};
use crate::stats::SessionStats;
use crate::worker::Worker;

/// Lifecycle of a signaling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not yet authenticated with the signaling service.
    Unauthenticated,
    /// Authenticated; peers may connect and exchange messages.
    SignedIn,
    /// Signaling connection lost; all peer state has been invalidated.
    Disconnected,
}

struct SessionInner {
    state: SessionState,
    peers: HashMap<PeerId, String>,
    // Bumped on every disconnect so queued worker jobs from an earlier
    // session never deliver into a later one.
    generation: u64,
}

/// Bridges a peer-connection engine to an external signaling receiver.
///
/// Callbacks arrive on threads owned by the engine. Session state is
/// guarded by a mutex shared with jobs on the owned background worker; the
/// mutex is never held across a receiver call or across `wait`.
pub struct SessionObserver {
    name: String,
    receiver: Arc<dyn SignalReceiver>,
    inner: Arc<Mutex<SessionInner>>,
    worker: Worker,
    stats: Arc<SessionStats>,
}

impl SessionObserver {
    /// Creates an observer for a session with local display name `name`.
    ///
    /// The receiver is shared, not owned, and must be managed independently
    /// of this observer. An empty name is rejected.
    pub fn new(name: impl Into<String>, receiver: Arc<dyn SignalReceiver>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_state("session name must be non-empty"));
        }
        Ok(Self {
            name,
            receiver,
            inner: Arc::new(Mutex::new(SessionInner {
                state: SessionState::Unauthenticated,
                peers: HashMap::new(),
                generation: 0,
            })),
            worker: Worker::new(),
            stats: Arc::new(SessionStats::default()),
        })
    }

    /// Local display name this session was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().unwrap().state
    }

    pub fn peer_count(&self) -> usize {
        self.inner.lock().unwrap().peers.len()
    }

    /// Display name of a currently tracked peer.
    pub fn peer_name(&self, peer: PeerId) -> Option<String> {
        self.inner.lock().unwrap().peers.get(&peer).cloned()
    }

    /// Generation of the current session; changes on every disconnect.
    pub fn generation(&self) -> u64 {
        self.inner.lock().unwrap().generation
    }

    pub fn stats(&self) -> Arc<SessionStats> {
        self.stats.clone()
    }

    /// Encodes `payload` and requests delivery to `peer` through the
    /// signaling receiver.
    pub fn send_to_peer(&self, peer: PeerId, payload: &SignalPayload) -> Result<()> {
        {
            let inner = self.inner.lock().unwrap();
            if inner.state != SessionState::SignedIn {
                return Err(Error::invalid_state("session is not signed in"));
            }
            if !inner.peers.contains_key(&peer) {
                return Err(Error::invalid_state(format!("peer {peer} is not connected")));
            }
        }
        let text = payload.to_text()?;
        self.receiver.send_to_peer(peer, &text)
    }

    /// Blocks until all queued background work has completed.
    ///
    /// Shutdown only: calling this from inside an observer callback would
    /// deadlock against the engine's delivery thread.
    pub fn wait(&self) {
        self.worker.wait();
    }

    fn anomaly(&self) {
        self.stats.protocol_anomalies.fetch_add(1, Ordering::Relaxed);
    }

    /// Interprets message text from a tracked peer and hands the decoded
    /// payload to the background worker for delivery.
    fn process_message(&self, peer: PeerId, generation: u64, message: &str) {
        let payload = match SignalPayload::from_text(message) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("malformed message from peer {}: {}", peer, err);
                return;
            }
        };

        if payload == SignalPayload::Bye {
            // The peer announced departure; drop it now rather than waiting
            // for the signaling layer's disconnect notice.
            self.on_peer_disconnected(peer);
        }

        // Delivery may block inside the receiver, so it runs on the worker.
        // The generation check keeps payloads from crossing a disconnect.
        let receiver = self.receiver.clone();
        let state = self.inner.clone();
        let queued = self.worker.spawn(move || {
            if state.lock().unwrap().generation != generation {
                debug!("dropping stale payload for peer {}", peer);
                return;
            }
            receiver.deliver(peer, payload);
        });
        if queued {
            self.stats.messages_processed.fetch_add(1, Ordering::Relaxed);
        } else {
            warn!("worker unavailable, dropped message from peer {}", peer);
        }
    }
}

impl fmt::Debug for SessionObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock().unwrap();
        f.debug_struct("SessionObserver")
            .field("name", &self.name)
            .field("state", &inner.state)
            .field("peers", &inner.peers.len())
            .field("generation", &inner.generation)
            .finish()
    }
}

impl ClientObserver for SessionObserver {
    fn on_signed_in(&self) {
        let started = {
            let mut inner = self.inner.lock().unwrap();
            match inner.state {
                SessionState::SignedIn => {
                    warn!("duplicate sign-in for session {}", self.name);
                    self.anomaly();
                    false
                }
                SessionState::Unauthenticated => {
                    inner.state = SessionState::SignedIn;
                    true
                }
                SessionState::Disconnected => {
                    // A later sign-in begins a logically new session with a
                    // fresh peer set.
                    inner.state = SessionState::SignedIn;
                    inner.peers.clear();
                    true
                }
            }
        };
        if started {
            info!("session {} signed in", self.name);
            // Setup that may block runs off the engine's delivery thread.
            self.worker.start();
        }
    }

    fn on_disconnected(&self) {
        let dropped = {
            let mut inner = self.inner.lock().unwrap();
            if inner.state == SessionState::Disconnected {
                return;
            }
            inner.state = SessionState::Disconnected;
            inner.generation += 1;
            let dropped = inner.peers.len();
            inner.peers.clear();
            dropped
        };
        info!(
            "session {} disconnected, invalidated {} peer(s)",
            self.name, dropped
        );
    }

    fn on_peer_connected(&self, peer: PeerId, name: &str) {
        let mut inner = self.inner.lock().unwrap();
        if inner.state != SessionState::SignedIn {
            warn!("peer {} ({}) connected outside an active session", peer, name);
            self.anomaly();
            return;
        }
        match inner.peers.entry(peer) {
            Entry::Occupied(entry) => {
                warn!(
                    "duplicate peer id {}: already tracked as {}, ignoring {}",
                    peer,
                    entry.get(),
                    name
                );
                self.anomaly();
            }
            Entry::Vacant(slot) => {
                slot.insert(name.to_string());
                info!("peer {} ({}) connected", peer, name);
            }
        }
    }

    fn on_peer_disconnected(&self, peer: PeerId) {
        let removed = self.inner.lock().unwrap().peers.remove(&peer);
        match removed {
            Some(name) => info!("peer {} ({}) disconnected", peer, name),
            // Disconnect notices may race local cleanup; not an error.
            None => debug!("disconnect for untracked peer {}", peer),
        }
    }

    fn on_message_from_peer(&self, peer: PeerId, message: &str) {
        let generation = {
            let inner = self.inner.lock().unwrap();
            if inner.state != SessionState::SignedIn {
                warn!("message from peer {} outside an active session, dropped", peer);
                self.anomaly();
                return;
            }
            if !inner.peers.contains_key(&peer) {
                warn!("message from untracked peer {}, dropped", peer);
                self.anomaly();
                return;
            }
            inner.generation
        };
        self.process_message(peer, generation, message);
    }

    fn on_message_sent(&self, err: i32) {
        if err == 0 {
            debug!("signaling send completed");
        } else {
            self.stats.delivery_failures.fetch_add(1, Ordering::Relaxed);
            warn!("signaling send failed with code {}", err);
        }
    }
}
