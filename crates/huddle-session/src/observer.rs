//! Capability traits at the engine and signaling-receiver boundaries.

use huddle_common::{PeerId, Result, SignalPayload};

/// Callback set a peer-connection engine drives.
///
/// The engine owns the delivery threads: implementations must tolerate
/// concurrent invocation and must not block or panic inside a callback.
pub trait ClientObserver: Send + Sync {
    /// Called once the signaling service has authenticated us.
    fn on_signed_in(&self);

    /// Called when the signaling connection is lost.
    fn on_disconnected(&self);

    /// Called when a remote peer registers with the signaling service.
    fn on_peer_connected(&self, peer: PeerId, name: &str);

    /// Called when a peer leaves. May arrive for peers that were already
    /// cleaned up locally.
    fn on_peer_disconnected(&self, peer: PeerId);

    /// Called when a text message arrives from a peer.
    fn on_message_from_peer(&self, peer: PeerId, message: &str);

    /// Reports the outcome of a previously requested send. Zero is success;
    /// any other value is a non-fatal delivery failure.
    fn on_message_sent(&self, err: i32);
}

/// External signaling receiver the session hands decoded payloads to and
/// requests outbound delivery through.
///
/// The receiver is shared, not owned: it is managed independently of any
/// session observer and must outlive every session that holds it.
pub trait SignalReceiver: Send + Sync {
    /// Hands a decoded negotiation payload onward.
    ///
    /// May block; the session only invokes this from its background worker.
    fn deliver(&self, peer: PeerId, payload: SignalPayload);

    /// Requests delivery of `text` to `peer` through the signaling channel.
    fn send_to_peer(&self, peer: PeerId, text: &str) -> Result<()>;
}
