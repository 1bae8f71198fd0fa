//! Runtime counters for a session.

use std::sync::atomic::AtomicU64;

/// Session counters mutated from callback and worker contexts.
///
/// Shared by `Arc`; readable by the embedding application at any time.
#[derive(Debug, Default)]
pub struct SessionStats {
    /// Messages accepted from peers and handed to the worker.
    pub messages_processed: AtomicU64,
    /// Engine-reported send failures (non-zero `on_message_sent` codes).
    pub delivery_failures: AtomicU64,
    /// Protocol anomalies: duplicate peer ids, events outside an active
    /// session, and similar self-corrected conditions.
    pub protocol_anomalies: AtomicU64,
}
