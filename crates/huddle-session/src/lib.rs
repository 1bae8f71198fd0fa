//! Session observer and lifecycle coordination for Huddle.
//!
//! This crate implements the observer contract a peer-connection engine
//! calls into: it tracks the connected-peer set, decodes negotiation
//! payloads embedded in peer messages, and owns the single background
//! worker used for session work that may block.

#![forbid(unsafe_code)]

pub mod observer;
pub mod session;
pub mod stats;
pub mod worker;

pub use observer::{ClientObserver, SignalReceiver};
pub use session::{SessionObserver, SessionState};
pub use stats::SessionStats;
pub use worker::Worker;
