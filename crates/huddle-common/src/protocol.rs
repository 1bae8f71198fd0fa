use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text::replace_literal;

/// Opaque peer identifier assigned by the signaling layer.
pub type PeerId = i32;

/// Upper bound on a single signaling text payload.
pub const MAX_SIGNAL_TEXT_BYTES: usize = 64 * 1024;

/// Negotiation payload carried as text through the signaling channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SignalPayload {
    /// SDP offer from the initiating side.
    Offer { sdp: String },

    /// SDP answer from the accepting side.
    Answer { sdp: String },

    /// ICE candidate for NAT traversal.
    Candidate {
        sdp_mid: String,
        sdp_mline_index: u32,
        candidate: String,
    },

    /// The peer is leaving the session.
    Bye,

    /// Plain chat text.
    Chat { text: String },
}

impl SignalPayload {
    /// Decodes a payload from message text received over the signaling channel.
    ///
    /// Oversized or malformed text is rejected; SDP bodies are sanitized so
    /// that escaped line breaks produced by some signaling stacks become
    /// real CRLF sequences.
    pub fn from_text(text: &str) -> Result<Self> {
        if text.len() > MAX_SIGNAL_TEXT_BYTES {
            return Err(Error::protocol(format!(
                "payload too large: {} bytes",
                text.len()
            )));
        }
        let payload: SignalPayload =
            serde_json::from_str(text).map_err(Error::serialization)?;
        Ok(payload.sanitized())
    }

    /// Encodes the payload for transmission over the signaling channel.
    pub fn to_text(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::serialization)
    }

    fn sanitized(self) -> Self {
        match self {
            SignalPayload::Offer { sdp } => SignalPayload::Offer {
                sdp: normalize_sdp(&sdp),
            },
            SignalPayload::Answer { sdp } => SignalPayload::Answer {
                sdp: normalize_sdp(&sdp),
            },
            other => other,
        }
    }
}

fn normalize_sdp(sdp: &str) -> String {
    replace_literal(sdp, "\\r\\n", "\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_offer_and_normalizes_sdp() {
        let payload =
            SignalPayload::from_text(r#"{"type":"Offer","sdp":"v=0\\r\\no=alice"}"#).unwrap();
        assert_eq!(
            payload,
            SignalPayload::Offer {
                sdp: "v=0\r\no=alice".to_string()
            }
        );
    }

    #[test]
    fn decodes_candidate() {
        let text = r#"{"type":"Candidate","sdp_mid":"0","sdp_mline_index":0,"candidate":"candidate:1 1 udp 2122260223 192.0.2.1 54400 typ host"}"#;
        let payload = SignalPayload::from_text(text).unwrap();
        match payload {
            SignalPayload::Candidate {
                sdp_mid,
                sdp_mline_index,
                ..
            } => {
                assert_eq!(sdp_mid, "0");
                assert_eq!(sdp_mline_index, 0);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn chat_round_trips() {
        let payload = SignalPayload::Chat {
            text: "hello".to_string(),
        };
        let text = payload.to_text().unwrap();
        assert_eq!(SignalPayload::from_text(&text).unwrap(), payload);
    }

    #[test]
    fn bye_decodes_from_tag_only() {
        let payload = SignalPayload::from_text(r#"{"type":"Bye"}"#).unwrap();
        assert_eq!(payload, SignalPayload::Bye);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SignalPayload::from_text("not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn rejects_unknown_type() {
        let err = SignalPayload::from_text(r#"{"type":"Bogus"}"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn rejects_oversized_payload() {
        let text = format!(
            r#"{{"type":"Chat","text":"{}"}}"#,
            "a".repeat(MAX_SIGNAL_TEXT_BYTES)
        );
        let err = SignalPayload::from_text(&text).unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }
}
