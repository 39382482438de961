//! Contact ID receiver core.
//!
//! This crate turns the byte stream from an alarm panel's serial link into
//! decoded Contact ID events: a byte source feeds the framer, which cuts
//! delimiter-bounded sentences and acknowledges valid ones, and the decoder
//! (layout/reader/parser) turns each sentence into a [`CidMessage`]. Decoding
//! is byte-oriented and side-effect free; all I/O is isolated behind the
//! [`ByteSource`] capability.
//!
//! Invariants:
//! - Only sentences of at least 19 bytes starting with 'A' are acknowledged.
//! - A sentence never grows past the configured cap.
//! - Field errors name the field; unknown event codes are not errors.
//!
//! # Examples
//! ```
//! use contactid_core::parse_sentence;
//!
//! let msg = parse_sentence(b"AL00123418162701000##\r")?;
//! assert_eq!(msg.account, 1234);
//! assert_eq!(msg.event_code.description, "Program mode entry");
//! # Ok::<(), contactid_core::CidError>(())
//! ```

use serde::Serialize;

pub mod framer;
pub mod protocols;
mod receiver;
mod replay;
mod source;

pub use framer::{FrameError, FramerConfig, RawSentence, SentenceFramer, validate_sentence};
pub use protocols::contact_id::{
    CidError, CidMessage, EventCode, Field, canonicalize, parse_sentence,
};
pub use protocols::event_codes;
pub use receiver::{ContactIdReceiver, ReceiveError};
pub use replay::{ReplayError, replay_capture_file, replay_source};
pub use source::{ByteSource, MemorySource, SourceError, StreamSource};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no capture time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Replay report with events and errors in arrival order.
///
/// # Examples
/// ```
/// use contactid_core::make_stub_report;
///
/// let report = make_stub_report("panel.log", 123);
/// assert_eq!(report.report_version, contactid_core::REPORT_VERSION);
/// assert!(report.events.is_empty());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp; the capture file's modification time when known.
    pub generated_at: String,
    pub input: InputInfo,
    pub summary: ReplaySummary,
    pub events: Vec<EventRecord>,
    pub errors: Vec<ErrorRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input capture metadata embedded in reports.
#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    /// Input path as provided to the replay.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaySummary {
    /// Sentences that passed framing validation and were acknowledged.
    pub sentences_acknowledged: u64,
    pub events_decoded: u64,
    pub framing_errors: u64,
    pub decode_errors: u64,
    /// Decoded events whose code is missing from the catalog.
    pub unknown_event_codes: u64,
}

/// A decoded event; `index` is the 1-based position among acknowledged
/// sentences.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub index: u64,
    pub sentence: String,
    pub message: CidMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Framing,
    Decode,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    /// Escaped sentence text, when a sentence was framed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
}

/// Build an empty report with base fields filled.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> ReplayReport {
    ReplayReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "contactid".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: ReplaySummary::default(),
        events: vec![],
        errors: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_optional_error_fields_when_none() {
        let mut report = make_stub_report("panel.log", 1);
        report.errors.push(ErrorRecord {
            kind: ErrorKind::Framing,
            field: None,
            message: "invalid sentence".to_string(),
            sentence: None,
        });

        let value = serde_json::to_value(&report).expect("report json");
        let error = &value["errors"][0];
        assert_eq!(error["kind"], "framing");
        assert!(error.get("field").is_none());
        assert!(error.get("sentence").is_none());
    }

    #[test]
    fn event_serializes_code_and_description() {
        let mut report = make_stub_report("panel.log", 1);
        report.events.push(EventRecord {
            index: 1,
            sentence: "AL00123418162701000##\\r".to_string(),
            message: parse_sentence(b"AL00123418162701000##").expect("parse"),
        });

        let value = serde_json::to_value(&report).expect("report json");
        let message = &value["events"][0]["message"];
        assert_eq!(message["account"], 1234);
        assert_eq!(message["event_code"]["code"], 627);
        assert_eq!(message["event_code"]["description"], "Program mode entry");
        assert_eq!(value["tool"]["name"], "contactid");
    }
}
