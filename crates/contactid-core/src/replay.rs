//! Offline replay of captured serial traffic.
//!
//! Drives a [`ContactIdReceiver`] over a finite byte source until it closes and
//! aggregates every decoded event and every framing/decoding error, in arrival
//! order, into a [`ReplayReport`].

use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::framer::{FrameError, FramerConfig};
use crate::receiver::ContactIdReceiver;
use crate::source::{ByteSource, SourceError, StreamSource};
use crate::{
    DEFAULT_GENERATED_AT, ErrorKind, ErrorRecord, EventRecord, InputInfo, ReplayReport,
    make_stub_report,
};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Framer error: {0}")]
    Frame(FrameError),
}

impl From<FrameError> for ReplayError {
    fn from(value: FrameError) -> Self {
        match value {
            FrameError::Source(err) => ReplayError::Source(err),
            other => ReplayError::Frame(other),
        }
    }
}

/// Replay a raw serial capture file; acknowledgments are discarded.
pub fn replay_capture_file(path: &Path, config: FramerConfig) -> Result<ReplayReport, ReplayError> {
    let file = File::open(path)?;
    let meta = file.metadata()?;
    let input = InputInfo {
        path: path.display().to_string(),
        bytes: meta.len(),
    };
    let generated_at = meta
        .modified()
        .ok()
        .and_then(|ts| OffsetDateTime::from(ts).format(&Rfc3339).ok())
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());

    let mut report = replay_source(input, StreamSource::new(file, io::sink()), config)?;
    report.generated_at = generated_at;
    Ok(report)
}

/// Replay any finite byte source until it reports `Closed`.
///
/// # Errors
/// Invalid framer configuration, or a source failure other than `Closed`.
pub fn replay_source<S: ByteSource>(
    input: InputInfo,
    source: S,
    config: FramerConfig,
) -> Result<ReplayReport, ReplayError> {
    let mut receiver = ContactIdReceiver::with_config(source, config)?;
    let mut report = make_stub_report(&input.path, input.bytes);
    let mut index = 0u64;

    loop {
        let sentence = match receiver.next_sentence() {
            Ok(sentence) => sentence,
            Err(err) if err.is_closed() => break,
            Err(err @ (FrameError::InvalidSentence { .. } | FrameError::SentenceTooLong { .. })) => {
                report.summary.framing_errors += 1;
                report.errors.push(ErrorRecord {
                    kind: ErrorKind::Framing,
                    field: None,
                    message: err.to_string(),
                    sentence: None,
                });
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        index += 1;
        report.summary.sentences_acknowledged += 1;
        match sentence.decode() {
            Ok(message) => {
                if !message.event_code.is_known() {
                    report.summary.unknown_event_codes += 1;
                }
                report.summary.events_decoded += 1;
                report.events.push(EventRecord {
                    index,
                    sentence: sentence.to_string(),
                    message,
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, sentence = %sentence, "sentence did not decode");
                report.summary.decode_errors += 1;
                report.errors.push(ErrorRecord {
                    kind: ErrorKind::Decode,
                    field: err.field().map(|field| field.to_string()),
                    message: err.to_string(),
                    sentence: Some(sentence.to_string()),
                });
            }
        }
    }

    tracing::debug!(
        events = report.summary.events_decoded,
        errors = report.errors.len(),
        "replay finished"
    );
    Ok(report)
}
