use std::fs;
use std::io::{Cursor, Write};
use std::time::Duration;

use contactid_core::{
    ByteSource, ContactIdReceiver, FramerConfig, InputInfo, ReplayError, SourceError,
    StreamSource, replay_capture_file, replay_source,
};
use tempfile::NamedTempFile;

const CAPTURE: &[u8] = b"\x00\x00AL00123418162701000##\r\n\
AL023418314501000##\r\n\
garbage\r\n\
AL00555518113003012##\r\n";

fn fast() -> FramerConfig {
    FramerConfig {
        poll_interval: Duration::ZERO,
        ..FramerConfig::default()
    }
}

#[test]
fn replay_capture_file_decodes_every_sentence() {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(CAPTURE).expect("write capture");
    file.flush().expect("flush capture");

    let report = replay_capture_file(file.path(), fast()).expect("replay");

    assert_eq!(report.input.bytes, CAPTURE.len() as u64);
    assert_ne!(report.generated_at, contactid_core::DEFAULT_GENERATED_AT);
    assert_eq!(report.summary.events_decoded, 3);
    assert!(report.errors.is_empty());

    let accounts: Vec<u16> = report.events.iter().map(|e| e.message.account).collect();
    assert_eq!(accounts, vec![1234, 234, 5555]);

    let burglary = &report.events[2].message;
    assert_eq!(burglary.event_id, 18);
    assert_eq!(burglary.event_type, 1);
    assert_eq!(burglary.event_code.code, 130);
    assert_eq!(burglary.event_code.description, "Burglary");
    assert_eq!(burglary.area_id, 3);
    assert_eq!(burglary.user_or_zone, 12);
}

#[test]
fn replay_capture_file_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = replay_capture_file(&dir.path().join("missing.log"), fast()).unwrap_err();
    assert!(matches!(err, ReplayError::Io(_)));
}

#[test]
fn receiver_acknowledges_through_stream_writer() {
    let source = StreamSource::new(Cursor::new(CAPTURE.to_vec()), Vec::<u8>::new());
    let mut receiver = ContactIdReceiver::with_config(source, fast()).expect("receiver");

    let mut decoded = 0;
    loop {
        match receiver.next_message() {
            Ok(_) => decoded += 1,
            Err(contactid_core::ReceiveError::Frame(err)) if err.is_closed() => break,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    assert_eq!(decoded, 3);

    let (_, acks) = receiver.into_source().into_inner();
    assert_eq!(acks, b"OK\x13\n".repeat(3));
}

struct FailingReader;

impl std::io::Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("uart gone"))
    }
}

#[test]
fn replay_surfaces_source_failures() {
    let mut source = StreamSource::new(FailingReader, std::io::sink());
    assert!(matches!(source.bytes_available(), Err(SourceError::Io(_))));

    let input = InputInfo {
        path: "uart".to_string(),
        bytes: 0,
    };
    let err = replay_source(input, source, fast()).unwrap_err();
    assert!(matches!(err, ReplayError::Source(SourceError::Io(_))));
}
