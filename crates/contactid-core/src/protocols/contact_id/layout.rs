use std::ops::Range;

/// Sentence start delimiter.
pub const START_DELIMITER: u8 = b'A';
/// Sentence end delimiter (carriage return).
pub const END_DELIMITER: u8 = 0x0d;
/// Shortest sentence the framer will accept, delimiters included.
pub const MIN_SENTENCE_LEN: usize = 19;

/// Acknowledgment written back to the panel for every accepted sentence.
pub const ACK: [u8; 4] = [b'O', b'K', 0x13, 0x0a];

pub const PREFIX: &[u8; 2] = b"AL";
pub const PREFIX_FILLER: &[u8; 2] = b"00";
pub const TERMINATOR: &[u8; 2] = b"##";

/// "##" offset for panels that omit the "00" filler.
pub const SHORT_TERMINATOR_OFFSET: usize = 17;
/// "##" offset for the documented layout.
pub const CANONICAL_TERMINATOR_OFFSET: usize = 19;

pub const ACCOUNT_RANGE: Range<usize> = 4..8;
pub const EVENT_ID_RANGE: Range<usize> = 8..10;
pub const EVENT_TYPE_RANGE: Range<usize> = 10..11;
pub const EVENT_CODE_RANGE: Range<usize> = 11..14;
pub const AREA_ID_RANGE: Range<usize> = 14..16;
pub const USER_OR_ZONE_RANGE: Range<usize> = 16..19;
