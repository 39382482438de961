use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::{CidError, Field};
use super::layout;
use super::reader::CidReader;
use crate::protocols::event_codes;

/// A 3-digit Contact ID event code with its resolved description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventCode {
    pub code: u16,
    pub description: &'static str,
}

impl EventCode {
    pub fn new(code: u16) -> Self {
        Self {
            code,
            description: event_codes::describe(code),
        }
    }

    pub fn is_known(&self) -> bool {
        event_codes::lookup(self.code).is_some()
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03} ({})", self.code, self.description)
    }
}

/// A decoded Contact ID event.
///
/// # Examples
/// ```
/// use contactid_core::CidMessage;
///
/// let msg: CidMessage = "AL00123418162701000##".parse()?;
/// assert_eq!(msg.account, 1234);
/// assert_eq!(msg.event_code.code, 627);
/// # Ok::<(), contactid_core::CidError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CidMessage {
    pub account: u16,
    /// 1 = new event, 3 = restore event by convention; passed through as sent.
    pub event_id: u8,
    pub event_type: u8,
    pub event_code: EventCode,
    pub area_id: u8,
    pub user_or_zone: u16,
}

impl fmt::Display for CidMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CID Message:")?;
        writeln!(f, "\tAccount:    {}", self.account)?;
        writeln!(f, "\tEvent ID:   {}", self.event_id)?;
        writeln!(f, "\tEvent Type: {}", self.event_type)?;
        writeln!(f, "\tEvent Code: {}", self.event_code)?;
        writeln!(f, "\tArea ID:    {}", self.area_id)?;
        write!(f, "\tUser/Zone:  {}", self.user_or_zone)
    }
}

impl FromStr for CidMessage {
    type Err = CidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sentence(s.as_bytes())
    }
}

/// Rewrite a sentence into the documented "AL00..." layout.
///
/// Some panels omit the "00" filler after "AL", which moves the "##"
/// terminator from offset 19 to 17. Any other terminator offset is rejected.
///
/// # Examples
/// ```
/// use contactid_core::canonicalize;
///
/// let canonical = canonicalize(b"AL023418314501000##")?;
/// assert_eq!(&canonical[..], b"AL00023418314501000##");
/// # Ok::<(), contactid_core::CidError>(())
/// ```
pub fn canonicalize(sentence: &[u8]) -> Result<Cow<'_, [u8]>, CidError> {
    let reader = CidReader::new(sentence);
    if !reader.has_prefix() {
        return Err(CidError::InvalidSentence {
            reason: "missing AL prefix",
        });
    }

    match reader.terminator_offset() {
        Some(layout::SHORT_TERMINATOR_OFFSET) => {
            let rest = &sentence[layout::PREFIX.len()..];
            let mut canonical = Vec::with_capacity(sentence.len() + layout::PREFIX_FILLER.len());
            canonical.extend_from_slice(layout::PREFIX);
            canonical.extend_from_slice(layout::PREFIX_FILLER);
            canonical.extend_from_slice(rest);
            Ok(Cow::Owned(canonical))
        }
        Some(layout::CANONICAL_TERMINATOR_OFFSET) => Ok(Cow::Borrowed(sentence)),
        Some(_) => Err(CidError::InvalidSentence {
            reason: "terminator at unrecognized offset",
        }),
        None => Err(CidError::InvalidSentence {
            reason: "missing ## terminator",
        }),
    }
}

/// Decode one Contact ID sentence (trailing CR/LF allowed after "##").
///
/// # Errors
/// `CidError::InvalidSentence` for a wrong prefix or terminator offset, or the
/// field-specific error for the first field that is not all decimal digits.
pub fn parse_sentence(sentence: &[u8]) -> Result<CidMessage, CidError> {
    let canonical = canonicalize(sentence)?;
    let reader = CidReader::new(&canonical);

    let account = reader.read_decimal(layout::ACCOUNT_RANGE, Field::Account)?;
    let event_id = reader.read_decimal(layout::EVENT_ID_RANGE, Field::EventId)?;
    let event_type = reader.read_decimal(layout::EVENT_TYPE_RANGE, Field::EventType)?;
    let event_code = reader.read_decimal(layout::EVENT_CODE_RANGE, Field::EventCode)?;
    let area_id = reader.read_decimal(layout::AREA_ID_RANGE, Field::AreaId)?;
    let user_or_zone = reader.read_decimal(layout::USER_OR_ZONE_RANGE, Field::UserOrZone)?;

    Ok(CidMessage {
        account: narrow(account, Field::Account)?,
        event_id: narrow(event_id, Field::EventId)?,
        event_type: narrow(event_type, Field::EventType)?,
        event_code: EventCode::new(narrow(event_code, Field::EventCode)?),
        area_id: narrow(area_id, Field::AreaId)?,
        user_or_zone: narrow(user_or_zone, Field::UserOrZone)?,
    })
}

fn narrow<T: TryFrom<u32>>(value: u32, field: Field) -> Result<T, CidError> {
    T::try_from(value).map_err(|_| CidError::bad_field(field))
}
