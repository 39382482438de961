use std::fmt;

use thiserror::Error;

/// Fixed-width field of a Contact ID sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Account,
    EventId,
    EventType,
    EventCode,
    AreaId,
    UserOrZone,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Account => "account",
            Field::EventId => "event id",
            Field::EventType => "event type",
            Field::EventCode => "event code",
            Field::AreaId => "area id",
            Field::UserOrZone => "user/zone",
        };
        f.write_str(name)
    }
}

/// Errors returned by Contact ID sentence decoding.
///
/// Field errors carry no partial message; each names the field whose byte
/// range was missing or not made of decimal digits.
///
/// # Examples
/// ```
/// use contactid_core::{CidError, Field, parse_sentence};
///
/// let err = parse_sentence(b"AL00123418162701X00##").unwrap_err();
/// assert!(matches!(err, CidError::BadUserOrZone));
/// assert_eq!(err.field(), Some(Field::UserOrZone));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidError {
    #[error("invalid sentence: {reason}")]
    InvalidSentence { reason: &'static str },
    #[error("bad account number")]
    BadAccountNumber,
    #[error("bad event ID")]
    BadEventId,
    #[error("bad event type")]
    BadEventType,
    #[error("bad event code")]
    BadEventCode,
    #[error("bad event area")]
    BadAreaId,
    #[error("bad user/zone")]
    BadUserOrZone,
}

impl CidError {
    pub fn bad_field(field: Field) -> Self {
        match field {
            Field::Account => CidError::BadAccountNumber,
            Field::EventId => CidError::BadEventId,
            Field::EventType => CidError::BadEventType,
            Field::EventCode => CidError::BadEventCode,
            Field::AreaId => CidError::BadAreaId,
            Field::UserOrZone => CidError::BadUserOrZone,
        }
    }

    /// The offending field, or `None` for sentence-level errors.
    pub fn field(&self) -> Option<Field> {
        match self {
            CidError::InvalidSentence { .. } => None,
            CidError::BadAccountNumber => Some(Field::Account),
            CidError::BadEventId => Some(Field::EventId),
            CidError::BadEventType => Some(Field::EventType),
            CidError::BadEventCode => Some(Field::EventCode),
            CidError::BadAreaId => Some(Field::AreaId),
            CidError::BadUserOrZone => Some(Field::UserOrZone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CidError, Field};

    #[test]
    fn bad_field_round_trips_through_field() {
        for field in [
            Field::Account,
            Field::EventId,
            Field::EventType,
            Field::EventCode,
            Field::AreaId,
            Field::UserOrZone,
        ] {
            assert_eq!(CidError::bad_field(field).field(), Some(field));
        }
    }

    #[test]
    fn invalid_sentence_has_no_field() {
        let err = CidError::InvalidSentence { reason: "missing AL prefix" };
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains("missing AL prefix"));
    }
}
