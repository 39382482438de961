//! Contact ID sentence decoding.
//!
//! A sentence is ASCII: "AL", an optional "00" filler, then fixed-width
//! decimal fields (account, event id, event type, event code, area,
//! user/zone) and a "##" terminator. Panels seen in the field omit the filler,
//! so the parser canonicalizes the short form before slicing fields at fixed
//! offsets. Any other terminator offset is rejected rather than guessed.
//!
//! Errors name the offending field. Byte offsets live in `layout`, digit
//! conventions in `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::{CidError, Field};
pub use parser::{CidMessage, EventCode, canonicalize, parse_sentence};
