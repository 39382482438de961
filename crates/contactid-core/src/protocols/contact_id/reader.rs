use std::ops::Range;

use super::error::{CidError, Field};
use super::layout;

pub struct CidReader<'a> {
    sentence: &'a [u8],
}

impl<'a> CidReader<'a> {
    pub fn new(sentence: &'a [u8]) -> Self {
        Self { sentence }
    }

    pub fn has_prefix(&self) -> bool {
        self.sentence.starts_with(layout::PREFIX)
    }

    /// Offset of the first "##" in the sentence, if any.
    pub fn terminator_offset(&self) -> Option<usize> {
        self.sentence
            .windows(layout::TERMINATOR.len())
            .position(|pair| pair == layout::TERMINATOR)
    }

    pub fn read_slice(&self, range: Range<usize>) -> Option<&'a [u8]> {
        self.sentence.get(range)
    }

    /// Decode a fixed-width, unsigned base-10 field.
    ///
    /// Every byte in `range` must be an ASCII digit; a missing range or any
    /// other byte (sign, space, letter) fails with the field's error.
    pub fn read_decimal(&self, range: Range<usize>, field: Field) -> Result<u32, CidError> {
        let digits = self
            .read_slice(range)
            .filter(|digits| !digits.is_empty())
            .ok_or(CidError::bad_field(field))?;
        digits.iter().try_fold(0u32, |acc, &b| {
            if b.is_ascii_digit() {
                Ok(acc * 10 + u32::from(b - b'0'))
            } else {
                Err(CidError::bad_field(field))
            }
        })
    }
}
