//! Decoding of `\uXXXX` escapes, including UTF-16 surrogate pairs.
//!
//! [`UnicodeEscapeBuffer`] accumulates exactly four ASCII hexadecimal digits
//! (`0-9`, `A-F`, `a-f`) into a UTF-16 code unit. Code units are then resolved
//! to a `char` with [`Utf16Unit::classify`] and [`combine_surrogates`]: a high
//! surrogate must be followed by a low surrogate, everything else in the BMP
//! maps directly.

const HIGH_SURROGATES: core::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

#[derive(Debug)]
/// Buffer for accumulating four hexadecimal digits into one UTF-16 code unit.
pub(crate) struct UnicodeEscapeBuffer {
    value: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self { value: 0, len: 0 }
    }

    /// Feeds a single hexadecimal digit.
    ///
    /// - Returns `Ok(None)` while fewer than four digits have been seen.
    /// - Returns `Ok(Some(unit))` on the fourth digit and resets the buffer.
    /// - Returns `Err(c)` if `c` is not an ASCII hex digit.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, char> {
        let digit = c.to_digit(16).ok_or(c)?;
        #[expect(clippy::cast_possible_truncation)]
        let digit = digit as u16;
        self.value = (self.value << 4) | digit;
        self.len += 1;

        if self.len == 4 {
            let unit = self.value;
            self.value = 0;
            self.len = 0;
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}

/// What a single decoded code unit means on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Utf16Unit {
    /// A complete scalar value from the Basic Multilingual Plane.
    Scalar(char),
    /// The first half of a pair; a low surrogate must follow.
    High(u16),
    /// A second half with no first half before it.
    Low(u16),
}

impl Utf16Unit {
    pub fn classify(unit: u16) -> Self {
        if HIGH_SURROGATES.contains(&unit) {
            Self::High(unit)
        } else if LOW_SURROGATES.contains(&unit) {
            Self::Low(unit)
        } else {
            // Every non-surrogate BMP code unit is a scalar value.
            Self::Scalar(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER))
        }
    }
}

/// Combines a high and a low surrogate into the supplementary-plane scalar
/// they encode, or `None` if `low` is not a low surrogate.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Option<char> {
    if !HIGH_SURROGATES.contains(&high) || !LOW_SURROGATES.contains(&low) {
        return None;
    }
    let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code)
}
