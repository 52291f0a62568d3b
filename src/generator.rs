//! # JSON Generator - Bounded Message Text Production
//!
//! ## Purpose
//!
//! Renders a flat JSON object from typed entries into a caller-supplied
//! byte buffer. The inverse of the scanner: where scanning turns bytes into
//! tokens, generation turns (name, value) entries back into message text,
//! with the buffer size as the only resource ceiling.
//!
//! ## Integration Points
//!
//! - **Input**: a bounded slice of [`JsonEntry`] values assembled by the
//!   codec from the currently-set field slots
//! - **Output**: compact JSON object text, byte count returned; an
//!   undersized buffer is a distinct capacity error, never a silently
//!   truncated message
//!
//! Integer rendering goes through `core::fmt` over a fixed byte cursor, so
//! the whole path stays allocation-free.

use crate::error::{CodecError, CodecResult};
use crate::field::FieldValue;
use core::fmt::{self, Write};

/// One key/value entry handed to the generator.
///
/// Names come from the static schema table and therefore outlive any
/// generation call; values carry their JSON shape in the [`FieldValue`]
/// tag. Entries for unset slots are never constructed.
#[derive(Debug, Clone, Copy)]
pub struct JsonEntry {
    pub name: &'static str,
    pub value: FieldValue,
}

/// Render `entries` as one JSON object into `out`.
///
/// Returns the number of bytes written. If `out` cannot hold the full
/// message the result is [`CodecError::SmallBuffer`] and no byte count is
/// reported, so a partially filled buffer cannot be mistaken for valid
/// output. Entries with an unset value are skipped.
pub fn generate_object(out: &mut [u8], entries: &[JsonEntry]) -> CodecResult<usize> {
    let mut cursor = ByteCursor::new(out);

    cursor.put(b"{")?;
    let mut first = true;
    for entry in entries {
        let rendered = match entry.value {
            FieldValue::Unset => continue,
            FieldValue::Boolean(true) => Rendered::Literal(b"true"),
            FieldValue::Boolean(false) => Rendered::Literal(b"false"),
            FieldValue::Integer(number) => Rendered::Integer(number),
        };

        if !first {
            cursor.put(b",")?;
        }
        first = false;

        cursor.put(b"\"")?;
        cursor.put(entry.name.as_bytes())?;
        cursor.put(b"\":")?;
        match rendered {
            Rendered::Literal(bytes) => cursor.put(bytes)?,
            Rendered::Integer(number) => {
                write!(cursor, "{}", number).map_err(|_| CodecError::SmallBuffer)?
            }
        }
    }
    cursor.put(b"}")?;

    Ok(cursor.written())
}

enum Rendered {
    Literal(&'static [u8]),
    Integer(i32),
}

/// Forward-only writer over a fixed byte buffer
struct ByteCursor<'a> {
    buffer: &'a mut [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    fn put(&mut self, bytes: &[u8]) -> CodecResult<()> {
        let end = self.position + bytes.len();
        if end > self.buffer.len() {
            return Err(CodecError::SmallBuffer);
        }
        self.buffer[self.position..end].copy_from_slice(bytes);
        self.position = end;
        Ok(())
    }

    fn written(&self) -> usize {
        self.position
    }
}

impl fmt::Write for ByteCursor<'_> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        self.put(text.as_bytes()).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &'static str, value: FieldValue) -> JsonEntry {
        JsonEntry { name, value }
    }

    #[test]
    fn test_empty_entry_list_yields_empty_object() {
        let mut out = [0u8; 8];
        let written = generate_object(&mut out, &[]).unwrap();
        assert_eq!(&out[..written], b"{}");
    }

    #[test]
    fn test_mixed_entries() {
        let mut out = [0u8; 128];
        let written = generate_object(
            &mut out,
            &[
                entry("is1Active", FieldValue::Boolean(true)),
                entry("isSetState", FieldValue::Boolean(false)),
                entry("positionX", FieldValue::Integer(-42)),
                entry("receiverId", FieldValue::Integer(0)),
            ],
        )
        .unwrap();

        assert_eq!(
            &out[..written],
            br#"{"is1Active":true,"isSetState":false,"positionX":-42,"receiverId":0}"#
        );
    }

    #[test]
    fn test_unset_entries_are_skipped() {
        let mut out = [0u8; 64];
        let written = generate_object(
            &mut out,
            &[
                entry("is1Active", FieldValue::Unset),
                entry("receiverId", FieldValue::Integer(3)),
            ],
        )
        .unwrap();
        assert_eq!(&out[..written], br#"{"receiverId":3}"#);
    }

    #[test]
    fn test_small_buffer_is_reported() {
        let mut out = [0u8; 10];
        let result = generate_object(
            &mut out,
            &[entry("positionX", FieldValue::Integer(123456))],
        );
        assert_eq!(result, Err(CodecError::SmallBuffer));
    }

    #[test]
    fn test_exact_fit_succeeds() {
        let mut out = [0u8; 2];
        assert_eq!(generate_object(&mut out, &[]), Ok(2));

        let mut too_small = [0u8; 1];
        assert_eq!(
            generate_object(&mut too_small, &[]),
            Err(CodecError::SmallBuffer)
        );
    }

    #[test]
    fn test_extreme_integer_values() {
        let mut out = [0u8; 64];
        let written = generate_object(
            &mut out,
            &[
                entry("positionX", FieldValue::Integer(i32::MIN)),
                entry("positionY", FieldValue::Integer(i32::MAX)),
            ],
        )
        .unwrap();
        assert_eq!(
            &out[..written],
            br#"{"positionX":-2147483648,"positionY":2147483647}"#
        );
    }
}
