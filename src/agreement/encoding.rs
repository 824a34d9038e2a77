//! Single-byte text encoding for the agreement font.
//!
//! The PDF uses the standard Helvetica font with `WinAnsiEncoding`. We only
//! emit the part of that encoding that coincides with Latin-1: printable
//! ASCII (`0x20..=0x7E`) and `0xA0..=0xFF`. Anything else, including control
//! characters, is an error; text is never truncated or substituted.

/// A character the agreement font cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{field} has unprintable character {character:?} (U+{:04X}) at position {position}",
    code_point(.character)
)]
pub struct EncodingError {
    /// Which piece of text failed (e.g. `"driver name"`).
    pub field: &'static str,
    pub character: char,
    /// Character index (not byte offset) within the field.
    pub position: usize,
}

fn code_point(c: &char) -> u32 {
    u32::from(*c)
}

/// True for characters the agreement font can draw.
pub fn is_encodable(c: char) -> bool {
    matches!(u32::from(c), 0x20..=0x7E | 0xA0..=0xFF)
}

/// Check that every character of `text` is encodable.
pub fn check(field: &'static str, text: &str) -> Result<(), EncodingError> {
    match text.chars().enumerate().find(|(_, c)| !is_encodable(*c)) {
        Some((position, character)) => Err(EncodingError {
            field,
            character,
            position,
        }),
        None => Ok(()),
    }
}

/// Encode `text` as one byte per character.
pub fn encode(field: &'static str, text: &str) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(text.len());
    for (position, character) in text.chars().enumerate() {
        if !is_encodable(character) {
            return Err(EncodingError {
                field,
                character,
                position,
            });
        }
        // Checked above: the code point fits in one byte.
        out.push(u32::from(character) as u8);
    }
    Ok(out)
}
