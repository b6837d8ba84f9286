//! Line tokenizer for caret-delimited MTM text

use crate::entities::RawRecord;

/// Field delimiter used by MTM exports
pub const DELIMITER: char = '^';

/// Decode bytes as Latin-1
///
/// Every byte maps to the code point of the same value, so bytes above
/// 0x7F that are not valid UTF-8 survive unchanged.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode text as Latin-1, replacing characters above U+00FF with `?`
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Split a line into trimmed fields
///
/// Returns `None` for lines that are empty after trimming. There is no
/// quoting: the delimiter never appears inside a value.
pub fn tokenize(line: &str, delimiter: char) -> Option<Vec<String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(
        line.split(delimiter)
            .map(|field| field.trim().to_string())
            .collect(),
    )
}

/// Tokenize a line into a [`RawRecord`] tagged with its file name
pub fn tokenize_record(filename: &str, line: &str, delimiter: char) -> Option<RawRecord> {
    tokenize(line, delimiter).map(|fields| RawRecord::new(filename, line, fields))
}
