//! Sort-line parser for the bin section
//!
//! A sort line looks like
//!
//! ```text
//! 11 PASS AND ALL PASS^GOOD UNIT
//! 21 FAIL OR F001 F002 BIN OUT^OPEN/SHORT
//! ```
//!
//! The part before the first delimiter is whitespace separated: bin
//! number, result, logic, then any number of diagnostic codes. Some codes
//! contain a space and are protected with placeholders while splitting.

use crate::entities::ParsedSortLine;

/// Multi-word codes and the placeholders that carry them through splitting
pub const MULTI_WORD_TOKENS: [(&str, &str); 3] = [
    ("ALL PASS", "ALL_PASS"),
    ("BIN OUT", "BIN_OUT"),
    ("BIN IN", "BIN_IN"),
];

/// Parse one bin-section line
///
/// Returns `None` when the part before the delimiter has fewer than three
/// tokens. The phrase substitution is a plain substring replacement on the
/// raw prefix, so a phrase embedded in a longer word is also rewritten; such
/// a token is not restored and keeps its underscore.
pub fn parse_sort_line(line: &str, delimiter: char) -> Option<ParsedSortLine> {
    let (prefix, item) = match line.split_once(delimiter) {
        Some((prefix, item)) => (prefix, item.trim()),
        None => (line.trim(), ""),
    };

    let mut protected = prefix.to_string();
    for (phrase, placeholder) in MULTI_WORD_TOKENS {
        protected = protected.replace(phrase, placeholder);
    }

    let mut tokens = protected.split_whitespace().map(restore_phrase);

    let bin_no = tokens.next()?;
    let result = tokens.next()?;
    let logic = tokens.next()?;
    let codes = tokens.collect();

    Some(ParsedSortLine {
        bin_no,
        result,
        logic,
        codes,
        item: item.to_string(),
    })
}

fn restore_phrase(token: &str) -> String {
    MULTI_WORD_TOKENS
        .iter()
        .find(|(_, placeholder)| *placeholder == token)
        .map(|(phrase, _)| phrase.to_string())
        .unwrap_or_else(|| token.to_string())
}
