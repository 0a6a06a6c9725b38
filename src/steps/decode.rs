use crate::error::DecodeError;
use crate::types::Record;

/// Characters kept on each side of the error position in a snippet.
const SNIPPET_RADIUS: usize = 8;

/// Parse raw text into a [`Record`].
///
/// Any well-formed JSON document decodes, including arrays and scalars; shape
/// checks belong to validation.
pub fn decode(input: &str) -> Result<Record, DecodeError> {
    serde_json::from_str::<serde_json::Value>(input)
        .map(Record::from_value)
        .map_err(|err| {
            let snippet = snippet_at(input, err.line(), err.column());
            DecodeError::new(err, snippet)
        })
}

/// Text around a 1-based `line`/`column` position, or `None` when the
/// position does not fall on a non-empty line of `input`.
///
/// `column` counts bytes, as the parser reports it; the window is cut on
/// char boundaries.
pub(crate) fn snippet_at(input: &str, line: usize, column: usize) -> Option<String> {
    let text = input.lines().nth(line.checked_sub(1)?)?;
    let offset = column.saturating_sub(1);
    if offset > text.len() {
        return None;
    }
    let char_index = text
        .char_indices()
        .take_while(|(i, _)| *i < offset)
        .count();
    let start = char_index.saturating_sub(SNIPPET_RADIUS);
    let snippet: String = text
        .chars()
        .skip(start)
        .take(2 * SNIPPET_RADIUS + 1)
        .collect();
    if snippet.trim().is_empty() {
        None
    } else {
        Some(snippet)
    }
}
