//! Delimiter-safe escaping for snapshot fields
//!
//! | Character | Token |
//! |-----------|-------|
//! | `\`       | `\\`  |
//! | `|`       | `\|`  |
//! | LF        | `\n`  |
//! | CR        | `\r`  |
//!
//! [`unescape`] walks the token left to right and lets every backslash
//! consume exactly one following character, so `unescape(escape(s)) == s`
//! for every `s`, including a literal backslash followed by `n`.

/// Field delimiter of the snapshot format
pub const FIELD_DELIMITER: char = '|';

/// Escape character of the snapshot format
pub const ESCAPE_CHAR: char = '\\';

/// Encode `text` so it contains no raw delimiter or line break
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ESCAPE_CHAR => out.push_str("\\\\"),
            FIELD_DELIMITER => out.push_str("\\|"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Decode a token produced by [`escape`]
///
/// Unknown escape pairs and a trailing lone backslash are kept as-is.
pub fn unescape(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != ESCAPE_CHAR {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(FIELD_DELIMITER) => out.push(FIELD_DELIMITER),
            Some(ESCAPE_CHAR) => out.push(ESCAPE_CHAR),
            Some(other) => {
                out.push(ESCAPE_CHAR);
                out.push(other);
            }
            None => out.push(ESCAPE_CHAR),
        }
    }
    out
}

/// Split a snapshot line on unescaped delimiters
///
/// Fields are returned still escaped. Empty fields, trailing ones included,
/// are preserved: `"A|x||"` yields `["A", "x", "", ""]`.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            ESCAPE_CHAR => escaped = true,
            FIELD_DELIMITER => {
                fields.push(&line[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);
    fields
}

/// Join already-escaped fields with the delimiter
pub fn join_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    let mut line = String::new();
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            line.push(FIELD_DELIMITER);
        }
        line.push_str(field);
    }
    line
}
