//! Parsing of inlined `key=value` property strings
//!
//! Each inlined entry is parsed as one logical line of the conventional
//! properties-file grammar: the key ends at the first unescaped `=`, `:`
//! or whitespace run, an optional `=`/`:` with surrounding whitespace
//! separates key from value, and backslash escapes (`\t`, `\n`, `\r`,
//! `\f`, `\uXXXX`, escaped separators) apply to both.
//!
//! Inlined entries are strict: each non-blank entry must yield exactly one
//! pair and must contain an explicit `=` or `:` separator. The document
//! parser used for loaded resources is lenient (comments and bare keys are
//! fine there).

use indexmap::IndexMap;

use crate::{Error, Result};

/// Ordered key→value map; insertion order is first-seen key order, later
/// duplicates overwrite the value in place.
pub type InlinedPropertyMap = IndexMap<String, String>;

/// Parse inlined `key=value` entries into an ordered map.
///
/// Blank and whitespace-only entries are skipped. Every other entry must
/// parse to exactly one key/value pair with an explicit `=` or `:`
/// separator; anything else is [`Error::MalformedEntry`].
pub fn parse_inlined_properties<S: AsRef<str>>(entries: &[S]) -> Result<InlinedPropertyMap> {
    let mut map = InlinedPropertyMap::new();
    for entry in entries {
        let entry = entry.as_ref();
        if entry.trim().is_empty() {
            continue;
        }
        let pairs = parse_logical_lines(entry);
        match pairs.as_slice() {
            [] => {
                return Err(Error::MalformedEntry {
                    entry: entry.to_string(),
                    reason: "entry contains no key/value pair".to_string(),
                });
            }
            [pair] => {
                if !pair.explicit_separator {
                    return Err(Error::MalformedEntry {
                        entry: entry.to_string(),
                        reason: "entry has no '=' or ':' separator".to_string(),
                    });
                }
                map.insert(pair.key.clone(), pair.value.clone());
            }
            pairs => {
                return Err(Error::MalformedEntry {
                    entry: entry.to_string(),
                    reason: format!("entry contains {} key/value pairs", pairs.len()),
                });
            }
        }
    }
    Ok(map)
}

/// Parse a whole properties document into an ordered map.
///
/// The full multi-line grammar: `#`/`!` comment lines and blank lines are
/// skipped, a trailing backslash continues a line, and a bare key maps to
/// the empty string. Used for loaded resource content, where none of the
/// single-entry restrictions apply.
pub fn parse_properties_document(text: &str) -> InlinedPropertyMap {
    let mut map = InlinedPropertyMap::new();
    for pair in parse_logical_lines(text) {
        map.insert(pair.key, pair.value);
    }
    map
}

#[derive(Debug)]
struct ParsedPair {
    key: String,
    value: String,
    /// Whether an explicit `=` or `:` separated key from value.
    explicit_separator: bool,
}

/// Split text into logical lines and parse each into a key/value pair.
fn parse_logical_lines(text: &str) -> Vec<ParsedPair> {
    logical_lines(text)
        .iter()
        .map(|line| split_key_value(line))
        .collect()
}

/// Reassemble natural lines into logical lines: leading whitespace is
/// trimmed, comment and blank lines are dropped, and a line ending in an
/// odd number of backslashes continues on the next natural line.
fn logical_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    let mut naturals = normalized.split('\n');

    while let Some(raw) = naturals.next() {
        let line = trim_leading_whitespace(raw);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let mut logical = String::new();
        let mut current = line.to_string();
        while ends_with_odd_backslashes(&current) {
            current.pop();
            logical.push_str(&current);
            current = match naturals.next() {
                Some(next) => trim_leading_whitespace(next).to_string(),
                None => String::new(),
            };
        }
        logical.push_str(&current);
        lines.push(logical);
    }
    lines
}

fn trim_leading_whitespace(line: &str) -> &str {
    line.trim_start_matches([' ', '\t', '\u{c}'])
}

fn ends_with_odd_backslashes(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn is_line_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// Split one logical line into key and value, honoring escapes.
fn split_key_value(line: &str) -> ParsedPair {
    let chars: Vec<char> = line.chars().collect();
    let mut explicit_separator = false;

    // Key ends at the first unescaped separator character.
    let mut key_end = chars.len();
    let mut idx = 0;
    while idx < chars.len() {
        let c = chars[idx];
        if c == '\\' {
            idx += 2;
            continue;
        }
        if c == '=' || c == ':' || is_line_whitespace(c) {
            key_end = idx;
            break;
        }
        idx += 1;
    }
    let key_end = key_end.min(chars.len());
    let key = unescape(&chars[..key_end]);

    // Skip whitespace, at most one '=' or ':', and whitespace after it.
    let mut value_start = key_end;
    if value_start < chars.len() && (chars[value_start] == '=' || chars[value_start] == ':') {
        explicit_separator = true;
        value_start += 1;
    } else {
        while value_start < chars.len() && is_line_whitespace(chars[value_start]) {
            value_start += 1;
        }
        if value_start < chars.len() && (chars[value_start] == '=' || chars[value_start] == ':') {
            explicit_separator = true;
            value_start += 1;
        }
    }
    while value_start < chars.len() && is_line_whitespace(chars[value_start]) {
        value_start += 1;
    }
    let value = unescape(&chars[value_start..]);

    ParsedPair {
        key,
        value,
        explicit_separator,
    }
}

/// Resolve backslash escapes. A malformed `\uXXXX` sequence is kept
/// literally; a trailing lone backslash is dropped.
fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '\\' {
            out.push(c);
            i += 1;
            continue;
        }
        i += 1;
        let Some(&escaped) = chars.get(i) else {
            break;
        };
        match escaped {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{c}'),
            'u' => {
                let hex: String = chars[i + 1..].iter().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        i += 4;
                    }
                    None => out.push('u'),
                }
            }
            other => out.push(other),
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_separator() {
        let map = parse_inlined_properties(&["a=1"]).unwrap();
        assert_eq!(map.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_colon_separator() {
        let map = parse_inlined_properties(&["a:1"]).unwrap();
        assert_eq!(map.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_whitespace_around_separator() {
        let map = parse_inlined_properties(&["b = 2", "  c\t: 3"]).unwrap();
        assert_eq!(map.get("b").map(String::as_str), Some("2"));
        assert_eq!(map.get("c").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_escaped_separator_stays_in_key() {
        let map = parse_inlined_properties(&[r"a\=b=1"]).unwrap();
        assert_eq!(map.get("a=b").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_unicode_escape() {
        let map = parse_inlined_properties(&[r"greeting=caf\u00e9"]).unwrap();
        assert_eq!(map.get("greeting").map(String::as_str), Some("café"));
    }

    #[test]
    fn test_document_admits_bare_key() {
        let map = parse_properties_document("flag\n# note\nx=1\n");
        assert_eq!(map.get("flag").map(String::as_str), Some(""));
        assert_eq!(map.get("x").map(String::as_str), Some("1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_document_line_continuation() {
        let map = parse_properties_document("list=a,\\\n    b,\\\n    c\n");
        assert_eq!(map.get("list").map(String::as_str), Some("a,b,c"));
    }

    #[test]
    fn test_document_preserves_first_seen_order() {
        let map = parse_properties_document("z=1\na=2\nm=3\n");
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
