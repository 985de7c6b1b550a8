//! Escaping of string values embedded in log messages

/// Longest string value (in chars) written into a message
pub const DEFAULT_VALUE_LIMIT: usize = 256;

/// Truncate `value` to `limit` chars, then escape it for use inside double
/// quotes. The quotes themselves are not added.
///
/// Quotes and backslashes get a backslash, common control characters use
/// their short escapes, and everything else that is not printable becomes
/// `\uXXXX`.
pub fn escape_quoted(value: &str, limit: usize) -> String {
    let mut out = String::with_capacity(value.len().min(limit) + 8);
    for c in value.chars().take(limit) {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if is_unprintable(c) => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04x}", unit));
                }
            }
            c => out.push(c),
        }
    }
    out
}

fn is_unprintable(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200b}'..='\u{200f}' | '\u{2028}' | '\u{2029}' | '\u{202a}'..='\u{202e}' | '\u{feff}'
        )
}
