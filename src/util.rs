//! Small text helpers shared by the front end and the emitters.

use std::fmt::Write;

/// Maps byte offsets to 1-based line and column numbers.
///
/// Columns count characters, not bytes, so they line up with what an
/// editor shows for non-ASCII source.
#[derive(Debug, Clone)]
pub struct LineIndex<'s> {
    source: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| i + 1));
        Self {
            source,
            line_starts,
        }
    }

    /// `(line, column)` for a byte offset, both 1-based.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let column = self
            .source
            .get(start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(offset - start);
        (line + 1, column + 1)
    }

    /// Byte offset of the start of the line containing `offset`.
    pub fn line_start(&self, offset: usize) -> usize {
        let (line, _) = self.line_col(offset);
        self.line_starts[line - 1]
    }
}

/// Format a number the way JavaScript's `String(n)` does for the values
/// that show up in style definitions.
pub fn js_number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // also covers -0
        return "0".to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{n}");
    }
    // Exponent form, with an explicit `+` on positive exponents.
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// Double-quoted JavaScript string literal.
pub fn quote_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Object key as it should appear in emitted JavaScript: bare when it is a
/// valid identifier or a canonical integer, single-quoted otherwise.
pub fn js_object_key(key: &str) -> String {
    if is_identifier_name(key) || is_canonical_integer(key) {
        return key.to_string();
    }
    let mut out = String::with_capacity(key.len() + 2);
    out.push('\'');
    for c in key.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

pub fn is_identifier_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn is_canonical_integer(s: &str) -> bool {
    s == "0" || (!s.starts_with('0') && !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
}

/// Trim and collapse internal whitespace runs to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Encode a number in lowercase base 36.
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

/// camelCase (with optional vendor prefix) to kebab-case:
/// `marginBlockStart` → `margin-block-start`, `WebkitAppearance` →
/// `-webkit-appearance`, `msFlex` → `-ms-flex`.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    if key.starts_with("ms") && key[2..].starts_with(|c: char| c.is_ascii_uppercase()) {
        out.push('-');
    }
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index() {
        let source = "ab\ncd\n\nef";
        let index = LineIndex::new(source);
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(4), (2, 2));
        assert_eq!(index.line_col(6), (3, 1));
        assert_eq!(index.line_col(8), (4, 2));
        assert_eq!(index.line_start(4), 3);
    }

    #[test]
    fn test_js_number_to_string() {
        assert_eq!(js_number_to_string(2.0), "2");
        assert_eq!(js_number_to_string(2.5), "2.5");
        assert_eq!(js_number_to_string(-1.0), "-1");
        assert_eq!(js_number_to_string(-0.0), "0");
        assert_eq!(js_number_to_string(0.1), "0.1");
        assert_eq!(js_number_to_string(1e20), "100000000000000000000");
        assert_eq!(js_number_to_string(1e21), "1e+21");
        assert_eq!(js_number_to_string(-2.5e30), "-2.5e+30");
        assert_eq!(js_number_to_string(0.000001), "0.000001");
        assert_eq!(js_number_to_string(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_js_object_key() {
        assert_eq!(js_object_key("default"), "default");
        assert_eq!(js_object_key("0"), "0");
        assert_eq!(js_object_key(":hover"), "':hover'");
        assert_eq!(js_object_key("default-1"), "'default-1'");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("marginBlockStart"), "margin-block-start");
        assert_eq!(kebab_case("WebkitFontSmoothing"), "-webkit-font-smoothing");
        assert_eq!(kebab_case("MozOsxFontSmoothing"), "-moz-osx-font-smoothing");
        assert_eq!(kebab_case("msFlex"), "-ms-flex");
        assert_eq!(kebab_case("opacity"), "opacity");
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
