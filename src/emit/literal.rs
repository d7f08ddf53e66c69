//! String literal escaping for the target languages.

use std::fmt::Write;

/// How a control character without a short escape is spelled.
#[derive(Debug, Clone, Copy)]
enum Unicode {
    /// `\u0007` (Python, JavaScript, Go, Java, C#).
    Hex4,
    /// `\u{7}` (Rust, Swift).
    Braced,
}

fn escape(s: &str, quote: char, unicode: Unicode) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = match unicode {
                    Unicode::Hex4 => write!(out, "\\u{:04x}", u32::from(c)),
                    Unicode::Braced => write!(out, "\\u{{{:x}}}", u32::from(c)),
                };
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// `"…"` literal for C-family grammars: Python, JavaScript, Go, Java, C#.
pub(crate) fn double_quoted(s: &str) -> String {
    escape(s, '"', Unicode::Hex4)
}

/// `"…"` literal using `\u{…}` escapes: Rust and Swift.
pub(crate) fn braced_double_quoted(s: &str) -> String {
    escape(s, '"', Unicode::Braced)
}

/// `'…'` literal for languages where single quotes only recognise `\\`
/// and `\'` (PHP, Ruby). Other characters, newlines included, are literal.
pub(crate) fn single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_quoted_escapes_quotes_and_backslashes() {
        assert_eq!(double_quoted(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(double_quoted("l1\nl2\t\r"), r#""l1\nl2\t\r""#);
        assert_eq!(double_quoted("bell\u{7}"), r#""bell\u0007""#);
    }

    #[test]
    fn braced_uses_rust_unicode_escapes() {
        assert_eq!(braced_double_quoted("\u{1b}[0m"), r#""\u{1b}[0m""#);
    }

    #[test]
    fn single_quoted_only_escapes_quote_and_backslash() {
        assert_eq!(single_quoted(r"it's a\b"), r"'it\'s a\\b'");
        assert_eq!(single_quoted("a\"b\nc"), "'a\"b\nc'");
    }

    #[test]
    fn non_ascii_is_kept() {
        assert_eq!(double_quoted("héllo ✓"), "\"héllo ✓\"");
    }
}
