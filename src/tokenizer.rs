//! Quote-aware splitting of a shell-style command line.
//!
//! A small subset of POSIX shell word splitting:
//!
//! - unquoted whitespace separates tokens;
//! - `'…'` is literal, `"…"` is literal apart from `\"`, `\\`, `` \` ``
//!   and `\$`;
//! - `$'…'` (ANSI-C quoting, as emitted by browser "copy as cURL") expands
//!   the common backslash escapes;
//! - adjacent quoted and bare segments join into one token, so
//!   `-H'Accept: x'` and `'a'"b"` each yield a single token;
//! - backslash-newline is a line continuation;
//! - an unterminated quote swallows the rest of the input instead of
//!   failing.

use std::iter::Peekable;
use std::str::Chars;

/// Split `input` into tokens with one level of quoting removed.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Distinguishes an empty quoted token (`''`) from no token at all.
    let mut in_token = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                in_token = true;
                read_single_quoted(&mut chars, &mut current);
            }
            '"' => {
                in_token = true;
                read_double_quoted(&mut chars, &mut current);
            }
            '$' if chars.peek() == Some(&'\'') => {
                chars.next();
                in_token = true;
                read_ansi_c_quoted(&mut chars, &mut current);
            }
            '\\' => match chars.next() {
                Some('\n') => flush(&mut tokens, &mut current, &mut in_token),
                Some('\r') if chars.peek() == Some(&'\n') => {
                    chars.next();
                    flush(&mut tokens, &mut current, &mut in_token);
                }
                Some(escaped) => {
                    in_token = true;
                    current.push(escaped);
                }
                None => {
                    in_token = true;
                    current.push('\\');
                }
            },
            c if c.is_whitespace() => flush(&mut tokens, &mut current, &mut in_token),
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }
    flush(&mut tokens, &mut current, &mut in_token);

    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String, in_token: &mut bool) {
    if *in_token {
        tokens.push(std::mem::take(current));
        *in_token = false;
    }
}

fn read_single_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    for c in chars.by_ref() {
        if c == '\'' {
            return;
        }
        out.push(c);
    }
}

fn read_double_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        match c {
            '"' => return,
            '\\' => match chars.peek() {
                Some(&next @ ('"' | '\\' | '`' | '$')) => {
                    chars.next();
                    out.push(next);
                }
                Some('\n') => {
                    chars.next();
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
}

fn read_ansi_c_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        match c {
            '\'' => return,
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some('x') => push_code_point(chars, out, 2, "\\x"),
                Some('u') => push_code_point(chars, out, 4, "\\u"),
                Some('U') => push_code_point(chars, out, 8, "\\U"),
                Some(other) => {
                    if !matches!(other, '\\' | '\'' | '"' | '?') {
                        out.push('\\');
                    }
                    out.push(other);
                }
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
}

/// Read up to `max_digits` hex digits and push the character they name.
/// Malformed escapes are kept verbatim.
fn push_code_point(
    chars: &mut Peekable<Chars<'_>>,
    out: &mut String,
    max_digits: usize,
    prefix: &str,
) {
    let mut digits = String::with_capacity(max_digits);
    while digits.len() < max_digits {
        match chars.peek() {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(*d);
                chars.next();
            }
            _ => break,
        }
    }

    match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
        Some(decoded) => out.push(decoded),
        None => {
            out.push_str(prefix);
            out.push_str(&digits);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            tokenize("curl  -X\tPOST https://x.test"),
            vec!["curl", "-X", "POST", "https://x.test"]
        );
    }

    #[test]
    fn strips_one_level_of_quotes() {
        assert_eq!(
            tokenize(r#"curl -H "Accept: */*" -d '{"a":1}'"#),
            vec!["curl", "-H", "Accept: */*", "-d", r#"{"a":1}"#]
        );
    }

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(tokenize(r#"'a\nb "c"'"#), vec![r#"a\nb "c""#]);
    }

    #[test]
    fn double_quote_escapes() {
        assert_eq!(tokenize(r#""say \"hi\" \\ \n""#), vec![r#"say "hi" \ \n"#]);
    }

    #[test]
    fn adjacent_segments_join() {
        assert_eq!(tokenize(r#"-H'Accept: x' 'a'"b"c"#), vec!["-HAccept: x", "abc"]);
    }

    #[test]
    fn empty_quotes_yield_empty_token() {
        assert_eq!(tokenize("curl -d '' x"), vec!["curl", "-d", "", "x"]);
    }

    #[test]
    fn unterminated_quote_takes_rest_of_input() {
        assert_eq!(
            tokenize(r#"curl -d "abc def"#),
            vec!["curl", "-d", "abc def"]
        );
        assert_eq!(tokenize("curl 'x y"), vec!["curl", "x y"]);
    }

    #[test]
    fn line_continuations_separate_tokens() {
        let input = "curl https://x.test \\\n  -H 'A: b' \\\r\n  -X PUT";
        assert_eq!(
            tokenize(input),
            vec!["curl", "https://x.test", "-H", "A: b", "-X", "PUT"]
        );
    }

    #[test]
    fn ansi_c_quoting() {
        assert_eq!(
            tokenize(r"$'line1\nline2 \x41é it\'s'"),
            vec!["line1\nline2 Aé it's"]
        );
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }
}
