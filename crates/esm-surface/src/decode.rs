//! String literal decoding.

use std::iter::Peekable;
use std::str::Chars;

/// Decode the body of a JavaScript string literal, quotes excluded.
///
/// Returns `None` when an escape is malformed (bad hex digits, a lone
/// surrogate, an out-of-range code point); callers keep the record but
/// leave the decoded name unresolved.
pub(crate) fn decode_literal(raw: &str) -> Option<String> {
    if !raw.as_bytes().contains(&b'\\') {
        return Some(raw.to_owned());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'x' => out.push(char::from_u32(hex_digits(&mut chars, 2)?)?),
            'u' => out.push(unicode_escape(&mut chars)?),
            '\r' => {
                // Line continuation; \r\n counts as one terminator.
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }
    Some(out)
}

fn unicode_escape(chars: &mut Peekable<Chars<'_>>) -> Option<char> {
    if chars.peek() == Some(&'{') {
        chars.next();
        let mut value: u32 = 0;
        let mut digits = 0;
        loop {
            let ch = chars.next()?;
            if ch == '}' {
                break;
            }
            value = value.checked_mul(16)?.checked_add(ch.to_digit(16)?)?;
            digits += 1;
        }
        if digits == 0 {
            return None;
        }
        return char::from_u32(value);
    }
    let value = hex_digits(chars, 4)?;
    if (0xD800..0xDC00).contains(&value) {
        // High surrogate: a paired \uDC00..\uDFFF must follow.
        if chars.next()? != '\\' || chars.next()? != 'u' {
            return None;
        }
        let low = hex_digits(chars, 4)?;
        if !(0xDC00..0xE000).contains(&low) {
            return None;
        }
        return char::from_u32(0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00));
    }
    if (0xDC00..0xE000).contains(&value) {
        return None;
    }
    char::from_u32(value)
}

fn hex_digits(chars: &mut Peekable<Chars<'_>>, count: usize) -> Option<u32> {
    let mut value = 0;
    for _ in 0..count {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passthrough() {
        assert_eq!(decode_literal("./mod.js").as_deref(), Some("./mod.js"));
        assert_eq!(decode_literal("").as_deref(), Some(""));
    }

    #[test]
    fn test_single_char_escapes() {
        assert_eq!(decode_literal(r"a\nb\tc").as_deref(), Some("a\nb\tc"));
        assert_eq!(decode_literal(r"\'\\\q").as_deref(), Some("'\\q"));
        assert_eq!(decode_literal(r"\0").as_deref(), Some("\0"));
    }

    #[test]
    fn test_hex_and_unicode_escapes() {
        assert_eq!(decode_literal(r"\x41B").as_deref(), Some("AB"));
        assert_eq!(decode_literal(r"\u{1F600}").as_deref(), Some("\u{1F600}"));
        // Surrogate pairs combine.
        assert_eq!(decode_literal("\\uD83D\\uDE00").as_deref(), Some("\u{1F600}"));
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(decode_literal("a\\\nb").as_deref(), Some("ab"));
        assert_eq!(decode_literal("a\\\r\nb").as_deref(), Some("ab"));
    }

    #[test]
    fn test_malformed_escapes() {
        assert_eq!(decode_literal(r"\x4"), None);
        assert_eq!(decode_literal(r"\xzz"), None);
        assert_eq!(decode_literal(r"\u12"), None);
        assert_eq!(decode_literal(r"\u{}"), None);
        assert_eq!(decode_literal(r"\u{110000}"), None);
        // Lone surrogates never decode.
        assert_eq!(decode_literal(r"\uD83D"), None);
        assert_eq!(decode_literal(r"\uDE00"), None);
        // Trailing backslash.
        assert_eq!(decode_literal("a\\"), None);
    }
}
