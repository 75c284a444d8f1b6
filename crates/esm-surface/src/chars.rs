//! Character classification.
//!
//! Every predicate operates on raw bytes. Structural JavaScript syntax
//! is ASCII, so multi-byte UTF-8 sequences never match any class here
//! and flow through the scanner as opaque payload. Non-ASCII
//! whitespace (NBSP, U+2028/U+2029) is intentionally not recognized.

/// Line break (`\r` or `\n`).
#[inline]
pub(crate) fn is_br(ch: u8) -> bool {
    ch == b'\r' || ch == b'\n'
}

/// Line break or whitespace.
#[inline]
pub(crate) fn is_br_or_ws(ch: u8) -> bool {
    (ch > 8 && ch < 14) || ch == b' '
}

/// Whitespace that is not a line break.
#[inline]
pub(crate) fn is_ws_not_br(ch: u8) -> bool {
    ch == b'\t' || ch == 11 || ch == 12 || ch == b' '
}

/// One of the punctuator endings `!%&()*+,-./:;<=>?[]^{|}~`.
#[inline]
pub(crate) fn is_punctuator(ch: u8) -> bool {
    ch == b'!'
        || ch == b'%'
        || ch == b'&'
        || (ch > 39 && ch < 48)
        || (ch > 57 && ch < 64)
        || ch == b'['
        || ch == b']'
        || ch == b'^'
        || (ch > 122 && ch < 127)
}

/// Punctuator after which a `/` begins an expression, so a regex
/// rather than division. Excludes the closers `)`, `]`, `}` and `/`
/// itself.
#[inline]
pub(crate) fn is_expression_punctuator(ch: u8) -> bool {
    ch == b'!'
        || ch == b'%'
        || ch == b'&'
        || (ch > 39 && ch < 47 && ch != 41)
        || (ch > 57 && ch < 64)
        || ch == b'['
        || ch == b'^'
        || (ch > 122 && ch < 127 && ch != b'}')
}

/// Line break, whitespace, or any punctuator other than `.`.
#[inline]
pub(crate) fn is_br_or_ws_or_punctuator_not_dot(ch: u8) -> bool {
    is_br_or_ws(ch) || (is_punctuator(ch) && ch != b'.')
}

/// Byte at `pos`, or 0 past the end.
#[inline]
pub(crate) fn at(src: &[u8], pos: usize) -> u8 {
    src.get(pos).copied().unwrap_or(0)
}

/// Whether an identifier starting at `pos` sits at a keyword boundary:
/// start of source, or preceded by whitespace or a punctuator that is
/// not `.`.
#[inline]
pub(crate) fn keyword_start(src: &[u8], pos: usize) -> bool {
    pos == 0 || is_br_or_ws_or_punctuator_not_dot(src[pos - 1])
}

/// Whether `word` occupies the bytes ending at `pos` (inclusive) with
/// a keyword boundary before it.
pub(crate) fn ends_keyword_at(src: &[u8], pos: usize, word: &[u8]) -> bool {
    let len = word.len();
    if pos + 1 < len {
        return false;
    }
    let start = pos + 1 - len;
    src.get(start..start + len) == Some(word)
        && (start == 0 || is_br_or_ws_or_punctuator_not_dot(src[start - 1]))
}

/// Whether the token ending at `pos` is a keyword that forces the next
/// `/` to begin an expression.
pub(crate) fn is_expression_keyword(src: &[u8], pos: usize) -> bool {
    // Dispatch on the final byte, then confirm backwards.
    let words: &[&[u8]] = match at(src, pos) {
        b'd' => &[b"void", b"yield"],
        b'e' => &[b"case", b"delete", b"else"],
        b'f' => &[b"instanceof", b"typeof", b"of"],
        b'n' => &[b"in", b"return"],
        b'o' => &[b"do"],
        b'r' => &[b"debugger"],
        b't' => &[b"await"],
        b'w' => &[b"new", b"throw"],
        _ => return false,
    };
    words.iter().any(|word| ends_keyword_at(src, pos, word))
}

/// Whether the token ending at `pos` is `if`, `for` or `while`, whose
/// parenthesized head is a condition rather than a call.
pub(crate) fn is_paren_keyword(src: &[u8], pos: usize) -> bool {
    let word: &[u8] = match at(src, pos) {
        b'f' => b"if",
        b'r' => b"for",
        b'e' => b"while",
        _ => return false,
    };
    ends_keyword_at(src, pos, word)
}

/// Whether the token ending at `pos` terminates an expression, so a
/// `/` after the block it opened starts a regex: `=>`, `;`, `)`, and
/// the block keywords `catch`, `finally`, `else`.
pub(crate) fn is_expression_terminator(src: &[u8], pos: usize) -> bool {
    match at(src, pos) {
        b';' | b')' => true,
        b'>' => pos > 0 && src[pos - 1] == b'=',
        b'h' => ends_keyword_at(src, pos, b"catch"),
        b'y' => ends_keyword_at(src, pos, b"finally"),
        b'e' => ends_keyword_at(src, pos, b"else"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuators() {
        for ch in b"!%&()*+,-./:;<=>?[]^{|}~" {
            assert!(is_punctuator(*ch), "{} should be a punctuator", *ch as char);
        }
        for ch in b"azAZ09_$#@\"'`\\" {
            assert!(!is_punctuator(*ch), "{} should not match", *ch as char);
        }
    }

    #[test]
    fn test_expression_punctuators_exclude_closers() {
        assert!(is_expression_punctuator(b'='));
        assert!(is_expression_punctuator(b','));
        assert!(is_expression_punctuator(b'{'));
        assert!(!is_expression_punctuator(b')'));
        assert!(!is_expression_punctuator(b']'));
        assert!(!is_expression_punctuator(b'}'));
        assert!(!is_expression_punctuator(b'/'));
    }

    #[test]
    fn test_expression_keywords() {
        let src = b"return";
        assert!(is_expression_keyword(src, 5));
        let src = b"typeof";
        assert!(is_expression_keyword(src, 5));
        let src = b"x instanceof";
        assert!(is_expression_keyword(src, 11));
        // Identifier suffixes do not count.
        let src = b"myreturn";
        assert!(!is_expression_keyword(src, 7));
        // Member access does not count.
        let src = b"a.in";
        assert!(!is_expression_keyword(src, 3));
    }

    #[test]
    fn test_paren_keywords() {
        assert!(is_paren_keyword(b"if", 1));
        assert!(is_paren_keyword(b"x; for", 5));
        assert!(is_paren_keyword(b"while", 4));
        assert!(!is_paren_keyword(b"motif", 4));
        assert!(!is_paren_keyword(b"factor", 5));
    }

    #[test]
    fn test_expression_terminators() {
        assert!(is_expression_terminator(b";", 0));
        assert!(is_expression_terminator(b")", 0));
        assert!(is_expression_terminator(b"=>", 1));
        assert!(is_expression_terminator(b"catch", 4));
        assert!(is_expression_terminator(b"} finally", 8));
        assert!(!is_expression_terminator(b">", 0));
        assert!(!is_expression_terminator(b"patch", 4));
    }

    #[test]
    fn test_keyword_start() {
        let src = b"import x";
        assert!(keyword_start(src, 0));
        let src = b"; import x";
        assert!(keyword_start(src, 2));
        let src = b"a.import";
        assert!(!keyword_start(src, 2));
        let src = b"reimport";
        assert!(!keyword_start(src, 2));
    }
}
