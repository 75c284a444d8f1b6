//! Scanner state and driver.
//!
//! One forward pass over the raw bytes. The driver dispatches on the
//! byte under the cursor; strings, comments, templates and regex
//! literals are consumed by bounded sub-scans so their contents never
//! reach the dispatch loop. Bracket and template nesting is tracked
//! with growable stacks of [`OpenFrame`]s.
//!
//! The scan runs in two phases. The facade phase accepts only
//! import/export statements, semicolons, whitespace and comments at
//! the top level; the first byte that breaks that shape clears the
//! facade flag and hands the same position to the full scan, which
//! tracks nesting and still recognizes `import` anywhere and `export`
//! at the top level.

use crate::chars::{at, is_br, is_br_or_ws, is_punctuator, is_ws_not_br, keyword_start};
use crate::chars::{
    is_expression_keyword, is_expression_punctuator, is_expression_terminator, is_paren_keyword,
};
use crate::error::SyntaxError;
use crate::records::{ExportRecord, ImportRecord, ModuleSurface};

/// A currently open `(`, `{` or `${`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenFrame {
    /// Position of the significant token immediately before the
    /// opener; `None` when the opener is the first token.
    pub(crate) token_pos: Option<usize>,
    /// Whether this `{` opens a class body.
    pub(crate) class_brace: bool,
}

pub(crate) struct Scanner<'a> {
    pub(crate) src: &'a [u8],
    pub(crate) pos: usize,
    /// Open `(`/`{`/`${` frames; nesting depth is `open.len()`.
    pub(crate) open: Vec<OpenFrame>,
    /// The frame most recently popped, consulted when a `/` follows a
    /// `)` or `}`.
    pub(crate) last_closed: OpenFrame,
    /// Depth whose closing `}` resumes the innermost template.
    pub(crate) template_depth: Option<usize>,
    /// Template depths of enclosing interpolations.
    pub(crate) template_stack: Vec<Option<usize>>,
    /// Position of the previous significant token.
    pub(crate) last_token_pos: Option<usize>,
    /// Whether the previous lone `/` was division rather than a regex.
    pub(crate) last_slash_was_division: bool,
    /// Set by the `class` keyword, consumed by the next `{`.
    pub(crate) next_brace_is_class: bool,
    /// Record index of the unclosed dynamic import, with the nesting
    /// depth its argument list opened at.
    pub(crate) pending_dynamic: Option<(usize, usize)>,
    pub(crate) facade: bool,
    pub(crate) imports: Vec<ImportRecord>,
    pub(crate) exports: Vec<ExportRecord>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
            open: Vec::new(),
            last_closed: OpenFrame {
                token_pos: None,
                class_brace: false,
            },
            template_depth: None,
            template_stack: Vec::new(),
            last_token_pos: None,
            last_slash_was_division: false,
            next_brace_is_class: false,
            pending_dynamic: None,
            facade: true,
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub(crate) fn scan(mut self) -> Result<ModuleSurface, SyntaxError> {
        self.skip_shebang();
        if self.scan_facade_prefix()? {
            self.scan_body()?;
        }
        if self.template_depth.is_some() {
            return Err(self.error("unterminated template"));
        }
        if !self.open.is_empty() {
            return Err(self.error("unterminated bracket"));
        }
        Ok(ModuleSurface {
            imports: self.imports,
            exports: self.exports,
            facade: self.facade,
        })
    }

    fn skip_shebang(&mut self) {
        if self.src.starts_with(b"#!") {
            self.pos = 2;
            while self.pos < self.src.len() && !is_br(self.src[self.pos]) {
                self.pos += 1;
            }
        }
    }

    /// Facade phase. Returns true when a non-facade byte was hit and
    /// the full scan must take over from the current position.
    fn scan_facade_prefix(&mut self) -> Result<bool, SyntaxError> {
        while self.pos < self.src.len() {
            let ch = self.src[self.pos];
            if is_br_or_ws(ch) {
                self.pos += 1;
                continue;
            }
            match ch {
                b'e' if self.open.is_empty()
                    && keyword_start(self.src, self.pos)
                    && self.src[self.pos..].starts_with(b"export") =>
                {
                    self.scan_export_statement()?;
                    if !self.facade {
                        // The export carried a declaration; the full
                        // scan picks up right after it.
                        self.last_token_pos = Some(self.pos);
                        self.pos += 1;
                        return Ok(true);
                    }
                }
                b'i' if keyword_start(self.src, self.pos)
                    && self.src[self.pos..].starts_with(b"import") =>
                {
                    self.scan_import_statement()?;
                }
                b';' => {}
                b'/' if at(self.src, self.pos + 1) == b'/' => {
                    self.line_comment();
                    self.pos += 1;
                    continue;
                }
                b'/' if at(self.src, self.pos + 1) == b'*' => {
                    self.block_comment(true);
                    self.pos += 1;
                    continue;
                }
                _ => {
                    self.facade = false;
                    return Ok(true);
                }
            }
            self.last_token_pos = Some(self.pos);
            self.pos += 1;
        }
        Ok(false)
    }

    /// Full scan from the current position to end of input.
    fn scan_body(&mut self) -> Result<(), SyntaxError> {
        while self.pos < self.src.len() {
            let ch = self.src[self.pos];
            if is_br_or_ws(ch) {
                self.pos += 1;
                continue;
            }
            match ch {
                b'e' if self.open.is_empty()
                    && keyword_start(self.src, self.pos)
                    && self.src[self.pos..].starts_with(b"export") =>
                {
                    self.scan_export_statement()?;
                }
                b'i' if keyword_start(self.src, self.pos)
                    && self.src[self.pos..].starts_with(b"import") =>
                {
                    self.scan_import_statement()?;
                }
                b'c' if keyword_start(self.src, self.pos)
                    && self.src[self.pos..].starts_with(b"class")
                    && is_br_or_ws(at(self.src, self.pos + 5)) =>
                {
                    self.next_brace_is_class = true;
                }
                b'(' => {
                    self.open.push(OpenFrame {
                        token_pos: self.last_token_pos,
                        class_brace: false,
                    });
                }
                b')' => {
                    let frame = self
                        .open
                        .pop()
                        .ok_or_else(|| self.error("unexpected closing paren"))?;
                    self.last_closed = frame;
                    if let Some((index, depth)) = self.pending_dynamic {
                        if depth == self.open.len() {
                            self.imports[index].statement.end = self.pos as u32 + 1;
                            self.pending_dynamic = None;
                        }
                    }
                }
                b'{' => {
                    self.open.push(OpenFrame {
                        token_pos: self.last_token_pos,
                        class_brace: self.next_brace_is_class,
                    });
                    self.next_brace_is_class = false;
                }
                b'}' => {
                    if Some(self.open.len()) == self.template_depth {
                        // Closes a `${`; resume the template body.
                        self.open.pop();
                        self.template_depth = self.template_stack.pop().flatten();
                        self.template_string()?;
                    } else {
                        let frame = self
                            .open
                            .pop()
                            .ok_or_else(|| self.error("unexpected closing brace"))?;
                        self.last_closed = frame;
                        if let Some(depth) = self.template_depth {
                            if self.open.len() < depth {
                                return Err(self.error("unexpected closing brace"));
                            }
                        }
                    }
                }
                b'\'' | b'"' => self.string_literal(ch)?,
                b'`' => self.template_string()?,
                b'/' => match at(self.src, self.pos + 1) {
                    b'/' => {
                        self.line_comment();
                        self.pos += 1;
                        continue;
                    }
                    b'*' => {
                        self.block_comment(true);
                        self.pos += 1;
                        continue;
                    }
                    _ => self.scan_slash()?,
                },
                _ => {}
            }
            self.last_token_pos = Some(self.pos);
            self.pos += 1;
        }
        Ok(())
    }

    /// A `/` that opens no comment: regex literal or division, decided
    /// by the class of the previous significant token.
    fn scan_slash(&mut self) -> Result<(), SyntaxError> {
        let regex = match self.last_token_pos {
            // Start of input is start of expression.
            None => true,
            Some(last) => {
                let token = self.src[last];
                let prev = if last > 0 { self.src[last - 1] } else { 0 };
                if is_expression_punctuator(token)
                    && !(token == b'.' && prev.is_ascii_digit())
                    && !(token == b'+' && prev == b'+')
                    && !(token == b'-' && prev == b'-')
                {
                    true
                } else if token == b')' {
                    // A condition head as in `if (x) /re/`.
                    self.last_closed
                        .token_pos
                        .is_some_and(|p| is_paren_keyword(self.src, p))
                } else if token == b'}' {
                    // A block or class body, not an object literal.
                    self.last_closed.class_brace
                        || self
                            .last_closed
                            .token_pos
                            .is_some_and(|p| is_expression_terminator(self.src, p))
                } else if token == b'/' {
                    self.last_slash_was_division
                } else {
                    is_expression_keyword(self.src, last)
                }
            }
        };
        if regex {
            self.regular_expression()?;
            self.last_slash_was_division = false;
        } else {
            self.last_slash_was_division = true;
        }
        Ok(())
    }

    /// Consume a string literal. Entered at the opening quote; exits
    /// at the closing quote. A bare line break inside is an error.
    pub(crate) fn string_literal(&mut self, quote: u8) -> Result<(), SyntaxError> {
        loop {
            self.pos += 1;
            if self.pos >= self.src.len() {
                break;
            }
            let ch = self.src[self.pos];
            if ch == quote {
                return Ok(());
            }
            if ch == b'\\' {
                self.pos += 1;
                if at(self.src, self.pos) == b'\r' && at(self.src, self.pos + 1) == b'\n' {
                    self.pos += 1;
                }
            } else if is_br(ch) {
                break;
            }
        }
        Err(self.error("unterminated string"))
    }

    /// Consume template characters. Entered at the backtick or at the
    /// `}` closing an interpolation; exits at the closing backtick, or
    /// at the `{` of a `${` with the interpolation frame pushed.
    pub(crate) fn template_string(&mut self) -> Result<(), SyntaxError> {
        loop {
            self.pos += 1;
            if self.pos >= self.src.len() {
                break;
            }
            let ch = self.src[self.pos];
            if ch == b'$' && at(self.src, self.pos + 1) == b'{' {
                self.pos += 1;
                self.template_stack.push(self.template_depth);
                self.open.push(OpenFrame {
                    token_pos: self.last_token_pos,
                    class_brace: false,
                });
                self.template_depth = Some(self.open.len());
                return Ok(());
            }
            if ch == b'`' {
                return Ok(());
            }
            if ch == b'\\' {
                self.pos += 1;
            }
        }
        Err(self.error("unterminated template"))
    }

    /// Consume a regex literal. Entered at the opening `/`; exits at
    /// the closing `/` (flags are left to the driver).
    fn regular_expression(&mut self) -> Result<(), SyntaxError> {
        loop {
            self.pos += 1;
            if self.pos >= self.src.len() {
                break;
            }
            let ch = self.src[self.pos];
            if ch == b'/' {
                return Ok(());
            }
            if ch == b'[' {
                self.regex_character_class()?;
            } else if ch == b'\\' {
                self.pos += 1;
            } else if is_br(ch) {
                break;
            }
        }
        Err(self.error("unterminated regular expression"))
    }

    /// Consume a `[...]` class inside a regex, where `/` is literal.
    fn regex_character_class(&mut self) -> Result<(), SyntaxError> {
        loop {
            self.pos += 1;
            if self.pos >= self.src.len() {
                break;
            }
            let ch = self.src[self.pos];
            if ch == b']' {
                return Ok(());
            }
            if ch == b'\\' {
                self.pos += 1;
            } else if is_br(ch) {
                break;
            }
        }
        Err(self.error("unterminated regular expression class"))
    }

    /// Consume a line comment; exits at the terminating line break or
    /// end of input.
    pub(crate) fn line_comment(&mut self) {
        loop {
            self.pos += 1;
            if self.pos >= self.src.len() || is_br(self.src[self.pos]) {
                return;
            }
        }
    }

    /// Consume a block comment; exits at the `/` of the closing `*/`.
    /// With `br` false the scan stops at the first line break instead,
    /// leaving the comment unconsumed.
    pub(crate) fn block_comment(&mut self, br: bool) {
        self.pos += 1;
        loop {
            self.pos += 1;
            if self.pos >= self.src.len() {
                return;
            }
            let ch = self.src[self.pos];
            if !br && is_br(ch) {
                return;
            }
            if ch == b'*' && at(self.src, self.pos + 1) == b'/' {
                self.pos += 1;
                return;
            }
        }
    }

    /// Skip whitespace and comments; `br` controls whether line breaks
    /// and multi-line block comments may be crossed. Returns the byte
    /// at the resulting position, 0 at end of input.
    pub(crate) fn comment_whitespace(&mut self, br: bool) -> u8 {
        while self.pos < self.src.len() {
            let ch = self.src[self.pos];
            if ch == b'/' {
                match at(self.src, self.pos + 1) {
                    b'/' => self.line_comment(),
                    b'*' => self.block_comment(br),
                    _ => return ch,
                }
            } else {
                let ws = if br {
                    is_br_or_ws(ch)
                } else {
                    is_ws_not_br(ch)
                };
                if !ws {
                    return ch;
                }
            }
            self.pos += 1;
        }
        0
    }

    /// Advance over identifier characters starting from `ch` at the
    /// cursor; exits at the first whitespace or punctuator (which is
    /// returned, 0 at end of input).
    pub(crate) fn read_to_ws_or_punctuator(&mut self, mut ch: u8) -> u8 {
        loop {
            if self.pos >= self.src.len() {
                return 0;
            }
            if is_br_or_ws(ch) || is_punctuator(ch) {
                return ch;
            }
            self.pos += 1;
            if self.pos >= self.src.len() {
                return 0;
            }
            ch = self.src[self.pos];
        }
    }

    /// Slice the source between two scan positions.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        // Safety: scan positions always sit on ASCII structural bytes,
        // which are char boundaries in valid UTF-8.
        unsafe { std::str::from_utf8_unchecked(&self.src[start..end]) }
    }

    pub(crate) fn error(&self, message: &'static str) -> SyntaxError {
        SyntaxError::new(message, self.pos, self.src)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn test_empty_and_trivial_sources() {
        let surface = parse("").unwrap();
        assert!(surface.imports.is_empty());
        assert!(surface.exports.is_empty());
        assert!(surface.facade);

        let surface = parse("// nothing here\n").unwrap();
        assert!(surface.facade);

        let surface = parse("const x = 1;").unwrap();
        assert!(!surface.facade);
        assert!(surface.imports.is_empty());
    }

    #[test]
    fn test_shebang_is_skipped() {
        let surface = parse("#!/usr/bin/env node\nimport 'a';\n").unwrap();
        assert_eq!(surface.imports.len(), 1);
        assert_eq!(surface.imports[0].specifier.as_deref(), Some("a"));
    }

    #[test]
    fn test_strings_hide_keywords() {
        let surface = parse(r#"const s = "import 'fake'"; let t = 'export {}';"#).unwrap();
        assert!(surface.imports.is_empty());
        assert!(surface.exports.is_empty());
    }

    #[test]
    fn test_comments_hide_keywords() {
        let source = "// import 'a'\n/* export { b } */\nlet x = 1;\n";
        let surface = parse(source).unwrap();
        assert!(surface.imports.is_empty());
        assert!(surface.exports.is_empty());
    }

    #[test]
    fn test_template_interpolation_nesting() {
        let source = "const s = `a${ {b: 1}.b }c${`inner${d}`}e`;\nimport 'real';\n";
        let surface = parse(source).unwrap();
        assert_eq!(surface.imports.len(), 1);
        assert_eq!(surface.imports[0].specifier.as_deref(), Some("real"));
    }

    #[test]
    fn test_template_hides_import() {
        let surface = parse("const s = `import 'fake'`;").unwrap();
        assert!(surface.imports.is_empty());
    }

    #[test]
    fn test_division_chain() {
        let surface = parse("const x = 1 / 2 / 3;\nimport 'a';\n").unwrap();
        assert_eq!(surface.imports.len(), 1);
    }

    #[test]
    fn test_regex_after_paren_keyword() {
        // Misclassifying the regex as division would surface the fake
        // import inside it.
        let source = "if (x) /import 'fake'/.test(y);\nimport 'real';\n";
        let surface = parse(source).unwrap();
        assert_eq!(surface.imports.len(), 1);
        assert_eq!(surface.imports[0].specifier.as_deref(), Some("real"));
    }

    #[test]
    fn test_division_after_call() {
        let surface = parse("const x = arr.reduce(fn) / 2;\nimport 'a';\n").unwrap();
        assert_eq!(surface.imports.len(), 1);
    }

    #[test]
    fn test_regex_after_class_body() {
        let source = "class A { m() { return 1; } }\n/import 'fake'/.test(s);\nimport 'real';\n";
        let surface = parse(source).unwrap();
        assert_eq!(surface.imports.len(), 1);
        assert_eq!(surface.imports[0].specifier.as_deref(), Some("real"));
    }

    #[test]
    fn test_regex_character_class() {
        let surface = parse("const re = /[/]/; import 'a';").unwrap();
        assert_eq!(surface.imports.len(), 1);
    }

    #[test]
    fn test_unbalanced_brackets_error() {
        assert!(parse("function f() {").is_err());
        assert!(parse("}").is_err());
        assert!(parse("const x = (1;").is_err());
    }

    #[test]
    fn test_unterminated_template_error() {
        assert!(parse("const s = `a${b").is_err());
        assert!(parse("const s = `abc").is_err());
    }

    #[test]
    fn test_unterminated_string_error() {
        let err = parse("const s = 'abc\ndef';").unwrap_err();
        assert_eq!(err.message, "unterminated string");
        assert_eq!(err.line, 1);
    }
}
