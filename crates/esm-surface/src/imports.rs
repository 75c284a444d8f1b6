//! Import statement recognition.
//!
//! Covers the five shapes: `import ... from "..."`, bare
//! `import "..."`, `import("...")` with an optional second argument,
//! `import(expr)`, and `import.meta` — plus the trailing
//! `assert { ... }` clause of static imports.

use crate::decode::decode_literal;
use crate::error::SyntaxError;
use crate::records::{ImportKind, ImportRecord};
use crate::scanner::{OpenFrame, Scanner};
use crate::span::Span;

impl<'a> Scanner<'a> {
    /// Entered with the cursor on the `i` of `import` at a keyword
    /// boundary. Exits with the cursor on the last consumed byte; the
    /// driver advances past it.
    pub(crate) fn scan_import_statement(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        self.pos += 6;
        let ch = self.comment_whitespace(true);
        match ch {
            b'(' => self.dynamic_import(start),
            b'.' => {
                self.import_meta(start);
                Ok(())
            }
            _ => {
                if self.pos == start + 6 && !matches!(ch, b'"' | b'\'' | b'{' | b'*') {
                    // Identifier such as `imports`; not the keyword.
                    return Ok(());
                }
                if !self.open.is_empty() {
                    // Inside an expression `import` cannot open a
                    // statement; hand the byte back to the driver.
                    self.pos -= 1;
                    return Ok(());
                }
                // Skip the binding clause up to the specifier.
                loop {
                    if self.pos >= self.src.len() {
                        return Err(self.error("unterminated import statement"));
                    }
                    let ch = self.src[self.pos];
                    if ch == b'\'' || ch == b'"' {
                        return self.read_import_specifier(start, ch);
                    }
                    self.pos += 1;
                }
            }
        }
    }

    /// `import(` — record the call site; the argument is scanned by
    /// the driver and the statement end lands when the matching `)`
    /// pops. A string-literal first argument resolves the specifier
    /// here.
    fn dynamic_import(&mut self, start: usize) -> Result<(), SyntaxError> {
        let paren = self.pos;
        self.open.push(OpenFrame {
            token_pos: Some(start),
            class_brace: false,
        });
        if self.last_token_pos.map(|p| self.src[p]) == Some(b'.') {
            // Member access spelled `a. import(...)`.
            return Ok(());
        }
        let index = self.imports.len();
        self.imports.push(ImportRecord {
            statement: Span::empty(start as u32),
            specifier_span: Span::empty(start as u32),
            kind: ImportKind::DynamicCall {
                paren: paren as u32,
            },
            assertion: None,
            specifier: None,
        });
        self.pending_dynamic = Some((index, self.open.len() - 1));
        self.pos += 1;
        let ch = self.comment_whitespace(true);
        if ch == b'\'' || ch == b'"' {
            let spec_start = self.pos + 1;
            self.string_literal(ch)?;
            let spec_end = self.pos;
            {
                let specifier = decode_literal(self.slice(spec_start, spec_end));
                let record = &mut self.imports[index];
                record.specifier_span = Span::new(spec_start as u32, spec_end as u32);
                record.specifier = specifier;
            }
            self.pos += 1;
            let ch = self.comment_whitespace(true);
            if ch == b',' {
                self.pos += 1;
                self.comment_whitespace(true);
                self.imports[index].assertion = Some(self.pos as u32);
            }
        }
        // The unconsumed byte goes back to the driver, which tracks
        // the nesting that closes this call.
        self.pos -= 1;
        Ok(())
    }

    /// `import.meta` — one record spanning the whole expression.
    fn import_meta(&mut self, start: usize) {
        self.pos += 1;
        let ch = self.comment_whitespace(true);
        if ch == b'm'
            && self.src[self.pos..].starts_with(b"meta")
            && self.last_token_pos.map(|p| self.src[p]) != Some(b'.')
        {
            self.imports.push(ImportRecord {
                statement: Span::new(start as u32, (self.pos + 4) as u32),
                specifier_span: Span::empty(start as u32),
                kind: ImportKind::Meta,
                assertion: None,
                specifier: None,
            });
        }
    }

    /// The quoted specifier of a static import, plus an optional
    /// trailing `assert { ... }` clause on the same line.
    fn read_import_specifier(&mut self, start: usize, quote: u8) -> Result<(), SyntaxError> {
        let spec_start = self.pos + 1;
        self.string_literal(quote)?;
        let spec_end = self.pos;
        let index = self.imports.len();
        self.imports.push(ImportRecord {
            statement: Span::new(start as u32, (spec_end + 1) as u32),
            specifier_span: Span::new(spec_start as u32, spec_end as u32),
            kind: ImportKind::Static,
            assertion: None,
            specifier: decode_literal(self.slice(spec_start, spec_end)),
        });
        self.pos += 1;
        let ch = self.comment_whitespace(false);
        if ch != b'a' || !self.src[self.pos..].starts_with(b"assert") {
            self.pos -= 1;
            return Ok(());
        }
        let assert_start = self.pos;
        self.pos += 6;
        let ch = self.comment_whitespace(true);
        if ch != b'{' {
            return self.abandon_assertion(assert_start);
        }
        // assert { key: "value", ... } with identifier or string keys
        // and string values only; any other shape abandons the clause
        // without failing the import.
        loop {
            self.pos += 1;
            let mut ch = self.comment_whitespace(true);
            if ch == b'}' {
                break;
            }
            let key_start = self.pos;
            if ch == b'\'' || ch == b'"' {
                self.string_literal(ch)?;
                self.pos += 1;
            } else {
                self.read_to_ws_or_punctuator(ch);
                if self.pos == key_start {
                    return self.abandon_assertion(assert_start);
                }
            }
            ch = self.comment_whitespace(true);
            if ch != b':' {
                return self.abandon_assertion(assert_start);
            }
            self.pos += 1;
            ch = self.comment_whitespace(true);
            if ch != b'\'' && ch != b'"' {
                return self.abandon_assertion(assert_start);
            }
            self.string_literal(ch)?;
            self.pos += 1;
            ch = self.comment_whitespace(true);
            if ch == b'}' {
                break;
            }
            if ch != b',' {
                return self.abandon_assertion(assert_start);
            }
        }
        let record = &mut self.imports[index];
        record.assertion = Some(assert_start as u32);
        record.statement.end = (self.pos + 1) as u32;
        Ok(())
    }

    /// Rewind out of a malformed assertion clause; the record keeps
    /// its specifier-end statement span and the driver rescans the
    /// clause as ordinary code.
    fn abandon_assertion(&mut self, assert_start: usize) -> Result<(), SyntaxError> {
        self.pos = assert_start - 1;
        Ok(())
    }
}
