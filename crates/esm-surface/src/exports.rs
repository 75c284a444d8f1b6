//! Export statement recognition.
//!
//! Covers the six shapes: `export default`, `export
//! [async] function`, `export class`, `export var|let|const`
//! declarator lists, `export { ... } [from]` named lists, and
//! `export * [as name] from` namespace re-exports.

use crate::chars::{is_br_or_ws_or_punctuator_not_dot, is_punctuator};
use crate::decode::decode_literal;
use crate::error::SyntaxError;
use crate::records::ExportRecord;
use crate::scanner::Scanner;
use crate::span::Span;

impl<'a> Scanner<'a> {
    /// Entered with the cursor on the `e` of `export` at a keyword
    /// boundary, top level only. Exits with the cursor on the last
    /// consumed byte; the driver advances past it.
    pub(crate) fn scan_export_statement(&mut self) -> Result<(), SyntaxError> {
        self.pos += 6;
        let cur = self.pos;
        let ch = self.comment_whitespace(true);
        if self.pos == cur && !is_punctuator(ch) {
            // Identifier such as `exports`; not the keyword.
            return Ok(());
        }
        match ch {
            b'd' if self.at_keyword(b"default") => {
                self.facade = false;
                self.exports.push(ExportRecord {
                    name_span: Span::new(self.pos as u32, (self.pos + 7) as u32),
                    local_span: None,
                    name: Some("default".to_owned()),
                    local_name: None,
                });
                Ok(())
            }
            b'a' if self.at_keyword(b"async") => {
                self.facade = false;
                self.pos += 5;
                let ch = self.comment_whitespace(true);
                if ch == b'f' && self.at_keyword(b"function") {
                    self.export_declaration_name(8)
                } else {
                    self.pos -= 1;
                    Ok(())
                }
            }
            b'f' if self.at_keyword(b"function") => {
                self.facade = false;
                self.export_declaration_name(8)
            }
            b'c' if self.at_keyword(b"class") => {
                self.facade = false;
                self.export_declaration_name(5)
            }
            b'v' if self.at_keyword(b"var") => self.export_declarators(3),
            b'l' if self.at_keyword(b"let") => self.export_declarators(3),
            b'c' if self.at_keyword(b"const") => self.export_declarators(5),
            b'{' => self.export_named_list(),
            b'*' => self.export_namespace(),
            _ => {
                self.pos -= 1;
                Ok(())
            }
        }
    }

    /// Whether the bytes at the cursor spell `word` followed by a
    /// keyword boundary.
    fn at_keyword(&self, word: &[u8]) -> bool {
        let end = self.pos + word.len();
        self.src[self.pos..].starts_with(word)
            && (end == self.src.len() || is_br_or_ws_or_punctuator_not_dot(self.src[end]))
    }

    /// The identifier declared by `function` or `class`, exported
    /// under its own name.
    fn export_declaration_name(&mut self, keyword_len: usize) -> Result<(), SyntaxError> {
        self.pos += keyword_len;
        let mut ch = self.comment_whitespace(true);
        if ch == b'*' {
            // Generator.
            self.pos += 1;
            ch = self.comment_whitespace(true);
        }
        let start = self.pos;
        self.read_to_ws_or_punctuator(ch);
        if self.pos > start {
            self.push_local_export(start, self.pos);
        }
        self.pos -= 1;
        Ok(())
    }

    /// `export var|let|const a, b` — bare identifiers only.
    /// Recognition stops at a destructuring pattern or an initializer.
    fn export_declarators(&mut self, keyword_len: usize) -> Result<(), SyntaxError> {
        self.facade = false;
        self.pos += keyword_len - 1;
        loop {
            self.pos += 1;
            let ch = self.comment_whitespace(true);
            let start = self.pos;
            let ch = self.read_to_ws_or_punctuator(ch);
            if ch == b'{' || ch == b'[' || self.pos == start {
                break;
            }
            self.push_local_export(start, self.pos);
            let ch = self.comment_whitespace(true);
            if ch != b',' {
                break;
            }
        }
        self.pos -= 1;
        Ok(())
    }

    /// `export { name [as alias], ... } [from "..."]`. Quoted names
    /// are read with the string scanner.
    fn export_named_list(&mut self) -> Result<(), SyntaxError> {
        let mark = self.exports.len();
        self.pos += 1;
        let mut ch = self.comment_whitespace(true);
        loop {
            if ch == 0 {
                return Err(self.error("unterminated export statement"));
            }
            if ch == b'}' {
                break;
            }
            let (name_start, name_end) = self.read_export_name(ch)?;
            ch = self.comment_whitespace(true);
            if ch == b'a' && self.at_keyword(b"as") {
                self.pos += 2;
                ch = self.comment_whitespace(true);
                let (alias_start, alias_end) = self.read_export_name(ch)?;
                if alias_end == alias_start {
                    return Err(self.error("malformed export list"));
                }
                self.exports.push(ExportRecord {
                    name_span: Span::new(alias_start as u32, alias_end as u32),
                    local_span: Some(Span::new(name_start as u32, name_end as u32)),
                    name: self.export_name(alias_start, alias_end),
                    local_name: self.export_name(name_start, name_end),
                });
                ch = self.comment_whitespace(true);
            } else if name_end > name_start {
                self.exports.push(ExportRecord {
                    name_span: Span::new(name_start as u32, name_end as u32),
                    local_span: Some(Span::new(name_start as u32, name_end as u32)),
                    name: self.export_name(name_start, name_end),
                    local_name: self.export_name(name_start, name_end),
                });
            }
            if ch == b'}' {
                break;
            }
            if ch != b',' {
                return Err(self.error("malformed export list"));
            }
            self.pos += 1;
            ch = self.comment_whitespace(true);
        }
        self.pos += 1;
        let ch = self.comment_whitespace(true);
        self.reexport_clause(mark, ch, false)
    }

    /// `export * from "..."` or `export * as name from "..."`; the
    /// `from` clause is mandatory here.
    fn export_namespace(&mut self) -> Result<(), SyntaxError> {
        let mark = self.exports.len();
        let star = self.pos;
        self.pos += 1;
        let mut ch = self.comment_whitespace(true);
        if ch == b'a' && self.at_keyword(b"as") {
            self.pos += 2;
            ch = self.comment_whitespace(true);
            let (start, end) = self.read_export_name(ch)?;
            if end == start {
                return Err(self.error("expected name after export * as"));
            }
            self.exports.push(ExportRecord {
                name_span: Span::new(start as u32, end as u32),
                local_span: None,
                name: self.export_name(start, end),
                local_name: None,
            });
            ch = self.comment_whitespace(true);
        } else {
            self.exports.push(ExportRecord {
                name_span: Span::new(star as u32, (star + 1) as u32),
                local_span: None,
                name: Some("*".to_owned()),
                local_name: None,
            });
        }
        self.reexport_clause(mark, ch, true)
    }

    /// An optional `from "specifier"` tail. On a re-export the local
    /// bindings belong to the source module and are cleared.
    fn reexport_clause(
        &mut self,
        mark: usize,
        ch: u8,
        required: bool,
    ) -> Result<(), SyntaxError> {
        if !(ch == b'f' && self.src[self.pos..].starts_with(b"from")) {
            if required {
                return Err(self.error("expected from after namespace export"));
            }
            self.pos -= 1;
            return Ok(());
        }
        self.pos += 4;
        let ch = self.comment_whitespace(true);
        if ch != b'\'' && ch != b'"' {
            return Err(self.error("expected re-export specifier"));
        }
        self.string_literal(ch)?;
        for record in &mut self.exports[mark..] {
            record.local_span = None;
            record.local_name = None;
        }
        Ok(())
    }

    /// An export name: identifier or string literal. The returned
    /// span includes the quotes of the string form.
    fn read_export_name(&mut self, ch: u8) -> Result<(usize, usize), SyntaxError> {
        let start = self.pos;
        if ch == b'\'' || ch == b'"' {
            self.string_literal(ch)?;
            self.pos += 1;
        } else {
            self.read_to_ws_or_punctuator(ch);
        }
        Ok((start, self.pos))
    }

    /// Decode the name at a span: raw identifier text, or the decoded
    /// body of a quoted name.
    fn export_name(&self, start: usize, end: usize) -> Option<String> {
        let raw = self.slice(start, end);
        if raw.starts_with('\'') || raw.starts_with('"') {
            decode_literal(&raw[1..raw.len() - 1])
        } else {
            Some(raw.to_owned())
        }
    }

    fn push_local_export(&mut self, start: usize, end: usize) {
        let name = self.slice(start, end).to_owned();
        self.exports.push(ExportRecord {
            name_span: Span::new(start as u32, end as u32),
            local_span: Some(Span::new(start as u32, end as u32)),
            name: Some(name.clone()),
            local_name: Some(name),
        });
    }
}
