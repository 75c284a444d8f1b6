//! Output records.
//!
//! One scan produces a [`ModuleSurface`]: the import sites, the export
//! bindings, and whether the module is a facade. All spans are byte
//! offsets into the scanned source.

use crate::span::Span;

/// How an import site was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImportKind {
    /// `import ... from "..."` or a bare `import "..."`.
    Static,
    /// `import(...)`. `paren` is the byte offset of the opening `(`.
    DynamicCall { paren: u32 },
    /// `import.meta`.
    Meta,
}

impl ImportKind {
    /// Whether this is a dynamic `import(...)` call.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ImportKind::DynamicCall { .. })
    }
}

/// One import site.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportRecord {
    /// The statement, from the `import` keyword to the end of the
    /// specifier (assertion clause included when present). For a
    /// dynamic import the end is just past the closing `)`.
    pub statement: Span,
    /// The specifier, quotes excluded. When a dynamic import's
    /// argument is not a string literal this collapses to the
    /// statement start.
    pub specifier_span: Span,
    /// The shape of the import.
    pub kind: ImportKind,
    /// Offset of an `assert { ... }` clause, or of the second argument
    /// of a dynamic import.
    pub assertion: Option<u32>,
    /// The decoded specifier, when statically known.
    pub specifier: Option<String>,
}

/// One exported binding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportRecord {
    /// Span of the exported name. Quoted names include the quotes.
    pub name_span: Span,
    /// Span of the local binding. Absent for `export default`,
    /// namespace exports, and every entry of a re-export clause.
    pub local_span: Option<Span>,
    /// The decoded exported name.
    pub name: Option<String>,
    /// The decoded local name. Present iff `local_span` is.
    pub local_name: Option<String>,
}

/// Everything one scan extracts from a module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleSurface {
    /// Import sites in source order.
    pub imports: Vec<ImportRecord>,
    /// Export bindings in source order.
    pub exports: Vec<ExportRecord>,
    /// True when the module consists solely of import/export
    /// statements, whitespace and comments at the top level, so it
    /// only re-shapes other modules.
    pub facade: bool,
}
