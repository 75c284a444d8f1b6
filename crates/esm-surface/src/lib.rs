//! Single-pass scanner for the import/export surface of JavaScript
//! and TypeScript modules.
//!
//! One forward pass over the raw bytes extracts every static import
//! statement, dynamic `import(...)` site, `import.meta` use and
//! exported binding, plus a *facade* flag that is true when the module
//! only re-shapes other modules. No AST is built: brackets, braces and
//! template interpolations are tracked with depth stacks, and a lone
//! `/` is classified as regex or division by looking back at the
//! previous significant token, the way a real lexer does it.
//!
//! Module resolution, dependency graphs and file I/O are out of
//! scope; this crate only reports what a module binds and where.
//!
//! # Example
//!
//! ```
//! let surface = esm_surface::parse(
//!     "import { render } from './render.js';\nexport { render };",
//! )?;
//! assert_eq!(surface.imports[0].specifier.as_deref(), Some("./render.js"));
//! assert_eq!(surface.exports[0].name.as_deref(), Some("render"));
//! assert!(surface.facade);
//! # Ok::<(), esm_surface::SyntaxError>(())
//! ```

mod chars;
mod decode;
mod error;
mod records;
mod scanner;
mod span;

// Statement recognizers, split off the scanner core.
mod exports;
mod imports;

pub use error::SyntaxError;
pub use records::{ExportRecord, ImportKind, ImportRecord, ModuleSurface};
pub use span::{LineIndex, Span};

use scanner::Scanner;

/// Scan a module and return its import/export surface.
///
/// The scan is synchronous and allocates only for the output records;
/// it fails with the single [`SyntaxError`] kind when the source
/// violates a structural invariant.
pub fn parse(source: &str) -> Result<ModuleSurface, SyntaxError> {
    let surface = Scanner::new(source).scan()?;
    tracing::trace!(
        bytes = source.len(),
        imports = surface.imports.len(),
        exports = surface.exports.len(),
        facade = surface.facade,
        "scanned module surface"
    );
    Ok(surface)
}

/// Scan a module, attaching `module` to any error for diagnostics.
pub fn parse_named(source: &str, module: &str) -> Result<ModuleSurface, SyntaxError> {
    parse(source).map_err(|err| err.with_module(module))
}
