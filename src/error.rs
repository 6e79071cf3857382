//! Failure kinds produced by the mapping pipeline.
//!
//! Anything here aborts the whole run: a partial declaration graph could
//! generate code that compiles but is semantically wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypegenError {
    /// A schema node whose shape matches none of the mapping rules.
    #[error("unsupported schema construct at `{at}`: {detail}")]
    Unsupported { at: String, detail: String },

    /// Strict-mode pointer inference: a field identifier that names neither
    /// a declaration in the collection nor a builtin.
    #[error("field `{field}` of `{decl}` references unknown type `{ident}`")]
    UnresolvedIdent {
        decl: String,
        field: String,
        ident: String,
    },
}
