//! Typed declaration graph handed to the emitter. No serde_json::Value here.
//!
//! Fields refer to other declarations by name, never by memory pointer:
//! declarations are produced independently per input file and merged later,
//! so cross-references are resolved by lookup in the collection (and must be
//! re-resolved after any mutation of it).

use serde::Serialize;

/// One named output declaration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeDecl {
    pub name: String,
    pub ty: Type,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TypeKind {
    /// A primitive, or a reference to another declaration by name.
    Ident,
    /// Slice of the element named by `ident`.
    Array,
    /// Fields ordered by name; `ident` stays empty.
    Struct,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Type {
    pub kind: TypeKind,
    pub ident: String,
    pub fields: Vec<Field>,
}

impl Type {
    pub fn ident(ident: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Ident,
            ident: ident.into(),
            fields: Vec::new(),
        }
    }

    pub fn array(elem: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Array,
            ident: elem.into(),
            fields: Vec::new(),
        }
    }

    pub fn struct_of(fields: Vec<Field>) -> Self {
        Self {
            kind: TypeKind::Struct,
            ident: String::new(),
            fields,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    pub tags: Vec<Tag>,
}

/// Serialization metadata for one encoding. `name` is the raw schema key,
/// untouched by the name resolver.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tag {
    pub encoding: &'static str,
    pub name: String,
    pub omit_empty: bool,
}

/// The emitter's input: one generated source file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceFile {
    pub package_name: String,
    pub imports: Vec<String>,
    pub decls: Vec<TypeDecl>,
}
