//! Dedup, pointer inference, and wrapper filtering over the mapped
//! declarations.
//!
//! Runs once, after every input file has been mapped. Field-to-declaration
//! references are names, so the kind index built here must be rebuilt if
//! the collection is ever mutated again.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::decl::{TypeDecl, TypeKind};
use crate::error::TypegenError;

/// Identifiers that never take a pointer marker.
const SIMPLE_IDENTS: [&str; 8] = [
    "string",
    "int",
    "bool",
    "BoolInt",
    "float32",
    "float64",
    "interface{}",
    "decimal.D",
];

/// Wrapper base types that only exist to carry a distinguishing identifier
/// through the mapper; meaningless as standalone declarations.
const SYNTHETIC_WRAPPERS: [&str; 2] = ["PositiveInt", "BooleanInt"];

/// What to do with a field identifier that names neither a declaration in
/// the collection nor a builtin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnresolvedPolicy {
    /// Mark it optional like a struct reference (tolerant default).
    #[default]
    Pointer,
    /// Fail the run.
    Deny,
}

/// Collapse duplicates, star struct-valued fields, drop synthetic wrappers,
/// sort by name.
pub fn post_process(
    decls: Vec<TypeDecl>,
    unresolved: UnresolvedPolicy,
) -> Result<Vec<TypeDecl>, TypegenError> {
    // Pass 1: dedup, first writer wins per name. Shared definitions
    // reachable from several input files land here more than once.
    let mut by_name: IndexMap<String, TypeDecl> = IndexMap::new();
    for decl in decls {
        by_name.entry(decl.name.clone()).or_insert(decl);
    }

    // Pass 2: pointer inference. Struct-valued fields are never embedded by
    // value: recursive schemas would have no finite layout, and "absent"
    // must stay distinguishable from "present but zero". The kind snapshot
    // stays valid because this pass touches field idents only.
    let kinds: HashMap<String, TypeKind> = by_name
        .iter()
        .map(|(name, decl)| (name.clone(), decl.ty.kind))
        .collect();
    for decl in by_name.values_mut() {
        for field in &mut decl.ty.fields {
            if field.ty.kind != TypeKind::Ident {
                continue;
            }
            let star = match kinds.get(&field.ty.ident) {
                Some(kind) => *kind == TypeKind::Struct,
                None if SIMPLE_IDENTS.contains(&field.ty.ident.as_str()) => false,
                None => match unresolved {
                    UnresolvedPolicy::Pointer => true,
                    UnresolvedPolicy::Deny => {
                        return Err(TypegenError::UnresolvedIdent {
                            decl: decl.name.clone(),
                            field: field.name.clone(),
                            ident: field.ty.ident.clone(),
                        });
                    }
                },
            };
            if star {
                field.ty.ident.insert(0, '*');
            }
        }
    }

    // Pass 3: filter synthetic wrappers, then sort for deterministic
    // emission.
    let mut out: Vec<TypeDecl> = by_name
        .into_values()
        .filter(|decl| !SYNTHETIC_WRAPPERS.contains(&decl.name.as_str()))
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(out)
}
