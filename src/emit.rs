//! Go source rendering for the finished declaration graph.
//!
//! Consumes the graph read-only. Struct fields come pre-sorted; the only
//! formatting decision made here is gofmt-style column alignment.

use crate::decl::{Field, SourceFile, Tag, Type, TypeDecl, TypeKind};

#[derive(Default)]
pub struct Emitter {
    out: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit_file(&mut self, file: &SourceFile) {
        self.out.push_str(&format!("package {}\n", file.package_name));
        if !file.imports.is_empty() {
            self.out.push_str("\nimport (\n");
            for import in &file.imports {
                self.out.push_str(&format!("\t\"{import}\"\n"));
            }
            self.out.push_str(")\n");
        }
        for decl in &file.decls {
            self.out.push('\n');
            self.emit_decl(decl);
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn emit_decl(&mut self, decl: &TypeDecl) {
        match decl.ty.kind {
            TypeKind::Ident | TypeKind::Array => {
                self.out
                    .push_str(&format!("type {} {}\n", decl.name, type_expr(&decl.ty)));
            }
            TypeKind::Struct => {
                self.out.push_str(&format!("type {} struct {{\n", decl.name));
                self.emit_fields(&decl.ty.fields);
                self.out.push_str("}\n");
            }
        }
    }

    fn emit_fields(&mut self, fields: &[Field]) {
        let name_width = fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
        let type_width = fields
            .iter()
            .map(|f| type_expr(&f.ty).len())
            .max()
            .unwrap_or(0);
        for field in fields {
            self.out.push_str(&format!(
                "\t{:name_width$} {:type_width$} {}\n",
                field.name,
                type_expr(&field.ty),
                render_tags(&field.tags),
            ));
        }
    }
}

fn type_expr(ty: &Type) -> String {
    match ty.kind {
        TypeKind::Ident => ty.ident.clone(),
        TypeKind::Array => format!("[]{}", ty.ident),
        // unreachable for mapper output; a lone empty struct is still valid
        TypeKind::Struct => "struct{}".to_string(),
    }
}

fn render_tags(tags: &[Tag]) -> String {
    let entries: Vec<String> = tags
        .iter()
        .map(|tag| {
            if tag.omit_empty {
                format!("{}:\"{},omitempty\"", tag.encoding, tag.name)
            } else {
                format!("{}:\"{}\"", tag.encoding, tag.name)
            }
        })
        .collect();
    format!("`{}`", entries.join(" "))
}
