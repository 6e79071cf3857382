//! Recursive-descent mapping from schema nodes to type declarations.
//!
//! One schema document yields its own declaration followed, pre-order, by
//! one declaration per `definitions` entry. Mapping never produces a
//! partial result: any unsupported shape is an error for the caller.

use crate::decl::{Field, Tag, Type, TypeDecl, TypeKind};
use crate::error::TypegenError;
use crate::name::NameMap;
use crate::schema::{Schema, TypeField};

const DEF_PREFIX: &str = "#/definitions/";

/// Encodings every field gets a tag entry for.
const TAG_ENCODINGS: [&str; 2] = ["json", "yaml"];

pub struct Mapper {
    names: NameMap,
}

impl Mapper {
    pub fn new(names: NameMap) -> Self {
        Self { names }
    }

    /// Map one schema document (or one `definitions` entry) to declarations.
    ///
    /// A node with properties becomes a struct declaration; a node with no
    /// properties and a primitive `type` becomes a plain alias declaration
    /// (the shape schema-level base types like `positive_int` use). Anything
    /// else is unsupported.
    pub fn map_schema(&self, id: &str, s: &Schema) -> Result<Vec<TypeDecl>, TypegenError> {
        if s.properties.is_empty() {
            let Some(typ) = s.type_.as_ref().and_then(TypeField::as_single) else {
                return Err(TypegenError::Unsupported {
                    at: id.to_string(),
                    detail: "no properties and no single primitive type".to_string(),
                });
            };
            return Ok(vec![TypeDecl {
                name: self.names.resolve(id),
                ty: self.ident_type(id, typ),
            }]);
        }

        let mut fields = Vec::with_capacity(s.properties.len());
        for (prop_name, prop) in &s.properties {
            fields.push(Field {
                name: self.names.resolve(prop_name),
                ty: self.map_type(prop_name, prop)?,
                tags: field_tags(prop_name),
            });
        }
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        let mut decls = vec![TypeDecl {
            name: self.names.resolve(id),
            ty: Type::struct_of(fields),
        }];
        for (def_name, def) in &s.definitions {
            decls.extend(self.map_schema(def_name, def)?);
        }
        Ok(decls)
    }

    /// Map a property schema to its field type. `name` is the raw schema
    /// key; number mapping keys off it for the decimal heuristic.
    pub fn map_type(&self, name: &str, s: &Schema) -> Result<Type, TypegenError> {
        match s.type_.as_ref().and_then(TypeField::as_single) {
            Some(typ @ ("string" | "integer" | "number")) => {
                return Ok(self.ident_type(name, typ));
            }
            Some("array") => {
                let Some(items) = s.items.as_deref() else {
                    return Err(TypegenError::Unsupported {
                        at: name.to_string(),
                        detail: "array without items".to_string(),
                    });
                };
                let elem = self.map_type(name, items)?;
                if elem.kind == TypeKind::Ident {
                    return Ok(Type::array(elem.ident));
                }
                return Err(TypegenError::Unsupported {
                    at: name.to_string(),
                    detail: "array items do not reduce to a plain identifier".to_string(),
                });
            }
            // Bare object with no further structure: the escape hatch.
            Some("object") => return Ok(Type::ident("interface{}")),
            _ => {}
        }
        if let Some(reference) = s.ref_.as_deref() {
            return match reference.strip_prefix(DEF_PREFIX) {
                Some(def_name) => Ok(self.ident_type(name, def_name)),
                None => Err(TypegenError::Unsupported {
                    at: name.to_string(),
                    detail: format!("reference `{reference}` outside {DEF_PREFIX}"),
                }),
            };
        }
        Err(TypegenError::Unsupported {
            at: name.to_string(),
            detail: "no mapping rule matches this node".to_string(),
        })
    }

    /// Identifier table shared by primitive types, schema-level aliases, and
    /// local references. Unknown names are named-type references and go
    /// through the resolver.
    fn ident_type(&self, name: &str, typ: &str) -> Type {
        let ident = match typ {
            "string" => "string".to_string(),
            "integer" | "positive_int" => "int".to_string(),
            // wire representation is 0/1, not true/false
            "boolean_int" => "BoolInt".to_string(),
            "number" => {
                let name = name.to_lowercase();
                if ["price", "floor", "ratio"].iter().any(|k| name.contains(k)) {
                    "decimal.D".to_string()
                } else {
                    "float64".to_string()
                }
            }
            other => self.names.resolve(other),
        };
        Type::ident(ident)
    }
}

/// One tag per encoding, carrying the raw schema key. Monetary fields keep
/// their zero values on the wire: a zero price is not "absent".
fn field_tags(prop_name: &str) -> Vec<Tag> {
    let omit_empty = !prop_name.to_lowercase().contains("price");
    TAG_ENCODINGS
        .iter()
        .map(|&encoding| Tag {
            encoding,
            name: prop_name.to_string(),
            omit_empty,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapper() -> Mapper {
        Mapper::new(NameMap::default())
    }

    fn schema(v: serde_json::Value) -> Schema {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn bid_struct_with_monetary_price() {
        let s = schema(json!({
            "id": "bid",
            "properties": {
                "id": {"type": "string"},
                "price": {"type": "number"}
            },
            "definitions": {}
        }));
        let decls = mapper().map_schema("bid", &s).unwrap();
        assert_eq!(decls.len(), 1);
        let bid = &decls[0];
        assert_eq!(bid.name, "Bid");
        assert_eq!(bid.ty.kind, TypeKind::Struct);

        let id = &bid.ty.fields[0];
        assert_eq!(id.name, "ID");
        assert_eq!(id.ty.ident, "string");
        assert_eq!(id.tags.len(), 2);
        assert!(id.tags.iter().all(|t| t.omit_empty));
        assert_eq!(id.tags[0].name, "id");

        let price = &bid.ty.fields[1];
        assert_eq!(price.name, "Price");
        assert_eq!(price.ty.ident, "decimal.D");
        assert!(price.tags.iter().all(|t| !t.omit_empty));
    }

    #[test]
    fn fields_sorted_by_resolved_name() {
        let s = schema(json!({
            "properties": {
                "w": {"type": "integer"},
                "h": {"type": "integer"},
                "api": {"type": "integer"}
            }
        }));
        let decls = mapper().map_schema("banner", &s).unwrap();
        let names: Vec<&str> = decls[0].ty.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["API", "H", "W"]);
    }

    #[test]
    fn floor_and_ratio_numbers_are_decimal() {
        let s = schema(json!({
            "properties": {
                "bid_floor": {"type": "number"},
                "aspect_ratio": {"type": "number"},
                "lat": {"type": "number"}
            }
        }));
        let decls = mapper().map_schema("geo", &s).unwrap();
        let by_name = |want: &str| {
            decls[0]
                .ty
                .fields
                .iter()
                .find(|f| f.name == want)
                .unwrap()
        };
        assert_eq!(by_name("BidFloor").ty.ident, "decimal.D");
        assert_eq!(by_name("AspectRatio").ty.ident, "decimal.D");
        assert_eq!(by_name("Lat").ty.ident, "float64");
        // floor/ratio affect the ident only, not omitempty
        assert!(by_name("BidFloor").tags.iter().all(|t| t.omit_empty));
    }

    #[test]
    fn definitions_recurse_pre_order() {
        let s = schema(json!({
            "id": "request",
            "properties": {"site": {"$ref": "#/definitions/site"}},
            "definitions": {
                "site": {"properties": {"site_id": {"type": "string"}}}
            }
        }));
        let decls = mapper().map_schema("request", &s).unwrap();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "Request");
        assert_eq!(decls[0].ty.fields[0].ty.ident, "Site");
        assert_eq!(decls[1].name, "Site");
        assert_eq!(decls[1].ty.fields[0].name, "SiteID");
    }

    #[test]
    fn alias_definition_maps_to_ident_decl() {
        let s = schema(json!({
            "id": "commons",
            "properties": {"at": {"$ref": "#/definitions/positive_int"}},
            "definitions": {
                "positive_int": {"type": "integer", "minimum": 0},
                "boolean_int": {"type": "integer", "enum": ["0", "1"]}
            }
        }));
        let decls = mapper().map_schema("commons", &s).unwrap();
        assert_eq!(decls[0].ty.fields[0].ty.ident, "int");
        let positive = decls.iter().find(|d| d.name == "PositiveInt").unwrap();
        assert_eq!(positive.ty.kind, TypeKind::Ident);
        assert_eq!(positive.ty.ident, "int");
        let boolean = decls.iter().find(|d| d.name == "BooleanInt").unwrap();
        assert_eq!(boolean.ty.ident, "int");
    }

    #[test]
    fn boolean_int_ref_maps_to_bool_int() {
        let s = schema(json!({
            "properties": {"instl": {"$ref": "#/definitions/boolean_int"}}
        }));
        let decls = mapper().map_schema("imp", &s).unwrap();
        assert_eq!(decls[0].ty.fields[0].ty.ident, "BoolInt");
    }

    #[test]
    fn arrays_of_primitives_and_refs() {
        let s = schema(json!({
            "properties": {
                "keywords": {"type": "array", "items": {"type": "string"}},
                "imp": {"type": "array", "items": {"$ref": "#/definitions/imp"}}
            }
        }));
        let decls = mapper().map_schema("request", &s).unwrap();
        let imp = &decls[0].ty.fields[0];
        assert_eq!(imp.ty.kind, TypeKind::Array);
        assert_eq!(imp.ty.ident, "Imp");
        let keywords = &decls[0].ty.fields[1];
        assert_eq!(keywords.ty.kind, TypeKind::Array);
        assert_eq!(keywords.ty.ident, "string");
    }

    #[test]
    fn bare_object_is_escape_hatch() {
        let s = schema(json!({
            "properties": {"ext": {"type": "object"}}
        }));
        let decls = mapper().map_schema("bid", &s).unwrap();
        assert_eq!(decls[0].ty.fields[0].ty.ident, "interface{}");
    }

    #[test]
    fn array_of_arrays_is_unsupported() {
        let s = schema(json!({
            "properties": {
                "matrix": {
                    "type": "array",
                    "items": {"type": "array", "items": {"type": "integer"}}
                }
            }
        }));
        let err = mapper().map_schema("m", &s).unwrap_err();
        assert!(matches!(err, TypegenError::Unsupported { .. }));
    }

    #[test]
    fn non_local_ref_is_unsupported() {
        let s = schema(json!({
            "properties": {"site": {"$ref": "http://example.com/site.json#"}}
        }));
        let err = mapper().map_schema("request", &s).unwrap_err();
        let TypegenError::Unsupported { at, detail } = err else {
            panic!("expected Unsupported");
        };
        assert_eq!(at, "site");
        assert!(detail.contains("http://example.com/site.json#"));
    }

    #[test]
    fn shapeless_node_is_unsupported() {
        let s = schema(json!({"description": "nothing to map"}));
        assert!(mapper().map_schema("empty", &s).is_err());

        let s = schema(json!({
            "properties": {"x": {"type": ["string", "null"]}}
        }));
        assert!(mapper().map_schema("multi", &s).is_err());
    }

    #[test]
    fn mapping_is_idempotent() {
        let s = schema(json!({
            "id": "request",
            "properties": {
                "site_id": {"type": "string"},
                "imp": {"type": "array", "items": {"$ref": "#/definitions/imp"}}
            },
            "definitions": {
                "imp": {"properties": {"bid_floor": {"type": "number"}}}
            }
        }));
        let m = mapper();
        let first = m.map_schema("request", &s).unwrap();
        let second = m.map_schema("request", &s).unwrap();
        assert_eq!(first, second);
    }
}
