//! Parsed JSON Schema document model.
//!
//! Covers the draft-4-ish surface the bid-request/response schemas use.
//! Validation keywords (bounds, patterns, enums) are parsed and carried
//! through untouched; the mapper never interprets them. Documents are
//! parsed once per input file and immutable afterward.

use anyhow::anyhow;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    pub id: Option<String>,
    #[serde(rename = "$schema")]
    pub schema: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub multiple_of: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_maximum: Option<bool>,
    pub minimum: Option<f64>,
    pub exclusive_minimum: Option<bool>,
    pub max_length: Option<u64>,
    pub min_length: Option<u64>,
    pub pattern: Option<String>,
    pub additional_items: Option<BoolOrSchema>,
    pub items: Option<Box<Schema>>,
    pub max_items: Option<u64>,
    pub min_items: Option<u64>,
    pub unique_items: Option<bool>,
    pub max_properties: Option<u64>,
    pub min_properties: Option<u64>,
    pub required: Vec<String>,
    pub additional_properties: Option<BoolOrSchema>,
    pub definitions: IndexMap<String, Schema>,
    pub properties: IndexMap<String, Schema>,
    pub pattern_properties: IndexMap<String, Schema>,
    pub dependencies: IndexMap<String, Value>,
    #[serde(rename = "enum")]
    pub enum_: Vec<String>,
    pub all_of: Vec<Schema>,
    pub any_of: Vec<Schema>,
    pub one_of: Vec<Schema>,
    pub not: Option<Box<Schema>>,
    #[serde(rename = "type")]
    pub type_: Option<TypeField>,
    #[serde(rename = "$ref")]
    pub ref_: Option<String>,
    pub format: Option<String>,
}

/// `type` may be a single name or a list of names. The mapper only accepts
/// the single-name form; matching here keeps that decision exhaustive
/// instead of probing a dynamic value.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TypeField {
    One(String),
    Many(Vec<String>),
}

impl TypeField {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            TypeField::One(name) => Some(name),
            TypeField::Many(_) => None,
        }
    }
}

/// `additionalItems` / `additionalProperties` are either a boolean switch
/// or a full schema.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum BoolOrSchema {
    Bool(bool),
    Schema(Box<Schema>),
}

impl Schema {
    /// Parse a schema document, reporting the JSON path on failure.
    pub fn parse(src: &str) -> anyhow::Result<Schema> {
        let de = &mut serde_json::Deserializer::from_str(src);
        match serde_path_to_error::deserialize::<_, Schema>(de) {
            Ok(schema) => Ok(schema),
            Err(err) => {
                let path = err.path().to_string();
                Err(anyhow!("at JSON path {path} → {}", err.into_inner()))
            }
        }
    }
}
