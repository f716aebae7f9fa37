//! Passive data structures mirroring the OpenAPI 3.x object model.
//!
//! The model is produced by serde from YAML or JSON bytes and owns no
//! behavior beyond structural access. Maps preserve document order so that
//! two parses of the same bytes walk identically.

pub mod walker;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::errors::GeneratorError;

/// Returns the final path segment of a `$ref` pointer, e.g.
/// `#/components/schemas/Pet` -> `Pet`.
#[must_use]
pub fn ref_name(ref_path: &str) -> &str {
  ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Whether a content key names a JSON payload (`application/json` or any
/// `+json` suffixed media type).
#[must_use]
pub fn is_json_media_type(content_key: &str) -> bool {
  let Ok(media) = mediatype::MediaType::parse(content_key) else {
    return false;
  };
  let suffix = media.suffix.as_ref().map(mediatype::Name::as_str);
  matches!(
    (media.ty.as_str(), media.subty.as_str(), suffix),
    ("application", "json", _) | (_, _, Some("json"))
  )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Patch,
  Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParamLocation {
  Path,
  #[default]
  Query,
  Header,
  Body,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
  #[serde(default)]
  pub openapi: String,
  #[serde(default)]
  pub info: Info,
  #[serde(default)]
  pub paths: IndexMap<String, PathItem>,
  #[serde(default)]
  pub components: Components,
}

impl Document {
  pub fn from_json(bytes: &[u8]) -> Result<Self, GeneratorError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let mut document: Self = serde_path_to_error::deserialize(&mut deserializer)
      .map_err(|err| GeneratorError::Deserialize { detail: err.to_string() })?;
    document.hydrate();
    Ok(document)
  }

  pub fn from_yaml(text: &str) -> Result<Self, GeneratorError> {
    let deserializer = serde_yaml::Deserializer::from_str(text);
    let mut document: Self = serde_path_to_error::deserialize(deserializer)
      .map_err(|err| GeneratorError::Deserialize { detail: err.to_string() })?;
    document.hydrate();
    Ok(document)
  }

  /// Copies component map keys into the entries they name: schemas learn
  /// their registry name, parameters keep their wire name in
  /// `external_name` and take the registry key as internal name.
  fn hydrate(&mut self) {
    for (name, schema) in &mut self.components.schemas {
      schema.name = name.clone();
    }
    for (key, parameter) in &mut self.components.parameters {
      parameter.external_name = parameter.name.clone();
      parameter.name = key.clone();
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
  #[serde(default)]
  pub get: Option<Operation>,
  #[serde(default)]
  pub post: Option<Operation>,
  #[serde(default)]
  pub put: Option<Operation>,
  #[serde(default)]
  pub patch: Option<Operation>,
  #[serde(default)]
  pub delete: Option<Operation>,
}

impl PathItem {
  /// The present operations in fixed method order.
  #[must_use]
  pub fn methods(&self) -> Vec<(HttpMethod, &Operation)> {
    let slots = [
      (HttpMethod::Get, &self.get),
      (HttpMethod::Post, &self.post),
      (HttpMethod::Put, &self.put),
      (HttpMethod::Patch, &self.patch),
      (HttpMethod::Delete, &self.delete),
    ];
    slots
      .into_iter()
      .filter_map(|(method, slot)| slot.as_ref().map(|operation| (method, operation)))
      .collect()
  }

  pub fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
    [
      &mut self.get,
      &mut self.post,
      &mut self.put,
      &mut self.patch,
      &mut self.delete,
    ]
    .into_iter()
    .filter_map(|slot| slot.as_mut())
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
  #[serde(rename = "operationId", default)]
  pub operation_id: String,
  #[serde(default)]
  pub summary: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub parameters: Vec<Parameter>,
  #[serde(rename = "requestBody", default)]
  pub request_body: Option<RequestBody>,
  #[serde(default)]
  pub responses: IndexMap<String, Response>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameter {
  #[serde(default)]
  pub name: String,
  /// Wire-level name; defaults to `name` during resolution when absent.
  #[serde(skip_deserializing)]
  pub external_name: String,
  #[serde(rename = "in", default)]
  pub location: ParamLocation,
  #[serde(default)]
  pub required: bool,
  #[serde(default)]
  pub schema: Option<Schema>,
  #[serde(rename = "$ref", default)]
  pub ref_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub required: bool,
  #[serde(default)]
  pub content: IndexMap<String, MediaType>,
  #[serde(rename = "$ref", default)]
  pub ref_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub content: IndexMap<String, MediaType>,
  #[serde(rename = "$ref", default)]
  pub ref_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
  #[serde(default)]
  pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
  #[serde(default)]
  pub schemas: IndexMap<String, Schema>,
  #[serde(default)]
  pub parameters: IndexMap<String, Parameter>,
  #[serde(rename = "requestBodies", default)]
  pub request_bodies: IndexMap<String, RequestBody>,
  #[serde(default)]
  pub responses: IndexMap<String, Response>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
  /// Registry name for component schemas, empty for inline schemas.
  #[serde(skip_deserializing)]
  pub name: String,
  #[serde(rename = "$ref", default)]
  pub ref_path: String,
  /// A schema with no explicit `type` keyword is an object.
  #[serde(rename = "type", default = "default_schema_type")]
  pub schema_type: String,
  #[serde(default)]
  pub format: String,
  #[serde(default)]
  pub required: Vec<String>,
  #[serde(default)]
  pub properties: IndexMap<String, Schema>,
  #[serde(default)]
  pub items: Option<Box<Schema>>,
  #[serde(rename = "additionalProperties", default)]
  pub additional_properties: Option<Box<Schema>>,
  #[serde(rename = "enum", default)]
  pub enum_values: Vec<String>,
  #[serde(default)]
  pub default: Option<String>,
  #[serde(rename = "x-forge-tags", default)]
  pub extension_tags: BTreeMap<String, Vec<String>>,
}

impl Default for Schema {
  fn default() -> Self {
    Self {
      name: String::new(),
      ref_path: String::new(),
      schema_type: default_schema_type(),
      format: String::new(),
      required: Vec::new(),
      properties: IndexMap::new(),
      items: None,
      additional_properties: None,
      enum_values: Vec::new(),
      default: None,
      extension_tags: BTreeMap::new(),
    }
  }
}

fn default_schema_type() -> String {
  "object".to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ref_name_extracts_final_segment() {
    assert_eq!(ref_name("#/components/schemas/Pet"), "Pet");
    assert_eq!(ref_name("#/components/parameters/PageSize"), "PageSize");
    assert_eq!(ref_name("Pet"), "Pet");
    assert_eq!(ref_name(""), "");
  }

  #[test]
  fn test_json_media_type_matching() {
    assert!(is_json_media_type("application/json"));
    assert!(is_json_media_type("application/json; charset=utf-8"));
    assert!(is_json_media_type("application/problem+json"));
    assert!(!is_json_media_type("text/plain"));
    assert!(!is_json_media_type("application/xml"));
    assert!(!is_json_media_type("not a media type"));
  }

  #[test]
  fn test_schema_type_defaults_to_object() {
    let document = Document::from_yaml(
      r#"
openapi: 3.0.0
components:
  schemas:
    Pet:
      properties:
        name:
          type: string
"#,
    )
    .unwrap();

    let pet = &document.components.schemas["Pet"];
    assert_eq!(pet.schema_type, "object");
    assert_eq!(pet.name, "Pet");
    assert_eq!(pet.properties["name"].schema_type, "string");
  }

  #[test]
  fn test_component_parameter_hydration() {
    let document = Document::from_yaml(
      r#"
openapi: 3.0.0
components:
  parameters:
    PageSize:
      name: page_size
      in: query
      schema:
        type: integer
"#,
    )
    .unwrap();

    let parameter = &document.components.parameters["PageSize"];
    assert_eq!(parameter.name, "PageSize");
    assert_eq!(parameter.external_name, "page_size");
    assert_eq!(parameter.location, ParamLocation::Query);
  }

  #[test]
  fn test_methods_fixed_order() {
    let item = PathItem {
      delete: Some(Operation::default()),
      get: Some(Operation::default()),
      ..PathItem::default()
    };
    let methods: Vec<HttpMethod> = item.methods().into_iter().map(|(method, _)| method).collect();
    assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Delete]);
  }

  #[test]
  fn test_deserialize_error_carries_path() {
    let err = Document::from_yaml("openapi: 3.0.0\npaths: 12\n").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("paths"), "unexpected message: {message}");
  }

  #[test]
  fn test_from_json_accepts_json_documents() {
    let document = Document::from_json(br#"{"openapi": "3.1.0", "info": {"title": "t", "version": "1"}}"#).unwrap();
    assert_eq!(document.info.title, "t");
  }
}
