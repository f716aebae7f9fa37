//! The typed intermediate representation handed to the emission backend.
//!
//! Built by a single forward pass over the resolved document and read-only
//! thereafter: the registry and function list never change once an emission
//! pass starts, so one IR can feed several independent backends.

use std::collections::BTreeMap;

pub use super::document::{HttpMethod, ParamLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
  String,
  Integer,
  Number,
  Boolean,
}

impl Primitive {
  /// Rendered Rust type for this primitive.
  #[must_use]
  pub fn rust_name(self) -> &'static str {
    match self {
      Self::String => "String",
      Self::Integer => "i64",
      Self::Number => "f64",
      Self::Boolean => "bool",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatetimeFormat {
  Date,
  DateTime,
}

impl DatetimeFormat {
  /// The OpenAPI `format` keyword this variant was parsed from.
  #[must_use]
  pub fn wire_format(self) -> &'static str {
    match self {
      Self::Date => "date",
      Self::DateTime => "date-time",
    }
  }
}

/// How a value of some type is recovered from its wire string. Consumed by
/// handler parameter extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseKind {
  /// The wire string is the value.
  Identity,
  /// Recovered with `str::parse` into the rendered type.
  FromStr,
  /// No string form; the value only travels as a JSON payload.
  Unsupported,
}

/// A reference to a type in the IR. Object variants carry only their
/// canonical name and alias; the definition itself lives in the
/// [`TypeRegistry`], keyed by that name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
  Primitive(Primitive),
  Datetime(DatetimeFormat),
  Object { name: String, alias: String },
  Array(Box<TypeRef>),
  Map(Box<TypeRef>),
}

impl TypeRef {
  /// Canonical literal name, used for registry ordering and diagnostics.
  #[must_use]
  pub fn literal_name(&self) -> String {
    match self {
      Self::Primitive(Primitive::String) => "string".to_string(),
      Self::Primitive(Primitive::Integer) => "integer".to_string(),
      Self::Primitive(Primitive::Number) => "number".to_string(),
      Self::Primitive(Primitive::Boolean) => "boolean".to_string(),
      Self::Datetime(format) => format.wire_format().to_string(),
      Self::Object { name, .. } => name.clone(),
      Self::Array(element) => format!("[]{}", element.literal_name()),
      Self::Map(value) => format!("map[{}]", value.literal_name()),
    }
  }

  /// Rendered Rust type text. `abbreviate` swaps object names for their
  /// short aliases.
  #[must_use]
  pub fn display_name(&self, abbreviate: bool) -> String {
    match self {
      Self::Primitive(primitive) => primitive.rust_name().to_string(),
      Self::Datetime(DatetimeFormat::Date) => "chrono::NaiveDate".to_string(),
      Self::Datetime(DatetimeFormat::DateTime) => "chrono::DateTime<chrono::Utc>".to_string(),
      Self::Object { name, alias } => {
        if abbreviate {
          alias.clone()
        } else {
          name.clone()
        }
      }
      Self::Array(element) => format!("Vec<{}>", element.display_name(abbreviate)),
      Self::Map(value) => format!(
        "std::collections::BTreeMap<String, {}>",
        value.display_name(abbreviate)
      ),
    }
  }

  /// The wire format constraint, if any.
  #[must_use]
  pub fn format(&self) -> Option<&'static str> {
    match self {
      Self::Datetime(format) => Some(format.wire_format()),
      _ => None,
    }
  }

  /// Parse-from-string contract for parameter extraction.
  #[must_use]
  pub fn parse_kind(&self) -> ParseKind {
    match self {
      Self::Primitive(Primitive::String) => ParseKind::Identity,
      Self::Primitive(_) | Self::Datetime(_) => ParseKind::FromStr,
      Self::Object { .. } | Self::Array(_) | Self::Map(_) => ParseKind::Unsupported,
    }
  }
}

/// A named value binding: a generated identifier, the wire name it came
/// from, and the type it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
  /// Generated identifier.
  pub name: String,
  /// Original wire-level name.
  pub source_name: String,
  pub required: bool,
  /// Enum constraint; empty when unconstrained.
  pub enum_values: Vec<String>,
  pub default: Option<String>,
  pub type_ref: TypeRef,
}

/// An object definition in the registry: canonical name, abbreviation
/// alias, the dotted display path the alias was derived from, and the
/// fields in deterministic (identifier) order.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
  pub name: String,
  pub alias: String,
  pub qualified_name: String,
  pub fields: Vec<Property>,
}

/// The deduplicated named-type registry. At most one entry exists per
/// canonical name; iteration is in canonical-name order.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
  types: BTreeMap<String, ObjectType>,
}

impl TypeRegistry {
  pub fn insert(&mut self, object: ObjectType) {
    self.types.insert(object.name.clone(), object);
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&ObjectType> {
    self.types.get(name)
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.types.contains_key(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &ObjectType> {
    self.types.values()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.types.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.types.is_empty()
  }
}

/// An input binding of a function, tagged with where it travels.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
  pub location: ParamLocation,
  pub required: bool,
  pub property: Property,
}

/// An output binding of a function, tagged with the status code it was
/// derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDef {
  pub status: u16,
  pub property: Property,
}

/// One callable operation: path + method plus ordered inputs and outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
  pub name: String,
  pub method: HttpMethod,
  pub path: String,
  pub inputs: Vec<ParamDef>,
  pub outputs: Vec<OutputDef>,
}

impl FunctionDef {
  #[must_use]
  pub fn body(&self) -> Option<&ParamDef> {
    self.inputs.iter().find(|input| input.location == ParamLocation::Body)
  }

  pub fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &ParamDef> {
    self.inputs.iter().filter(move |input| input.location == location)
  }

  #[must_use]
  pub fn has_path_params(&self) -> bool {
    self.params_in(ParamLocation::Path).next().is_some()
  }
}

/// The finished IR: document metadata, the named-type registry, and the
/// function list in generated-name order.
#[derive(Debug, Clone)]
pub struct Ir {
  pub title: String,
  pub version: String,
  pub registry: TypeRegistry,
  pub functions: Vec<FunctionDef>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_names() {
    let pets = TypeRef::Array(Box::new(TypeRef::Object {
      name: "Pet".into(),
      alias: "Pet".into(),
    }));
    assert_eq!(pets.display_name(false), "Vec<Pet>");

    let tags = TypeRef::Map(Box::new(TypeRef::Primitive(Primitive::String)));
    assert_eq!(tags.display_name(false), "std::collections::BTreeMap<String, String>");

    let nested = TypeRef::Object {
      name: "CreatePetRequestTag".into(),
      alias: "CPRTag".into(),
    };
    assert_eq!(nested.display_name(false), "CreatePetRequestTag");
    assert_eq!(nested.display_name(true), "CPRTag");
  }

  #[test]
  fn test_literal_names() {
    let pets = TypeRef::Array(Box::new(TypeRef::Object {
      name: "Pet".into(),
      alias: "Pet".into(),
    }));
    assert_eq!(pets.literal_name(), "[]Pet");
    assert_eq!(TypeRef::Primitive(Primitive::Integer).literal_name(), "integer");
    assert_eq!(
      TypeRef::Map(Box::new(TypeRef::Primitive(Primitive::Boolean))).literal_name(),
      "map[boolean]"
    );
  }

  #[test]
  fn test_parse_kinds() {
    assert_eq!(TypeRef::Primitive(Primitive::String).parse_kind(), ParseKind::Identity);
    assert_eq!(TypeRef::Primitive(Primitive::Integer).parse_kind(), ParseKind::FromStr);
    assert_eq!(TypeRef::Datetime(DatetimeFormat::Date).parse_kind(), ParseKind::FromStr);
    let object = TypeRef::Object {
      name: "Pet".into(),
      alias: "Pet".into(),
    };
    assert_eq!(object.parse_kind(), ParseKind::Unsupported);
  }

  #[test]
  fn test_format_probe() {
    assert_eq!(TypeRef::Datetime(DatetimeFormat::DateTime).format(), Some("date-time"));
    assert_eq!(TypeRef::Primitive(Primitive::String).format(), None);
  }

  #[test]
  fn test_registry_single_entry_per_name() {
    let mut registry = TypeRegistry::default();
    registry.insert(ObjectType {
      name: "Pet".into(),
      alias: "Pet".into(),
      qualified_name: "Pet".into(),
      fields: vec![],
    });
    registry.insert(ObjectType {
      name: "Pet".into(),
      alias: "Pet".into(),
      qualified_name: "Pet".into(),
      fields: vec![],
    });
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn test_registry_iterates_in_name_order() {
    let mut registry = TypeRegistry::default();
    for name in ["Zebra", "Ant", "Mole"] {
      registry.insert(ObjectType {
        name: name.into(),
        alias: name.into(),
        qualified_name: name.into(),
        fields: vec![],
      });
    }
    let names: Vec<&str> = registry.iter().map(|object| object.name.as_str()).collect();
    assert_eq!(names, vec!["Ant", "Mole", "Zebra"]);
  }
}
