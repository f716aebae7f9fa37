//! Folds resolved schemas into the typed IR.
//!
//! The builder walks a schema recursively, selecting a [`TypeRef`] variant
//! per OpenAPI type keyword and registering every object type under its
//! canonical name. A schema that arrived through a `$ref` keeps that name
//! as its canonical name wherever it is embedded, which is what keeps the
//! registry deduplicated; inline schemas are named from their usage site
//! and are never shared.

pub mod operations;

pub use operations::OperationConverter;

use super::{
  document::{Schema, ref_name},
  errors::GeneratorError,
  ir::{DatetimeFormat, ObjectType, Primitive, Property, TypeRef, TypeRegistry},
  naming::{abbreviate, to_identifier},
};

/// Resolution-time naming context threaded through the recursion: the
/// enclosing scope (operation id or parent type name) and the dotted
/// display path aliases are derived from.
#[derive(Debug, Clone, Default)]
pub struct NamingContext {
  pub scope: String,
  pub qualified: String,
}

impl NamingContext {
  /// Context for component-registry roots.
  #[must_use]
  pub fn root() -> Self {
    Self::default()
  }

  /// Context for schemas embedded in an operation.
  #[must_use]
  pub fn operation(operation_id: &str) -> Self {
    Self {
      scope: operation_id.to_string(),
      qualified: String::new(),
    }
  }

  fn child(&self, canonical: &str, qualified: &str) -> Self {
    Self {
      scope: canonical.to_string(),
      qualified: qualified.to_string(),
    }
  }
}

#[derive(Debug, Default)]
pub struct TypeGraphBuilder {
  registry: TypeRegistry,
}

impl TypeGraphBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn registry(&self) -> &TypeRegistry {
    &self.registry
  }

  #[must_use]
  pub fn into_registry(self) -> TypeRegistry {
    self.registry
  }

  /// Builds the IR property for `schema` appearing as `field_name` inside
  /// `ctx`. Object types are registered as a side effect.
  pub fn build_property(
    &mut self,
    schema: &Schema,
    field_name: &str,
    ctx: &NamingContext,
  ) -> Result<Property, GeneratorError> {
    let (canonical, qualified) = Self::canonical_names(schema, field_name, ctx);

    let type_ref = match schema.schema_type.as_str() {
      "object" => self.build_object(schema, &canonical, &qualified, ctx)?,
      "string" => match schema.format.as_str() {
        "date" => TypeRef::Datetime(DatetimeFormat::Date),
        "date-time" => TypeRef::Datetime(DatetimeFormat::DateTime),
        _ => TypeRef::Primitive(Primitive::String),
      },
      "integer" => TypeRef::Primitive(Primitive::Integer),
      "number" => TypeRef::Primitive(Primitive::Number),
      "boolean" => TypeRef::Primitive(Primitive::Boolean),
      "array" => {
        let items = schema
          .items
          .as_deref()
          .ok_or_else(|| GeneratorError::MissingItems {
            field: field_name.to_string(),
          })?;
        let element = self.build_property(items, "", &ctx.child(&canonical, &qualified))?;
        TypeRef::Array(Box::new(element.type_ref))
      }
      other => {
        return Err(GeneratorError::UnsupportedType {
          type_name: other.to_string(),
          field: field_name.to_string(),
        });
      }
    };

    Ok(Property {
      name: to_identifier(true, &[field_name]),
      source_name: field_name.to_string(),
      required: false,
      enum_values: schema.enum_values.clone(),
      default: schema.default.clone(),
      type_ref,
    })
  }

  /// The canonical registry name for a schema occurrence, plus the dotted
  /// display path. A preserved reference name is canonical and stable no
  /// matter where the schema is embedded; an inline schema is named from
  /// its usage site.
  fn canonical_names(schema: &Schema, field_name: &str, ctx: &NamingContext) -> (String, String) {
    if !schema.ref_path.is_empty() {
      let name = ref_name(&schema.ref_path).to_string();
      return (name.clone(), name);
    }

    let canonical = to_identifier(true, &[ctx.scope.as_str(), field_name]);
    let qualified = if ctx.qualified.is_empty() {
      canonical.clone()
    } else {
      format!("{}.{}", ctx.qualified, to_identifier(true, &[field_name]))
    };
    (canonical, qualified)
  }

  fn build_object(
    &mut self,
    schema: &Schema,
    canonical: &str,
    qualified: &str,
    ctx: &NamingContext,
  ) -> Result<TypeRef, GeneratorError> {
    let child_ctx = ctx.child(canonical, qualified);

    if let Some(additional) = &schema.additional_properties {
      let value = self.build_property(additional, "", &child_ctx)?;
      return Ok(TypeRef::Map(Box::new(value.type_ref)));
    }

    let mut fields = Vec::with_capacity(schema.properties.len());
    for (child_name, child_schema) in &schema.properties {
      let mut field = self.build_property(child_schema, child_name, &child_ctx)?;
      field.required = schema.required.iter().any(|required| required == child_name);
      fields.push(field);
    }
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    let alias = abbreviate(qualified);
    self.registry.insert(ObjectType {
      name: canonical.to_string(),
      alias: alias.clone(),
      qualified_name: qualified.to_string(),
      fields,
    });

    Ok(TypeRef::Object {
      name: canonical.to_string(),
      alias,
    })
  }
}
