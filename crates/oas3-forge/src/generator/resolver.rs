//! `$ref` resolution over the document model.
//!
//! Resolution produces a new, fully-resolved document rather than mutating
//! the input in place, so shared structures are never aliased mid-walk.
//! Every `$ref`-bearing node is overwritten with the fields of its named
//! target while the reference string itself is preserved for naming and
//! display. Lookups search the pristine source document through the tree
//! walker and halt on the first match.
//!
//! Recursive schemas (a `$ref` reaching back into a schema currently being
//! substituted, directly or through intermediates) are rejected with
//! [`GeneratorError::CircularReference`]; an in-flight name stack guards
//! the depth-first substitution.

use super::{
  document::{
    Document, Parameter, RequestBody, Response, Schema, ref_name,
    walker::{Node, find_parameter, find_schema},
  },
  errors::GeneratorError,
};

/// Resolves every reference in `document`, returning the resolved copy.
///
/// Resolving an already-resolved document is a no-op: a resolved node keeps
/// its reference string, and substituting the same target again reproduces
/// the same fields.
pub fn resolve(document: &Document) -> Result<Document, GeneratorError> {
  let resolver = Resolver { source: document };
  let mut resolved = document.clone();

  for schema in resolved.components.schemas.values_mut() {
    resolver.resolve_schema(schema, &mut Vec::new())?;
  }
  for parameter in resolved.components.parameters.values_mut() {
    resolver.resolve_parameter(parameter)?;
  }
  for body in resolved.components.request_bodies.values_mut() {
    resolver.resolve_request_body(body)?;
  }
  for response in resolved.components.responses.values_mut() {
    resolver.resolve_response(response)?;
  }

  for item in resolved.paths.values_mut() {
    for operation in item.operations_mut() {
      for parameter in &mut operation.parameters {
        resolver.resolve_parameter(parameter)?;
      }
      if let Some(body) = &mut operation.request_body {
        resolver.resolve_request_body(body)?;
      }
      for response in operation.responses.values_mut() {
        resolver.resolve_response(response)?;
      }
    }
  }

  Ok(resolved)
}

struct Resolver<'a> {
  source: &'a Document,
}

impl Resolver<'_> {
  fn resolve_schema(&self, schema: &mut Schema, stack: &mut Vec<String>) -> Result<(), GeneratorError> {
    if schema.ref_path.is_empty() {
      return self.resolve_schema_children(schema, stack);
    }

    let name = ref_name(&schema.ref_path).to_string();
    if stack.contains(&name) {
      return Err(GeneratorError::CircularReference { name });
    }

    let target = find_schema(Node::Document(self.source), &name).ok_or_else(|| GeneratorError::UnresolvedReference {
      ref_path: schema.ref_path.clone(),
      name: name.clone(),
    })?;

    let ref_path = std::mem::take(&mut schema.ref_path);
    *schema = target.clone();
    schema.ref_path = ref_path;

    stack.push(name);
    self.resolve_schema_children(schema, stack)?;
    stack.pop();
    Ok(())
  }

  fn resolve_schema_children(&self, schema: &mut Schema, stack: &mut Vec<String>) -> Result<(), GeneratorError> {
    if let Some(items) = &mut schema.items {
      self.resolve_schema(items, stack)?;
    }
    if let Some(additional) = &mut schema.additional_properties {
      self.resolve_schema(additional, stack)?;
    }
    for property in schema.properties.values_mut() {
      self.resolve_schema(property, stack)?;
    }
    Ok(())
  }

  fn resolve_parameter(&self, parameter: &mut Parameter) -> Result<(), GeneratorError> {
    if parameter.ref_path.is_empty() {
      // Identity default: an inline parameter without an explicit wire
      // name is known on the wire by its internal name.
      if parameter.external_name.is_empty() {
        parameter.external_name = parameter.name.clone();
      }
    } else {
      let name = ref_name(&parameter.ref_path).to_string();
      let target =
        find_parameter(Node::Document(self.source), &name).ok_or_else(|| GeneratorError::UnresolvedReference {
          ref_path: parameter.ref_path.clone(),
          name,
        })?;

      let ref_path = std::mem::take(&mut parameter.ref_path);
      *parameter = target.clone();
      parameter.ref_path = ref_path;
    }

    if let Some(schema) = &mut parameter.schema {
      self.resolve_schema(schema, &mut Vec::new())?;
    }
    Ok(())
  }

  fn resolve_request_body(&self, body: &mut RequestBody) -> Result<(), GeneratorError> {
    if !body.ref_path.is_empty() {
      let name = ref_name(&body.ref_path).to_string();
      let target =
        self
          .source
          .components
          .request_bodies
          .get(&name)
          .ok_or_else(|| GeneratorError::UnresolvedReference {
            ref_path: body.ref_path.clone(),
            name,
          })?;

      let ref_path = std::mem::take(&mut body.ref_path);
      *body = target.clone();
      body.ref_path = ref_path;
    }

    for media in body.content.values_mut() {
      if let Some(schema) = &mut media.schema {
        self.resolve_schema(schema, &mut Vec::new())?;
      }
    }
    Ok(())
  }

  fn resolve_response(&self, response: &mut Response) -> Result<(), GeneratorError> {
    if !response.ref_path.is_empty() {
      let name = ref_name(&response.ref_path).to_string();
      let target = self
        .source
        .components
        .responses
        .get(&name)
        .ok_or_else(|| GeneratorError::UnresolvedReference {
          ref_path: response.ref_path.clone(),
          name,
        })?;

      let ref_path = std::mem::take(&mut response.ref_path);
      *response = target.clone();
      response.ref_path = ref_path;
    }

    for media in response.content.values_mut() {
      if let Some(schema) = &mut media.schema {
        self.resolve_schema(schema, &mut Vec::new())?;
      }
    }
    Ok(())
  }
}
