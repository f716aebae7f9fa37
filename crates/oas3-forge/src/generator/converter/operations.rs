//! Assembles per-operation function descriptors from the resolved document.

use super::{NamingContext, TypeGraphBuilder};
use crate::generator::{
  document::{HttpMethod, Operation, ParamLocation, RequestBody, is_json_media_type},
  errors::GeneratorError,
  ir::{FunctionDef, OutputDef, ParamDef, Property},
  naming::to_identifier,
};

/// Field name under which a request body binds into the naming context.
const BODY_FIELD_NAME: &str = "Request";
/// Field name under which a response payload binds into the naming context.
const RESPONSE_FIELD_NAME: &str = "Response";

/// Success window for output derivation: [200, 400).
const SUCCESS_RANGE: std::ops::Range<u16> = 200..400;

pub struct OperationConverter<'a> {
  builder: &'a mut TypeGraphBuilder,
}

impl<'a> OperationConverter<'a> {
  pub fn new(builder: &'a mut TypeGraphBuilder) -> Self {
    Self { builder }
  }

  /// Builds the function descriptor for one path + method.
  pub fn convert(
    &mut self,
    path: &str,
    method: HttpMethod,
    operation: &Operation,
  ) -> Result<FunctionDef, GeneratorError> {
    let name = to_identifier(true, &[&operation.operation_id]);

    let mut inputs = self.convert_parameters(operation)?;
    if let Some(body) = &operation.request_body
      && let Some(param) = self.convert_body(body, operation)?
    {
      inputs.push(param);
    }
    let outputs = self.convert_responses(operation)?;

    Ok(FunctionDef {
      name,
      method,
      path: path.to_string(),
      inputs,
      outputs,
    })
  }

  fn convert_parameters(&mut self, operation: &Operation) -> Result<Vec<ParamDef>, GeneratorError> {
    let ctx = NamingContext::operation(&operation.operation_id);

    let mut params = Vec::with_capacity(operation.parameters.len());
    for parameter in &operation.parameters {
      let schema = parameter
        .schema
        .as_ref()
        .ok_or_else(|| GeneratorError::MissingParameterSchema {
          name: parameter.name.clone(),
        })?;
      let property = self.builder.build_property(schema, &parameter.external_name, &ctx)?;
      params.push(ParamDef {
        location: parameter.location,
        required: parameter.required,
        property: argument(property),
      });
    }
    Ok(params)
  }

  fn convert_body(&mut self, body: &RequestBody, operation: &Operation) -> Result<Option<ParamDef>, GeneratorError> {
    let ctx = NamingContext::operation(&operation.operation_id);

    for (content_key, media) in &body.content {
      if !is_json_media_type(content_key) {
        continue;
      }
      let Some(schema) = &media.schema else {
        continue;
      };
      let property = self.builder.build_property(schema, BODY_FIELD_NAME, &ctx)?;
      return Ok(Some(ParamDef {
        location: ParamLocation::Body,
        required: body.required,
        property: argument(property),
      }));
    }
    Ok(None)
  }

  /// Derives outputs from the lowest status code inside the success window
  /// that carries a JSON payload.
  fn convert_responses(&mut self, operation: &Operation) -> Result<Vec<OutputDef>, GeneratorError> {
    let ctx = NamingContext::operation(&operation.operation_id);

    let mut candidates: Vec<(u16, &crate::generator::document::Response)> = operation
      .responses
      .iter()
      .filter_map(|(code, response)| code.parse::<u16>().ok().map(|status| (status, response)))
      .filter(|(status, _)| SUCCESS_RANGE.contains(status))
      .collect();
    candidates.sort_by_key(|(status, _)| *status);

    for (status, response) in candidates {
      for (content_key, media) in &response.content {
        if !is_json_media_type(content_key) {
          continue;
        }
        let Some(schema) = &media.schema else {
          continue;
        };
        let property = self.builder.build_property(schema, RESPONSE_FIELD_NAME, &ctx)?;
        return Ok(vec![OutputDef {
          status,
          property: argument(property),
        }]);
      }
    }
    Ok(Vec::new())
  }
}

/// Argument position uses a lower-initial identifier.
fn argument(mut property: Property) -> Property {
  property.name = to_identifier(false, &[&property.name]);
  property
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generator::{
    document::Document,
    ir::{Primitive, TypeRef},
    resolver,
  };

  fn convert_first(yaml: &str) -> (TypeGraphBuilder, FunctionDef) {
    let document = Document::from_yaml(yaml).unwrap();
    let resolved = resolver::resolve(&document).unwrap();
    let (path, item) = resolved.paths.iter().next().unwrap();
    let (method, operation) = item.methods().into_iter().next().unwrap();

    let mut builder = TypeGraphBuilder::new();
    let function = {
      let mut converter = OperationConverter::new(&mut builder);
      converter.convert(path, method, operation).unwrap()
    };
    (builder, function)
  }

  #[test]
  fn test_petstore_list_function() {
    let (builder, function) = convert_first(
      r##"
openapi: 3.0.0
paths:
  /pets:
    get:
      operationId: listPets
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
        - name: fancy_query_arg
          in: query
          required: true
          schema:
            type: integer
      responses:
        "200":
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: "#/components/schemas/Pet"
components:
  schemas:
    Pet:
      type: object
      required: [id, name]
      properties:
        id:
          type: integer
        name:
          type: string
        tag:
          type: string
"##,
    );

    assert_eq!(function.name, "ListPets");
    assert_eq!(function.method, HttpMethod::Get);
    assert_eq!(function.path, "/pets");

    assert_eq!(function.inputs.len(), 2);
    let limit = &function.inputs[0];
    assert_eq!(limit.property.name, "limit");
    assert_eq!(limit.location, ParamLocation::Query);
    assert!(!limit.required);
    assert_eq!(limit.property.type_ref, TypeRef::Primitive(Primitive::Integer));

    let fancy = &function.inputs[1];
    assert_eq!(fancy.property.name, "fancyQueryArg");
    assert_eq!(fancy.property.source_name, "fancy_query_arg");
    assert!(fancy.required);
    assert_eq!(fancy.property.type_ref, TypeRef::Primitive(Primitive::Integer));

    assert_eq!(function.outputs.len(), 1);
    let output = &function.outputs[0];
    assert_eq!(output.status, 200);
    assert_eq!(
      output.property.type_ref,
      TypeRef::Array(Box::new(TypeRef::Object {
        name: "Pet".into(),
        alias: "Pet".into()
      }))
    );

    let pet = builder.registry().get("Pet").unwrap();
    assert_eq!(pet.fields.len(), 3);
  }

  #[test]
  fn test_path_parameter_function() {
    let (_, function) = convert_first(
      r##"
openapi: 3.0.0
paths:
  /pets/{petId}:
    get:
      operationId: showPetById
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: string
      responses: {}
"##,
    );

    assert_eq!(function.name, "ShowPetById");
    assert_eq!(function.inputs.len(), 1);
    let pet_id = &function.inputs[0];
    assert_eq!(pet_id.location, ParamLocation::Path);
    assert!(pet_id.required);
    assert_eq!(pet_id.property.type_ref, TypeRef::Primitive(Primitive::String));
    assert!(function.outputs.is_empty());
  }

  #[test]
  fn test_body_parameter_from_json_content() {
    let (builder, function) = convert_first(
      r##"
openapi: 3.0.0
paths:
  /pets:
    post:
      operationId: createPet
      requestBody:
        required: true
        content:
          text/plain:
            schema:
              type: string
          application/json:
            schema:
              $ref: "#/components/schemas/Pet"
      responses: {}
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
"##,
    );

    let body = function.body().unwrap();
    assert_eq!(body.location, ParamLocation::Body);
    assert!(body.required);
    assert_eq!(body.property.name, "request");
    assert_eq!(
      body.property.type_ref,
      TypeRef::Object {
        name: "Pet".into(),
        alias: "Pet".into()
      }
    );
    assert!(builder.registry().contains("Pet"));
  }

  #[test]
  fn test_output_uses_lowest_success_status() {
    let (_, function) = convert_first(
      r##"
openapi: 3.0.0
paths:
  /jobs:
    post:
      operationId: startJob
      responses:
        "500":
          content:
            application/json:
              schema:
                type: string
        "202":
          content:
            application/json:
              schema:
                type: string
        "201":
          content:
            application/json:
              schema:
                type: integer
        default:
          content:
            application/json:
              schema:
                type: boolean
"##,
    );

    assert_eq!(function.outputs.len(), 1);
    assert_eq!(function.outputs[0].status, 201);
    assert_eq!(
      function.outputs[0].property.type_ref,
      TypeRef::Primitive(Primitive::Integer)
    );
  }

  #[test]
  fn test_inline_body_named_from_operation() {
    let (builder, _) = convert_first(
      r##"
openapi: 3.0.0
paths:
  /pets:
    post:
      operationId: createPet
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                name:
                  type: string
      responses: {}
"##,
    );

    let request = builder.registry().get("CreatePetRequest").unwrap();
    assert_eq!(request.qualified_name, "CreatePetRequest");
    assert_eq!(request.fields.len(), 1);
  }

  #[test]
  fn test_parameter_without_schema_is_fatal() {
    let document = Document::from_yaml(
      r##"
openapi: 3.0.0
paths:
  /pets:
    get:
      operationId: listPets
      parameters:
        - name: limit
          in: query
      responses: {}
"##,
    )
    .unwrap();
    let resolved = resolver::resolve(&document).unwrap();
    let operation = resolved.paths["/pets"].get.as_ref().unwrap();

    let mut builder = TypeGraphBuilder::new();
    let mut converter = OperationConverter::new(&mut builder);
    let err = converter.convert("/pets", HttpMethod::Get, operation).unwrap_err();
    assert!(matches!(err, GeneratorError::MissingParameterSchema { name } if name == "limit"));
  }
}
