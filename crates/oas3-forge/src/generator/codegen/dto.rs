//! Data-transfer-object rendering: one serde struct per registry entry.

use proc_macro2::TokenStream;
use quote::quote;

use super::{EmitOptions, field_ident, field_type, type_ident};
use crate::generator::{
  errors::GeneratorError,
  ir::{Ir, ObjectType},
};

pub(super) fn emit(ir: &Ir, options: &EmitOptions) -> Result<TokenStream, GeneratorError> {
  let definitions = type_definitions(ir, options)?;
  Ok(quote! {
    use serde::{Deserialize, Serialize};

    #definitions
  })
}

/// Struct definitions for every registry entry, in canonical-name order.
/// Shared with the client and handlers modes.
pub(super) fn type_definitions(ir: &Ir, options: &EmitOptions) -> Result<TokenStream, GeneratorError> {
  let mut out = TokenStream::new();
  for object in ir.registry.iter() {
    out.extend(struct_definition(object, options)?);
  }
  Ok(out)
}

fn struct_definition(object: &ObjectType, options: &EmitOptions) -> Result<TokenStream, GeneratorError> {
  let display = if options.abbreviate { &object.alias } else { &object.name };
  let ident = type_ident(display)?;
  let doc = object.qualified_name.as_str();

  let mut fields = TokenStream::new();
  for field in &object.fields {
    let name = field_ident(&field.name);
    let ty = field_type(field, options.abbreviate)?;
    let rename = field.source_name.as_str();
    let attrs = if field.required {
      quote! { #[serde(rename = #rename)] }
    } else {
      quote! { #[serde(rename = #rename, skip_serializing_if = "Option::is_none")] }
    };
    fields.extend(quote! {
      #attrs
      pub #name: #ty,
    });
  }

  Ok(quote! {
    #[doc = #doc]
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct #ident {
      #fields
    }
  })
}
