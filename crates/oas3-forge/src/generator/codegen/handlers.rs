//! Server-handler rendering: a trait with one method per function, plus
//! per-operation parameter structs whose extraction code follows each
//! type's parse-from-string contract.

use proc_macro2::TokenStream;
use quote::quote;

use super::{EmitOptions, dto, field_ident, param_type, parse_type, type_ident};
use crate::generator::{
  errors::GeneratorError,
  ir::{FunctionDef, Ir, ParamDef, ParamLocation, ParseKind},
  naming::to_identifier,
};

pub(super) fn emit(ir: &Ir, options: &EmitOptions) -> Result<TokenStream, GeneratorError> {
  let definitions = dto::type_definitions(ir, options)?;
  let trait_ident = type_ident(&format!("{}Handlers", to_identifier(true, &[&ir.title])))?;

  let mut signatures = TokenStream::new();
  let mut param_structs = TokenStream::new();
  for function in &ir.functions {
    signatures.extend(handler_signature(function, options)?);
    param_structs.extend(params_struct(function, options)?);
  }

  Ok(quote! {
    use serde::{Deserialize, Serialize};

    #definitions

    /// Raised while recovering typed parameters from their wire strings.
    #[derive(Debug)]
    pub enum ParameterError {
      Missing { field: &'static str },
      Invalid { field: &'static str, detail: String },
    }

    impl std::fmt::Display for ParameterError {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
          Self::Missing { field } => write!(f, "missing required parameter {field}"),
          Self::Invalid { field, detail } => write!(f, "invalid parameter {field}: {detail}"),
        }
      }
    }

    impl std::error::Error for ParameterError {}

    pub trait #trait_ident {
      type Error;

      #signatures
    }

    #param_structs
  })
}

fn handler_signature(function: &FunctionDef, options: &EmitOptions) -> Result<TokenStream, GeneratorError> {
  let method_ident = field_ident(&function.name);

  let mut args = TokenStream::new();
  for input in &function.inputs {
    let arg = field_ident(&input.property.name);
    let ty = param_type(input, options.abbreviate)?;
    args.extend(quote! { #arg: #ty, });
  }

  let return_ty = match function.outputs.first() {
    Some(output) => parse_type(&output.property.type_ref.display_name(options.abbreviate))?,
    None => parse_type("()")?,
  };

  Ok(quote! {
    fn #method_ident(
      &self,
      #args
    ) -> impl std::future::Future<Output = Result<#return_ty, Self::Error>> + Send;
  })
}

/// A `{Name}Params` struct with a `from_query` constructor for every
/// function that takes query parameters.
fn params_struct(function: &FunctionDef, options: &EmitOptions) -> Result<TokenStream, GeneratorError> {
  let query_params: Vec<&ParamDef> = function.params_in(ParamLocation::Query).collect();
  if query_params.is_empty() {
    return Ok(TokenStream::new());
  }

  let struct_ident = type_ident(&format!("{}Params", function.name))?;

  let mut fields = TokenStream::new();
  let mut extractions = TokenStream::new();
  let mut names = TokenStream::new();
  for param in query_params {
    let name = field_ident(&param.property.name);
    let ty = param_type(param, options.abbreviate)?;
    fields.extend(quote! { pub #name: #ty, });
    extractions.extend(extraction(param, options)?);
    names.extend(quote! { #name, });
  }

  Ok(quote! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct #struct_ident {
      #fields
    }

    impl #struct_ident {
      /// Recovers typed parameters from raw query values.
      pub fn from_query(mut lookup: impl FnMut(&str) -> Option<String>) -> Result<Self, ParameterError> {
        #extractions
        Ok(Self { #names })
      }
    }
  })
}

fn extraction(param: &ParamDef, options: &EmitOptions) -> Result<TokenStream, GeneratorError> {
  let name = field_ident(&param.property.name);
  let wire = param.property.source_name.as_str();

  let tokens = match (param.property.type_ref.parse_kind(), param.required) {
    (ParseKind::Identity, true) => quote! {
      let #name = lookup(#wire).ok_or(ParameterError::Missing { field: #wire })?;
    },
    (ParseKind::Identity, false) => quote! {
      let #name = lookup(#wire);
    },
    (ParseKind::FromStr, required) => {
      let base = parse_type(&param.property.type_ref.display_name(options.abbreviate))?;
      let parse = quote! {
        raw.parse::<#base>().map_err(|err| ParameterError::Invalid {
          field: #wire,
          detail: err.to_string(),
        })?
      };
      if required {
        quote! {
          let raw = lookup(#wire).ok_or(ParameterError::Missing { field: #wire })?;
          let #name = #parse;
        }
      } else {
        quote! {
          let #name = match lookup(#wire) {
            Some(raw) => Some(#parse),
            None => None,
          };
        }
      }
    }
    (ParseKind::Unsupported, _) => {
      return Err(GeneratorError::Emission {
        detail: format!("query parameter {wire:?} has no string form and cannot be extracted"),
      });
    }
  };
  Ok(tokens)
}
