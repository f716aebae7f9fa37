//! Client rendering: a `reqwest`-backed struct with one async method per
//! function, plus the shared type definitions.

use proc_macro2::TokenStream;
use quote::quote;

use super::{EmitOptions, dto, field_ident, param_type, parse_type, type_ident};
use crate::generator::{
  errors::GeneratorError,
  ir::{FunctionDef, HttpMethod, Ir, ParamDef, ParamLocation},
  naming::to_identifier,
};

pub(super) fn emit(ir: &Ir, options: &EmitOptions) -> Result<TokenStream, GeneratorError> {
  let definitions = dto::type_definitions(ir, options)?;
  let client_ident = type_ident(&format!("{}Client", to_identifier(true, &[&ir.title])))?;

  let mut methods = TokenStream::new();
  for function in &ir.functions {
    methods.extend(client_method(function, options)?);
  }

  Ok(quote! {
    use serde::{Deserialize, Serialize};

    #definitions

    pub struct #client_ident {
      base_url: reqwest::Url,
      http: reqwest::Client,
    }

    impl #client_ident {
      #[must_use]
      pub fn new(base_url: reqwest::Url) -> Self {
        Self {
          base_url,
          http: reqwest::Client::new(),
        }
      }

      #methods
    }
  })
}

fn client_method(function: &FunctionDef, options: &EmitOptions) -> Result<TokenStream, GeneratorError> {
  let method_ident = field_ident(&function.name);

  let mut args = TokenStream::new();
  for input in &function.inputs {
    let arg = field_ident(&input.property.name);
    let ty = param_type(input, options.abbreviate)?;
    args.extend(quote! { #arg: #ty, });
  }

  // Generated locals carry a request_/http_ prefix so they cannot collide
  // with argument names derived from the document.
  let path_setup = path_setup(function);
  let (query_setup, query_apply) = query_setup(function);
  let body_apply = match function.body() {
    Some(body) => {
      let arg = field_ident(&body.property.name);
      quote! { http_request = http_request.json(&#arg); }
    }
    None => TokenStream::new(),
  };

  let verb = match function.method {
    HttpMethod::Get => quote!(get),
    HttpMethod::Post => quote!(post),
    HttpMethod::Put => quote!(put),
    HttpMethod::Patch => quote!(patch),
    HttpMethod::Delete => quote!(delete),
  };

  let needs_builder = function.body().is_some() || function.params_in(ParamLocation::Query).next().is_some();
  let request_binding = if needs_builder {
    quote! { let mut http_request = self.http.#verb(request_url); }
  } else {
    quote! { let http_request = self.http.#verb(request_url); }
  };

  let (return_ty, send) = match function.outputs.first() {
    Some(output) => {
      let ty = parse_type(&output.property.type_ref.display_name(options.abbreviate))?;
      let send = quote! {
        let http_response = http_request.send().await?.error_for_status()?;
        http_response.json::<#ty>().await
      };
      (quote! { #ty }, send)
    }
    None => {
      let send = quote! {
        http_request.send().await?.error_for_status()?;
        Ok(())
      };
      (quote! { () }, send)
    }
  };

  Ok(quote! {
    pub async fn #method_ident(&self, #args) -> Result<#return_ty, reqwest::Error> {
      #path_setup
      let mut request_url = self.base_url.clone();
      request_url.set_path(&request_path);
      #query_setup
      #request_binding
      #query_apply
      #body_apply
      #send
    }
  })
}

/// Path-template substitution: each `{name}` placeholder is replaced with
/// the rendered argument value.
fn path_setup(function: &FunctionDef) -> TokenStream {
  let path = function.path.as_str();
  if !function.has_path_params() {
    return quote! { let request_path = String::from(#path); };
  }

  let mut substitutions = TokenStream::new();
  for param in function.params_in(ParamLocation::Path) {
    let arg = field_ident(&param.property.name);
    let placeholder = format!("{{{}}}", param.property.source_name);
    if param.required {
      substitutions.extend(quote! {
        request_path = request_path.replace(#placeholder, &#arg.to_string());
      });
    } else {
      substitutions.extend(quote! {
        if let Some(param_value) = &#arg {
          request_path = request_path.replace(#placeholder, &param_value.to_string());
        }
      });
    }
  }

  quote! {
    let mut request_path = String::from(#path);
    #substitutions
  }
}

fn query_setup(function: &FunctionDef) -> (TokenStream, TokenStream) {
  let query_params: Vec<&ParamDef> = function.params_in(ParamLocation::Query).collect();
  if query_params.is_empty() {
    return (TokenStream::new(), TokenStream::new());
  }

  let mut pushes = TokenStream::new();
  for param in query_params {
    let arg = field_ident(&param.property.name);
    let wire = param.property.source_name.as_str();
    if param.required {
      pushes.extend(quote! {
        query_pairs.push((#wire, #arg.to_string()));
      });
    } else {
      pushes.extend(quote! {
        if let Some(param_value) = &#arg {
          query_pairs.push((#wire, param_value.to_string()));
        }
      });
    }
  }

  let setup = quote! {
    let mut query_pairs: Vec<(&str, String)> = Vec::new();
    #pushes
  };
  let apply = quote! { http_request = http_request.query(&query_pairs); };
  (setup, apply)
}
