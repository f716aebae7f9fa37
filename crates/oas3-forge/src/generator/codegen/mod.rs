//! Emission backend: renders the finished IR as Rust source text.
//!
//! Token streams are assembled with `quote`, validated through `syn`, and
//! formatted with `prettyplease`, so the backend can never write output
//! that fails to tokenize. The IR is read-only here; one IR can feed all
//! three modes in a single invocation.

pub mod client;
pub mod dto;
pub mod handlers;

use proc_macro2::{Span, TokenStream};

use super::{
  errors::GeneratorError,
  ir::{Ir, ParamDef, Property},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
  Client,
  Dto,
  Handlers,
}

impl EmitMode {
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Client => "client",
      Self::Dto => "dto",
      Self::Handlers => "handlers",
    }
  }
}

/// Backend configuration, passed in explicitly rather than read from
/// process-wide state.
#[derive(Debug, Clone)]
pub struct EmitOptions {
  /// Name recorded in the generated file header.
  pub package: String,
  /// Render object types under their abbreviation aliases.
  pub abbreviate: bool,
}

impl Default for EmitOptions {
  fn default() -> Self {
    Self {
      package: "api".to_string(),
      abbreviate: false,
    }
  }
}

pub struct CodeEmitter<'a> {
  ir: &'a Ir,
  options: &'a EmitOptions,
}

impl<'a> CodeEmitter<'a> {
  #[must_use]
  pub fn new(ir: &'a Ir, options: &'a EmitOptions) -> Self {
    Self { ir, options }
  }

  /// Renders the IR in the requested mode as formatted Rust source.
  pub fn emit(&self, mode: EmitMode) -> Result<String, GeneratorError> {
    let tokens = match mode {
      EmitMode::Client => client::emit(self.ir, self.options)?,
      EmitMode::Dto => dto::emit(self.ir, self.options)?,
      EmitMode::Handlers => handlers::emit(self.ir, self.options)?,
    };
    render(tokens)
  }

  /// Renders with a file header carrying provenance metadata.
  pub fn emit_with_header(&self, mode: EmitMode, source_path: &str) -> Result<String, GeneratorError> {
    let code = self.emit(mode)?;
    Ok(format!(
      "//! AUTO-GENERATED CODE - DO NOT EDIT!\n//!\n//! {title}\n//! Package: {package}\n//! Mode: {mode}\n//! Source: {source}\n//! Version: {version}\n//! Generated by `oas3-forge`\n\n{code}",
      title = self.ir.title,
      package = self.options.package,
      mode = mode.as_str(),
      source = source_path,
      version = self.ir.version,
    ))
  }
}

fn render(tokens: TokenStream) -> Result<String, GeneratorError> {
  let file = syn::parse2(tokens).map_err(|err| GeneratorError::Emission {
    detail: format!("generated tokens do not form a valid file: {err}"),
  })?;
  Ok(prettyplease::unparse(&file))
}

const RESERVED_WORDS: &[&str] = &[
  "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn", "else", "enum",
  "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move",
  "mut", "override", "priv", "pub", "ref", "return", "static", "struct", "trait", "true", "try", "type", "typeof",
  "union", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Snake-cases a generated identifier, keeping acronym runs intact
/// (`petId` -> `pet_id`, `XMLParser` -> `xml_parser`).
pub(crate) fn to_snake_case(name: &str) -> String {
  let chars: Vec<char> = name.chars().collect();
  let mut out = String::with_capacity(name.len() + 4);

  for (i, &ch) in chars.iter().enumerate() {
    if ch.is_ascii_uppercase() {
      let prev_is_lower = i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
      let next_is_lower = i + 1 < chars.len() && chars[i + 1].is_ascii_lowercase();
      if i > 0 && (prev_is_lower || next_is_lower) && !out.ends_with('_') {
        out.push('_');
      }
      out.push(ch.to_ascii_lowercase());
    } else {
      out.push(ch);
    }
  }
  out
}

/// A snake-case field or method identifier, escaping keywords and guarding
/// against empty or digit-leading names.
pub(crate) fn field_ident(name: &str) -> syn::Ident {
  let mut snake = to_snake_case(name);
  if snake.is_empty() {
    snake = "value".to_string();
  }
  if snake.starts_with(|c: char| c.is_ascii_digit()) {
    snake.insert(0, '_');
  }
  if matches!(snake.as_str(), "self" | "Self" | "super" | "crate") {
    snake.push('_');
    return syn::Ident::new(&snake, Span::call_site());
  }
  if RESERVED_WORDS.contains(&snake.as_str()) {
    return syn::Ident::new_raw(&snake, Span::call_site());
  }
  syn::Ident::new(&snake, Span::call_site())
}

pub(crate) fn type_ident(name: &str) -> Result<syn::Ident, GeneratorError> {
  syn::parse_str(name).map_err(|_| GeneratorError::Emission {
    detail: format!("generated name {name:?} is not a valid type identifier"),
  })
}

pub(crate) fn parse_type(text: &str) -> Result<syn::Type, GeneratorError> {
  syn::parse_str(text).map_err(|err| GeneratorError::Emission {
    detail: format!("generated type `{text}` is not valid: {err}"),
  })
}

/// The rendered type of an object field, `Option`-wrapped when the field is
/// not required.
pub(crate) fn field_type(property: &Property, abbreviate: bool) -> Result<syn::Type, GeneratorError> {
  let base = property.type_ref.display_name(abbreviate);
  if property.required {
    parse_type(&base)
  } else {
    parse_type(&format!("Option<{base}>"))
  }
}

/// The rendered type of a function input, `Option`-wrapped when the
/// parameter is not required.
pub(crate) fn param_type(param: &ParamDef, abbreviate: bool) -> Result<syn::Type, GeneratorError> {
  let base = param.property.type_ref.display_name(abbreviate);
  if param.required {
    parse_type(&base)
  } else {
    parse_type(&format!("Option<{base}>"))
  }
}
