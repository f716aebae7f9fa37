//! Orchestration of the generation pipeline.
//!
//! A single forward pass: resolve the document, seed the registry from the
//! component registries, convert each operation, then freeze the IR. The
//! IR is immutable from that point on and can feed any number of emission
//! passes.

use super::{
  converter::{NamingContext, OperationConverter, TypeGraphBuilder},
  document::{Document, is_json_media_type},
  errors::GeneratorError,
  ir::Ir,
  resolver,
};

pub struct Orchestrator {
  document: Document,
}

/// Counters surfaced by the generate command.
#[derive(Debug, Clone, Copy)]
pub struct GenerationStats {
  pub types_built: usize,
  pub functions_built: usize,
}

impl GenerationStats {
  #[must_use]
  pub fn from_ir(ir: &Ir) -> Self {
    Self {
      types_built: ir.registry.len(),
      functions_built: ir.functions.len(),
    }
  }
}

impl Orchestrator {
  #[must_use]
  pub fn new(document: Document) -> Self {
    Self { document }
  }

  /// Resolves the document without building the IR, for inspection output.
  pub fn resolve_document(&self) -> Result<Document, GeneratorError> {
    resolver::resolve(&self.document)
  }

  /// Runs resolution and the IR build. Paths and methods are visited in
  /// sorted/fixed order and functions are sorted by generated name, so two
  /// runs over identical input produce identical IR orderings.
  pub fn build_ir(&self) -> Result<Ir, GeneratorError> {
    let resolved = resolver::resolve(&self.document)?;
    let mut builder = TypeGraphBuilder::new();

    Self::seed_components(&resolved, &mut builder)?;

    let mut functions = Vec::new();
    {
      let mut converter = OperationConverter::new(&mut builder);
      let mut paths: Vec<_> = resolved.paths.iter().collect();
      paths.sort_by(|(a, _), (b, _)| a.cmp(b));

      for (path, item) in paths {
        for (method, operation) in item.methods() {
          functions.push(converter.convert(path, method, operation)?);
        }
      }
    }
    functions.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Ir {
      title: resolved.info.title.clone(),
      version: resolved.info.version.clone(),
      registry: builder.into_registry(),
      functions,
    })
  }

  /// Folds every named component payload into the registry so component
  /// types are present even when nothing on a path references them.
  fn seed_components(resolved: &Document, builder: &mut TypeGraphBuilder) -> Result<(), GeneratorError> {
    for (name, schema) in &resolved.components.schemas {
      builder.build_property(schema, name, &NamingContext::root())?;
    }

    for (name, body) in &resolved.components.request_bodies {
      for (content_key, media) in &body.content {
        if is_json_media_type(content_key)
          && let Some(schema) = &media.schema
        {
          builder.build_property(schema, name, &NamingContext::root())?;
        }
      }
    }

    for (name, response) in &resolved.components.responses {
      for (content_key, media) in &response.content {
        if is_json_media_type(content_key)
          && let Some(schema) = &media.schema
        {
          builder.build_property(schema, name, &NamingContext::root())?;
        }
      }
    }

    Ok(())
  }
}
