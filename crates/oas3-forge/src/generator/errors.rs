//! Error taxonomy for the generation pipeline.
//!
//! Every failure class is fatal: the pipeline is all-or-nothing and no
//! partial output is considered valid. The core never terminates the
//! process itself; the CLI boundary maps each class to a distinguishing
//! exit code.

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
  /// Input acquisition failed (file not found, network failure).
  #[error("failed to read document from {source_name}: {detail}")]
  Acquisition { source_name: String, detail: String },

  /// The document could not be deserialized. The detail carries the
  /// underlying parser message, including the path to the offending node.
  #[error("failed to parse document: {detail}")]
  Deserialize { detail: String },

  /// A `$ref` pointer names a component that exists nowhere in the document.
  #[error("unresolved reference {ref_path:?}: no component named {name:?} in document")]
  UnresolvedReference { ref_path: String, name: String },

  /// A `$ref` pointer reaches back into a schema currently being resolved.
  #[error("circular reference through {name:?}: recursive schemas are not supported")]
  CircularReference { name: String },

  /// A schema declares a type outside the supported set.
  #[error("unsupported schema type {type_name:?} for {field:?}")]
  UnsupportedType { type_name: String, field: String },

  /// An array schema without an `items` definition has no element type.
  #[error("array schema for {field:?} has no items definition")]
  MissingItems { field: String },

  /// A parameter carries neither a `$ref` nor a schema.
  #[error("parameter {name:?} has no schema")]
  MissingParameterSchema { name: String },

  /// The emission backend failed to render the IR.
  #[error("emission failed: {detail}")]
  Emission { detail: String },
}

impl GeneratorError {
  /// Process exit code for this failure class. Useful for scripting, not
  /// semantically load-bearing.
  #[must_use]
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::Acquisition { .. } => 1,
      Self::Deserialize { .. } => 2,
      Self::UnresolvedReference { .. } | Self::CircularReference { .. } => 3,
      Self::UnsupportedType { .. } | Self::MissingItems { .. } | Self::MissingParameterSchema { .. } => 4,
      Self::Emission { .. } => 5,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_exit_codes_distinguish_failure_classes() {
    let acquisition = GeneratorError::Acquisition {
      source_name: "spec.yaml".into(),
      detail: "no such file".into(),
    };
    let deserialize = GeneratorError::Deserialize { detail: "bad".into() };
    let resolution = GeneratorError::UnresolvedReference {
      ref_path: "#/components/schemas/Pet".into(),
      name: "Pet".into(),
    };
    let unsupported = GeneratorError::UnsupportedType {
      type_name: "null".into(),
      field: "status".into(),
    };
    let emission = GeneratorError::Emission { detail: "bad".into() };

    let codes = [
      acquisition.exit_code(),
      deserialize.exit_code(),
      resolution.exit_code(),
      unsupported.exit_code(),
      emission.exit_code(),
    ];
    assert_eq!(codes, [1, 2, 3, 4, 5]);
  }

  #[test]
  fn test_circular_reference_shares_resolution_class() {
    let circular = GeneratorError::CircularReference { name: "Node".into() };
    assert_eq!(circular.exit_code(), 3);
  }

  #[test]
  fn test_unsupported_type_message_names_offender() {
    let err = GeneratorError::UnsupportedType {
      type_name: "null".into(),
      field: "status".into(),
    };
    assert!(err.to_string().contains("\"null\""));
  }
}
