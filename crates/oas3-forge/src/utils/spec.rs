//! Document acquisition: local files are memory-mapped, HTTP(S) inputs are
//! fetched once into memory. The syntax is chosen by file extension and
//! defaults to JSON.

use std::{ffi::OsStr, path::Path};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use crate::generator::{document::Document, errors::GeneratorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }
}

enum SourceData {
  Mapped(AsyncMmapFile),
  Fetched(Vec<u8>),
}

impl std::fmt::Debug for SourceData {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SourceData::Mapped(_) => f.debug_tuple("Mapped").finish(),
      SourceData::Fetched(bytes) => f.debug_tuple("Fetched").field(bytes).finish(),
    }
  }
}

#[derive(Debug)]
pub struct DocumentLoader {
  data: SourceData,
  format: SpecFormat,
  origin: String,
}

impl DocumentLoader {
  /// Opens `input` as a local path, or fetches it when it is an HTTP(S)
  /// URL.
  pub async fn open(input: &str) -> Result<Self, GeneratorError> {
    if input.starts_with("http://") || input.starts_with("https://") {
      Self::fetch(input).await
    } else {
      Self::open_file(Path::new(input)).await
    }
  }

  async fn open_file(path: &Path) -> Result<Self, GeneratorError> {
    let format = path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(SpecFormat::default(), SpecFormat::from_extension);

    let file = AsyncMmapFile::open(path)
      .await
      .map_err(|err| GeneratorError::Acquisition {
        source_name: path.display().to_string(),
        detail: err.to_string(),
      })?;

    Ok(Self {
      data: SourceData::Mapped(file),
      format,
      origin: path.display().to_string(),
    })
  }

  async fn fetch(url: &str) -> Result<Self, GeneratorError> {
    fn acquisition(url: &str, err: &reqwest::Error) -> GeneratorError {
      GeneratorError::Acquisition {
        source_name: url.to_string(),
        detail: err.to_string(),
      }
    }

    let format = url
      .rsplit('.')
      .next()
      .map_or(SpecFormat::default(), SpecFormat::from_extension);

    let response = reqwest::get(url).await.map_err(|err| acquisition(url, &err))?;
    let response = response.error_for_status().map_err(|err| acquisition(url, &err))?;
    let body = response.bytes().await.map_err(|err| acquisition(url, &err))?;

    Ok(Self {
      data: SourceData::Fetched(body.to_vec()),
      format,
      origin: url.to_string(),
    })
  }

  /// Deserializes the acquired bytes into the document model.
  pub fn parse(&self) -> Result<Document, GeneratorError> {
    let bytes = match &self.data {
      SourceData::Mapped(file) => file.as_slice(),
      SourceData::Fetched(body) => body.as_slice(),
    };

    match self.format {
      SpecFormat::Json => Document::from_json(bytes),
      SpecFormat::Yaml => {
        let text = std::str::from_utf8(bytes).map_err(|err| GeneratorError::Deserialize {
          detail: err.to_string(),
        })?;
        Document::from_yaml(text)
      }
    }
  }

  #[must_use]
  pub fn origin(&self) -> &str {
    &self.origin
  }

  #[must_use]
  pub fn format(&self) -> SpecFormat {
    self.format
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[test]
  fn test_format_from_extension() {
    assert_eq!(SpecFormat::from_extension("yaml"), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_extension("yml"), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_extension("json"), SpecFormat::Json);
    assert_eq!(SpecFormat::from_extension("txt"), SpecFormat::Json);
  }

  #[tokio::test]
  async fn test_open_local_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
      file,
      "openapi: 3.0.0\ninfo:\n  title: Petstore\n  version: 1.0.0\npaths: {{}}\n"
    )
    .unwrap();
    file.flush().unwrap();

    let loader = DocumentLoader::open(file.path().to_str().unwrap()).await.unwrap();
    assert_eq!(loader.format(), SpecFormat::Yaml);

    let document = loader.parse().unwrap();
    assert_eq!(document.info.title, "Petstore");
  }

  #[tokio::test]
  async fn test_missing_file_is_acquisition_error() {
    let err = DocumentLoader::open("/no/such/file.yaml").await.unwrap_err();
    assert!(matches!(err, GeneratorError::Acquisition { .. }));
    assert_eq!(err.exit_code(), 1);
  }

  #[tokio::test]
  async fn test_malformed_document_is_deserialize_error() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{{\"paths\": 12}}").unwrap();
    file.flush().unwrap();

    let loader = DocumentLoader::open(file.path().to_str().unwrap()).await.unwrap();
    let err = loader.parse().unwrap_err();
    assert!(matches!(err, GeneratorError::Deserialize { .. }));
    assert_eq!(err.exit_code(), 2);
  }
}
