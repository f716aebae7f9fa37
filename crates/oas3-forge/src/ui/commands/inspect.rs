use crate::{generator::orchestrator::Orchestrator, utils::spec::DocumentLoader};

/// Parses and resolves a document, printing the resolved tree as JSON.
/// Meant for debugging reference resolution.
pub async fn inspect_document(input: &str) -> anyhow::Result<()> {
  let loader = DocumentLoader::open(input).await?;
  let document = loader.parse()?;
  let resolved = Orchestrator::new(document).resolve_document()?;

  println!("{}", serde_json::to_string_pretty(&resolved)?);
  Ok(())
}
