use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::naming::to_identifier,
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::DocumentLoader,
};

pub async fn list_operations(input: &str, colors: &Colors) -> anyhow::Result<()> {
  let loader = DocumentLoader::open(input).await?;
  let document = loader.parse()?;

  let mut operations = Vec::new();
  for (path, item) in &document.paths {
    for (method, operation) in item.methods() {
      let name = to_identifier(true, &[&operation.operation_id]);
      operations.push((name, method.to_string(), path.clone()));
    }
  }
  operations.sort_by(|a, b| a.0.cmp(&b.0));

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  header.add_cell(Cell::new("OPERATION").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new("METHOD").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new("PATH").fg(IntoComfyColor::into(colors.label())));
  table.set_header(header);

  for (name, method, path) in operations {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(method)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(path).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");
  Ok(())
}
