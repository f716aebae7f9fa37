use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::colors::ColorMode;

#[derive(Parser, Debug)]
#[command(name = "oas3-forge")]
#[command(author, version, about = "OpenAPI document resolver and code generator")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Generate source text from an OpenAPI document
  Generate(GenerateCommand),
  /// Parse and resolve a document, printing the result as JSON
  Inspect {
    /// Path or URL of the OpenAPI document
    #[arg(short, long, value_name = "FILE_OR_URL")]
    input: String,
  },
  /// List information from an OpenAPI document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Generation mode
  #[arg(short, long, value_enum, default_value = "dto")]
  pub mode: GenerateMode,

  /// Path or URL of the OpenAPI document
  #[arg(short, long, value_name = "FILE_OR_URL")]
  pub input: String,

  /// Destination file (standard output when omitted)
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Package name recorded in the generated file header
  #[arg(short, long, default_value = "api")]
  pub package: String,

  /// Render object types under their abbreviation aliases
  #[arg(long, default_value_t = false)]
  pub abbreviate: bool,

  /// Enable verbose output
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum GenerateMode {
  Client,
  Dto,
  Handlers,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in the document
  Operations {
    /// Path or URL of the OpenAPI document
    #[arg(short, long, value_name = "FILE_OR_URL")]
    input: String,
  },
}
