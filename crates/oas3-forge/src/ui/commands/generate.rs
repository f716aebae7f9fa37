use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    codegen::{CodeEmitter, EmitMode, EmitOptions},
    orchestrator::{GenerationStats, Orchestrator},
  },
  ui::{Colors, GenerateCommand, GenerateMode},
  utils::spec::DocumentLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub mode: GenerateMode,
  pub input: String,
  pub output: Option<PathBuf>,
  pub package: String,
  pub abbreviate: bool,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  #[must_use]
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      mode,
      input,
      output,
      package,
      abbreviate,
      verbose,
      quiet,
    } = command;

    Self {
      mode,
      input,
      output,
      package,
      abbreviate,
      verbose,
      quiet,
    }
  }

  fn emit_mode(&self) -> EmitMode {
    match self.mode {
      GenerateMode::Client => EmitMode::Client,
      GenerateMode::Dto => EmitMode::Dto,
      GenerateMode::Handlers => EmitMode::Handlers,
    }
  }

  fn emit_options(&self) -> EmitOptions {
    EmitOptions {
      package: self.package.clone(),
      abbreviate: self.abbreviate,
    }
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      eprintln!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      eprintln!(
        "            {:<22} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI document from: {}", self.config.input)
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    let message = match self.config.mode {
      GenerateMode::Client => "Generating client...",
      GenerateMode::Dto => "Generating data-transfer objects...",
      GenerateMode::Handlers => "Generating server handlers...",
    };
    self.info(&message.with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet || !self.config.verbose {
      return;
    }
    self.stat("Types built:", stats.types_built.to_string());
    self.stat("Functions built:", stats.functions_built.to_string());
  }

  fn log_writing(&self, destination: &std::path::Path) {
    self.info(
      &format!("Writing to: {}", destination.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      let message = match self.config.mode {
        GenerateMode::Client => "Successfully generated client",
        GenerateMode::Dto => "Successfully generated data-transfer objects",
        GenerateMode::Handlers => "Successfully generated server handlers",
      };
      eprintln!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let loader = DocumentLoader::open(&config.input).await?;
  let document = loader.parse()?;

  logger.log_generating();
  let orchestrator = Orchestrator::new(document);
  let ir = orchestrator.build_ir()?;
  logger.print_statistics(&GenerationStats::from_ir(&ir));

  let options = config.emit_options();
  let emitter = CodeEmitter::new(&ir, &options);
  let code = emitter.emit_with_header(config.emit_mode(), loader.origin())?;

  match &config.output {
    Some(path) => {
      logger.log_writing(path);
      if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
      }
      tokio::fs::write(path, code).await?;
    }
    None => println!("{code}"),
  }

  logger.log_success();
  Ok(())
}
