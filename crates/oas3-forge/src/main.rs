use clap::Parser;

use oas3_forge::{
  generator::errors::GeneratorError,
  ui::{self, Cli, Commands, Colors, ListCommands, colors},
};

#[tokio::main]
async fn main() {
  let cli = Cli::parse();

  if let Err(err) = run(cli).await {
    eprintln!("error: {err:#}");
    let code = err.downcast_ref::<GeneratorError>().map_or(1, GeneratorError::exit_code);
    std::process::exit(code);
  }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
  let colors = Colors::new(colors::colors_enabled(cli.color));

  match cli.command {
    Commands::Generate(command) => {
      let config = ui::commands::GenerateConfig::from_command(command);
      ui::commands::generate_code(config, &colors).await
    }
    Commands::Inspect { input } => ui::commands::inspect_document(&input).await,
    Commands::List { list_command } => match list_command {
      ListCommands::Operations { input } => ui::commands::list_operations(&input, &colors).await,
    },
  }
}
