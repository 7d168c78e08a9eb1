use clap::{Parser, Subcommand};
use rotation_core::Config;

mod clipboard;
mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "rotation-cli", version, about = "Rotation builder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and search the ability catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Compile a timeline JSON file into an exported rotation
    Compile(commands::convert::CompileArgs),
    /// Rebuild a timeline JSON file from an exported rotation
    Decompile(commands::convert::DecompileArgs),
    /// Interactive rotation editing session
    Edit(commands::edit::EditArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    logging::init(&config.log.level);

    let result = match cli.command {
        Commands::Catalog { action } => commands::catalog::run(action, &config),
        Commands::Compile(args) => commands::convert::compile(args),
        Commands::Decompile(args) => commands::convert::decompile(args),
        Commands::Edit(args) => commands::edit::run(args, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
