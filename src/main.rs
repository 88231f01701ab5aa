//! worldclock - terminal world clock and settings CLI
//!
//! `worldclock run` draws the clocks in the terminal and reads commands from
//! stdin; every other invocation is dispatched to the command registry.

use std::{fs, path::PathBuf, process};

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Instrument, info, info_span, instrument, warn};
use worldclock::{
    Result, WorldClockError,
    cli::{CliService, HELP_CATEGORY, formatting::format_error},
    config::ConfigPaths,
    config_store::ConfigStore,
    render::TerminalSurface,
    tracing_config,
    ui::{App, INPUT_HELP, InputLine, parse_input_line},
};

#[derive(Parser)]
#[command(name = "worldclock")]
#[command(about = "World clock display and settings manager")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive clock display
    Run,
    /// Run a registry command: <category> <command> [args]
    #[command(external_subcommand)]
    Registry(Vec<String>),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let is_run = matches!(cli.command, Some(Commands::Run));
    if is_run {
        tracing_config::init_with_file().map_err(WorldClockError::logging)?;
    } else {
        tracing_config::init_cli_mode().map_err(WorldClockError::logging)?;
    }

    let settings_file = match cli.settings {
        Some(path) => path,
        None => default_settings_file()?,
    };
    let store = ConfigStore::file(settings_file);

    match cli.command {
        Some(Commands::Run) => {
            run_display(store)
                .instrument(info_span!("worldclock_run"))
                .await
        }
        Some(Commands::Registry(args)) => {
            run_cli_command(store, &args).await;
            Ok(())
        }
        None => {
            run_cli_command(store, &[]).await;
            Ok(())
        }
    }
}

/// Runs the display until `quit` is typed or stdin closes.
async fn run_display(store: ConfigStore) -> Result<()> {
    info!("Starting world clock display");
    let handle = App::new(store, TerminalSurface::stdout()).start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input_line(&line) {
            Some(InputLine::Quit) => break,
            Some(InputLine::Event(event)) => {
                if !handle.send(event) {
                    warn!("Display stopped unexpectedly");
                    break;
                }
            }
            None => {
                if !line.trim().is_empty() {
                    eprintln!("{}", format_error(&format!("Unknown input, try: {INPUT_HELP}")));
                }
            }
        }
    }

    handle.dispose().await;
    Ok(())
}

/// Executes registry commands through the CliService.
///
/// `help` is used when no category is given. Exits the process with status
/// 1 when the command fails.
async fn run_cli_command(store: ConfigStore, args: &[String]) {
    let cli_service = CliService::new(store);

    let category = args.first().map(|s| s.as_str()).unwrap_or(HELP_CATEGORY);
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("");
    let command_args = args.get(2..).unwrap_or(&[]);

    match cli_service
        .execute_command(category, command, command_args)
        .await
    {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&WorldClockError::from(e).to_string()));
            process::exit(1);
        }
    }
}

#[instrument]
fn default_settings_file() -> Result<PathBuf> {
    let config_dir = ConfigPaths::config_dir()?;
    if !config_dir.exists() {
        info!("Creating config directory: {}", config_dir.display());
        fs::create_dir_all(&config_dir)
            .map_err(|e| WorldClockError::settings_directory(e, &config_dir))?;
    }

    Ok(ConfigPaths::settings_file()?)
}
