use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use biprism_store::JsonFileStore;
use clap::{Parser, Subcommand};
use commands::{
    reset,
    run::{self, RunArgs},
    set::{self, SetArgs},
    show,
    version::{self, VersionArgs},
};
use config::SimConfig;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(name = "biprism-sim", about = "Fresnel biprism wavelength workbench")]
struct Cli {
    /// TOML configuration file (defaults to ./biprism.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Parameter file, overriding `params_file` from the config.
    #[arg(long, global = true)]
    params: Option<PathBuf>,
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate from the stored readings and present the outcome.
    Run(RunArgs),
    /// Validate and persist a single reading.
    Set(SetArgs),
    /// Persist the default readings.
    Reset,
    /// Print the stored readings.
    Show,
    /// Print version information.
    Version(VersionArgs),
}

/// Resolved settings shared by the sub-commands.
pub struct Context {
    pub config: SimConfig,
    pub store: JsonFileStore,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Command::Version(args) = &cli.command {
        return version::run(args);
    }
    let config = SimConfig::load(cli.config.as_deref())?;
    let params_file = cli.params.unwrap_or_else(|| config.params_file.clone());
    debug!("using parameter file {}", params_file.display());
    let mut ctx = Context {
        config,
        store: JsonFileStore::new(params_file),
    };
    match cli.command {
        Command::Run(args) => run::run(&args, &mut ctx),
        Command::Set(args) => set::run(&args, &mut ctx),
        Command::Reset => reset::run(&mut ctx),
        Command::Show => show::run(&ctx),
        Command::Version(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
