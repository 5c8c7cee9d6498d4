use clap::{CommandFactory, Parser, Subcommand};
use pomotick_core::Config;
use tracing_subscriber::EnvFilter;

mod audio;
mod commands;
mod display;
mod keys;
mod menu;
mod runner;

use commands::timer::{RunOptions, SessionArg};

#[derive(Parser)]
#[command(name = "pomotick", version, about = "Pomodoro timer for the terminal")]
struct Cli {
    /// Do not play completion sounds
    #[arg(long, global = true)]
    no_sound: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a session from the interactive menu (default)
    Menu,
    /// Start a session directly; follow-up sessions run until cancelled
    Start {
        #[arg(value_enum)]
        session: SessionArg,
        /// Length of a custom session in minutes
        #[arg(long)]
        minutes: Option<String>,
    },
    /// List session types and their durations
    Sessions {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let loaded = Config::load();
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };
    init_tracing(&config);
    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "using default configuration");
    }

    let opts = RunOptions {
        no_sound: cli.no_sound,
        no_color: cli.no_color,
    };
    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => commands::timer::menu(&config, opts),
        Commands::Start { session, minutes } => {
            commands::timer::start(&config, opts, session, minutes.as_deref())
        }
        Commands::Sessions { json } => commands::sessions::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pomotick", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
