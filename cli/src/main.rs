//! `pe` — the command-line entry point for the parameter editor.
//!
//! # Usage
//!
//! ```text
//! pe                          # open the editor
//! pe tui --dump               # open the editor, print the model on exit
//! pe run script.txt           # apply a command script, print the view
//! echo "add Цвет" | pe run    # same, reading stdin
//! pe view --format json       # print the initial session
//! ```

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use param_editor_core::command::{execute, Output};
use param_editor_core::script;
use param_editor_core::settings;
use param_editor_core::store::ParamStore;
use param_editor_core::types::{Model, ParamEntry, Settings};
use param_editor_tui::tui::Tui;


const CONFIG_ENV: &str = "PE_CONFIG";
const LOG_ENV: &str = "PE_LOG";


/// Edit a list of named string parameters
#[derive(Parser)]
#[command(name = "pe")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Settings file (YAML). Falls back to $PE_CONFIG, then built-in defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug events
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive editor (default)
    Tui {
        /// Print the final model as JSON after the editor closes
        #[arg(long)]
        dump: bool,
    },

    /// Apply a command script to a fresh session
    Run {
        /// Script file; reads stdin when omitted
        script: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the initial session
    View {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Format {
    Text,
    Json,
}


fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui { dump: false });
    let interactive = matches!(command, Commands::Tui { .. });
    init_logging(cli.verbose, cli.log_file.as_deref(), interactive)?;

    let config_path = resolve_config_path(cli.config);
    let settings = settings::load_or_default(config_path.as_deref())
        .context("failed to load settings")?;
    debug!(config = ?config_path, "settings resolved");

    match command {
        Commands::Tui { dump } => cmd_tui(&settings, dump),
        Commands::Run { script, format } => cmd_run(&settings, script.as_deref(), format),
        Commands::View { format } => {
            let store = ParamStore::seeded(&settings.seed);
            write_view(&mut io::stdout().lock(), &store.view(), format)
        }
    }
}


/// Set up `tracing`. The editor owns the terminal, so without a log file
/// its events are dropped instead of written to stderr.
fn init_logging(verbose: bool, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).without_time();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if interactive => {}
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}


fn resolve_config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}


fn cmd_tui(settings: &Settings, dump: bool) -> Result<()> {
    let store = ParamStore::seeded(&settings.seed);
    let mut tui = Tui::new(store, settings).context("failed to start the editor")?;
    tui.run().context("editor failed")?;
    let model = tui.store().model();
    // Restore the terminal before printing anything.
    drop(tui);

    if dump {
        write_model(&mut io::stdout().lock(), &model, Format::Json)?;
    }
    Ok(())
}


fn cmd_run(settings: &Settings, script_path: Option<&Path>, format: Format) -> Result<()> {
    let text = match script_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read script from stdin")?;
            buf
        }
    };
    let commands = script::parse_script(&text)?;
    debug!(commands = commands.len(), "script parsed");

    let mut store = ParamStore::seeded(&settings.seed);
    let mut out = io::stdout().lock();
    let mut printed = false;
    for cmd in commands {
        match execute(&mut store, cmd) {
            Output::None => {}
            Output::View(entries) => {
                write_view(&mut out, &entries, format)?;
                printed = true;
            }
            Output::Model(model) => {
                write_model(&mut out, &model, format)?;
                printed = true;
            }
        }
    }
    if !printed {
        write_view(&mut out, &store.view(), format)?;
    }
    Ok(())
}


fn write_view(out: &mut impl Write, entries: &[ParamEntry], format: Format) -> Result<()> {
    match format {
        Format::Text => {
            for entry in entries {
                writeln!(out, "{}", entry.to_line())?;
            }
        }
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(entries)?)?,
    }
    Ok(())
}


fn write_model(out: &mut impl Write, model: &Model, format: Format) -> Result<()> {
    let json = match format {
        Format::Text => serde_json::to_string(model)?,
        Format::Json => serde_json::to_string_pretty(model)?,
    };
    writeln!(out, "{}", json)?;
    Ok(())
}
