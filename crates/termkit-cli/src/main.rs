//! termkit: IPv4 helpers and time-window advisory locks from the terminal.
//!
//! # Usage
//!
//! ```text
//! termkit [--config PATH] [--no-color] <COMMAND>
//!
//! Commands:
//!   netmask <PREFIX>            prefix -> dotted-quad netmask
//!   prefix <NETMASK>            dotted-quad netmask -> prefix
//!   contains <NETWORK> <IP>     CIDR membership test
//!   check <KIND> <VALUE>        validate ipv4 | ipv4-prefix | route | route-list
//!   lock status|create|acquire  inspect or take a time-window lock
//!   menu                        interactive numbered menu
//!   config show|init            print or create the config file
//! ```
//!
//! Exit status is 0 on success and 1 when a check fails, a lock is held, or
//! an error occurs.  `RUST_LOG` overrides the configured log level; logs go to
//! stderr.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use termkit_cli::application::commands::{self, AcquireOutcome, CheckKind, LockSettings};
use termkit_cli::application::console::Palette;
use termkit_cli::application::interactive::run_menu;
use termkit_cli::application::prompt::{PromptError, Prompter};
use termkit_cli::infrastructure::storage::config::{
    config_file_path, init_config_at, load_config, load_config_from, render_config, AppConfig,
    ConfigError,
};
use termkit_cli::infrastructure::terminal::StdinReader;

// ── CLI argument definitions ──────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "termkit",
    about = "IPv4 address helpers and time-window advisory locks",
    version
)]
struct Cli {
    /// Path to config.toml instead of the platform config directory.
    #[arg(long, global = true, env = "TERMKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Never emit ANSI colors.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a prefix length (0-32) to a dotted-quad netmask.
    Netmask { prefix: String },
    /// Convert a dotted-quad netmask to its prefix length.
    Prefix { netmask: String },
    /// Test whether IP lies inside NETWORK (`a.b.c.d/p`).
    Contains { network: String, ip: String },
    /// Validate VALUE against a grammar; `-` reads VALUE from stdin.
    Check { kind: CheckKind, value: String },
    /// Inspect or take a time-window lock.
    Lock {
        #[command(subcommand)]
        action: LockCommand,
    },
    /// Interactive numbered menu.
    Menu,
    /// Print or create the config file.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
enum LockCommand {
    /// Report fresh markers, deleting expired ones. Exits 1 when locked.
    Status(LockArgs),
    /// Write a marker for the current second, whether or not the lock is held.
    Create(LockArgs),
    /// Write a marker only if the lock is free. Exits 1 when held.
    Acquire(LockArgs),
}

#[derive(Debug, Args)]
struct LockArgs {
    /// Lock directory; defaults to `lock.directory` from the config.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Operation name prefixed to every marker file.
    #[arg(long)]
    header: String,

    /// Freshness window in seconds; defaults to `lock.window_secs`.
    #[arg(long)]
    window: Option<u64>,
}

impl LockArgs {
    fn settings(&self, config: &AppConfig) -> LockSettings {
        let mut settings = config.lock.settings();
        if let Some(dir) = &self.dir {
            settings.dir = dir.clone();
        }
        if let Some(secs) = self.window {
            settings.window = std::time::Duration::from_secs(secs);
        }
        settings
    }
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as TOML.
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = read_config(cli.config.as_ref()).context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.console.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let palettes = Palettes::new(
        config.console.color && !cli.no_color,
        io::stdout().is_terminal(),
        io::stderr().is_terminal(),
    );

    run(cli, &config, palettes)
}

/// Colorizers for stdout and stderr, each enabled only when its stream is a
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palettes {
    out: Palette,
    err: Palette,
}

impl Palettes {
    fn new(color: bool, stdout_is_tty: bool, stderr_is_tty: bool) -> Self {
        Self {
            out: Palette::new(color && stdout_is_tty),
            err: Palette::new(color && stderr_is_tty),
        }
    }
}

fn read_config(path: Option<&PathBuf>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_config_from(path),
        None => match load_config() {
            Err(ConfigError::NoPlatformConfigDir) => Ok(AppConfig::default()),
            other => other,
        },
    }
}

fn run(cli: Cli, config: &AppConfig, palettes: Palettes) -> anyhow::Result<ExitCode> {
    let palette = palettes.out;
    match cli.command {
        Command::Netmask { prefix } => match commands::netmask(&prefix) {
            Ok(mask) => {
                println!("{mask}");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                error!("fatal prefix conversion failure: {e}");
                eprintln!("{}", palettes.err.red(&e.to_string()));
                Ok(ExitCode::FAILURE)
            }
        },

        Command::Prefix { netmask } => match commands::prefix(&netmask) {
            Some(prefix) => {
                println!("{prefix}");
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("{}", palettes.err.red(&format!("invalid netmask: {netmask:?}")));
                Ok(ExitCode::FAILURE)
            }
        },

        Command::Contains { network, ip } => {
            if commands::contains(&network, &ip) {
                println!("{}", palette.green(&format!("{ip} is in {network}")));
                Ok(ExitCode::SUCCESS)
            } else {
                println!("{}", palette.red(&format!("{ip} is not in {network}")));
                Ok(ExitCode::FAILURE)
            }
        }

        Command::Check { kind, value } => {
            let value = if value == "-" {
                commands::read_check_value(io::stdin().lock())
                    .context("failed to read value from stdin")?
            } else {
                value
            };
            if commands::check(kind, &value) {
                println!("{}", palette.green(&format!("valid {kind}")));
                Ok(ExitCode::SUCCESS)
            } else {
                println!("{}", palette.red(&format!("invalid {kind}")));
                Ok(ExitCode::FAILURE)
            }
        }

        Command::Lock { action } => run_lock(action, config, palette),

        Command::Menu => {
            let mut prompter = Prompter::new(StdinReader::new(), io::stdout(), palette);
            match run_menu(&mut prompter, &config.lock.settings()) {
                Ok(()) | Err(PromptError::Eof) => Ok(ExitCode::SUCCESS),
                Err(e) => Err(e).context("interactive menu failed"),
            }
        }

        Command::Config { action } => run_config(action, cli.config, config),
    }
}

fn run_lock(action: LockCommand, config: &AppConfig, palette: Palette) -> anyhow::Result<ExitCode> {
    match action {
        LockCommand::Status(args) => {
            let lock = args.settings(config).lock(&args.header)?;
            let report = commands::lock_status(&lock);
            if report.is_locked() {
                println!("{}", palette.yellow(&report.to_string()));
                Ok(ExitCode::FAILURE)
            } else {
                println!("{}", palette.green(&report.to_string()));
                Ok(ExitCode::SUCCESS)
            }
        }
        LockCommand::Create(args) => {
            let lock = args.settings(config).lock(&args.header)?;
            let marker = commands::lock_create(&lock)
                .with_context(|| format!("failed to create lock for {:?}", args.header))?;
            println!("{}", palette.green(&format!("created: {marker}")));
            Ok(ExitCode::SUCCESS)
        }
        LockCommand::Acquire(args) => {
            let lock = args.settings(config).lock(&args.header)?;
            match commands::lock_acquire(&lock)
                .with_context(|| format!("failed to acquire lock for {:?}", args.header))?
            {
                AcquireOutcome::Acquired(marker) => {
                    println!("{}", palette.green(&format!("acquired: {marker}")));
                    Ok(ExitCode::SUCCESS)
                }
                AcquireOutcome::Held => {
                    println!("{}", palette.yellow(&format!("held: {}", args.header)));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn run_config(
    action: ConfigCommand,
    path: Option<PathBuf>,
    config: &AppConfig,
) -> anyhow::Result<ExitCode> {
    match action {
        ConfigCommand::Show => {
            print!("{}", render_config(config)?);
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommand::Init { force } => {
            let path = match path {
                Some(path) => path,
                None => config_file_path()?,
            };
            init_config_at(&path, force)?;
            info!(path = %path.display(), "wrote default config");
            println!("wrote {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
