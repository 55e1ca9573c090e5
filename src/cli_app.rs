//! Top-level CLI definition and dispatch.

use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::config::{EngineConfig, TimestampMode};
use crate::core::console::Console;
use crate::core::errors::Result;
use crate::logger::{Level, LogFormat, Logger, LoggerSettings};
use crate::patterns::{self, database::DatabaseKind};
use crate::pipeline;
use crate::service::NotificationService;

/// Notification engine and design-pattern demos.
#[derive(Parser)]
#[command(name = "npat", version, about)]
pub struct Cli {
    /// Log engine activity at info level.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Diagnostic log format (overrides the config file).
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Build a decorated notification and deliver it through the service.
    Notify(NotifyArgs),
    /// Show that the logger is a process-wide singleton.
    Singleton,
    /// Create database connections through the factory.
    Factory(FactoryArgs),
    /// Switch payment strategies at runtime.
    Payment,
    /// Run the singleton, factory and payment demos in order.
    All,
    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Flags for `npat notify`. Anything not given falls back to the config file,
/// then to the built-in reference values.
#[derive(Debug, Args)]
pub struct NotifyArgs {
    /// TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Notification body.
    #[arg(long)]
    pub message: Option<String>,
    /// Signature appended below the body.
    #[arg(long, conflicts_with = "no_signature")]
    pub signature: Option<String>,
    /// Send without a signature.
    #[arg(long)]
    pub no_signature: bool,
    /// Timestamp prefix mode.
    #[arg(long, value_enum)]
    pub timestamp: Option<TimestampMode>,
    /// Label used when the timestamp mode is `fixed`.
    #[arg(long)]
    pub at: Option<String>,
    /// Email recipient (repeatable). Recipients given on the command line
    /// replace the configured ones.
    #[arg(long = "email")]
    pub emails: Vec<String>,
    /// SMS recipient (repeatable).
    #[arg(long = "sms")]
    pub sms: Vec<String>,
}

impl NotifyArgs {
    fn apply(&self, config: &mut EngineConfig) {
        let notification = &mut config.notification;
        if let Some(message) = &self.message {
            notification.message.clone_from(message);
        }
        if let Some(signature) = &self.signature {
            notification.signature.clone_from(signature);
        }
        if self.no_signature {
            notification.signature.clear();
        }
        if let Some(mode) = self.timestamp {
            notification.timestamp = mode;
        }
        if let Some(label) = &self.at {
            notification.fixed_timestamp.clone_from(label);
        }
        if !self.emails.is_empty() || !self.sms.is_empty() {
            config.channels.email.clone_from(&self.emails);
            config.channels.sms.clone_from(&self.sms);
        }
    }
}

#[derive(Debug, Args)]
pub struct FactoryArgs {
    /// Backend to connect to (repeatable): mysql, postgresql, mongodb.
    #[arg(long = "backend")]
    pub backends: Vec<String>,
    /// Query executed on every requested backend.
    #[arg(long, default_value = "Select * from users")]
    pub query: String,
}

/// Dispatch CLI commands, writing transcripts to stdout.
pub fn run(cli: &Cli) -> Result<()> {
    let stdout = Console::stdout();
    match &cli.command {
        Command::Notify(args) => {
            let mut config = match &args.config {
                Some(path) => EngineConfig::load(path)?,
                None => EngineConfig::default(),
            };
            args.apply(&mut config);
            config.validate()?;
            configure_logger(cli, config.logging);
            notify(&config, &stdout)
        }
        Command::Singleton => {
            configure_demo_logger(cli, &stdout);
            patterns::singleton_demo(&stdout)
        }
        Command::Factory(args) => {
            configure_logger(cli, LoggerSettings::default());
            if args.backends.is_empty() {
                return patterns::factory_demo(&stdout, &patterns::DEFAULT_FACTORY_RUN);
            }
            let runs = args
                .backends
                .iter()
                .map(|name| {
                    name.parse::<DatabaseKind>()
                        .map(|kind| (kind, args.query.as_str()))
                })
                .collect::<Result<Vec<_>>>()?;
            patterns::factory_demo(&stdout, &runs)
        }
        Command::Payment => {
            configure_logger(cli, LoggerSettings::default());
            patterns::payment_demo(&stdout)
        }
        Command::All => {
            configure_demo_logger(cli, &stdout);
            patterns::singleton_demo(&stdout)?;
            patterns::factory_demo(&stdout, &patterns::DEFAULT_FACTORY_RUN)?;
            patterns::payment_demo(&stdout)
        }
        Command::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "npat", &mut io::stdout());
            Ok(())
        }
    }
}

/// Submit the configured notification through the shared service with a
/// logger and an engine attached for the duration of the call.
fn notify(config: &EngineConfig, console: &Console) -> Result<()> {
    let strategies = pipeline::build_strategies(&config.channels, console)?;
    let notification = pipeline::build_notification(&config.notification)?;

    let service = NotificationService::instance();
    let observable = service.observable();
    let subscription = pipeline::attach(&observable, strategies, console);
    let outcome = service.send_notification(notification);
    subscription.detach(&observable);
    outcome
}

fn configure_logger(cli: &Cli, mut settings: LoggerSettings) {
    if cli.verbose {
        settings.level = Level::Info;
    }
    if let Some(format) = cli.log_format {
        settings.format = format;
    }
    Logger::instance().configure(settings);
}

// The singleton demo's log lines are part of its transcript.
fn configure_demo_logger(cli: &Cli, stdout: &Console) {
    configure_logger(
        cli,
        LoggerSettings {
            level: Level::Info,
            ..LoggerSettings::default()
        },
    );
    Logger::instance().redirect(stdout.clone());
}
