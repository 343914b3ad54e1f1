use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{
    adapters::sheets::auth::FlowOptions, domain::entry::EntryKind,
    ports::command_handler::Command,
};

/// Fill the attendance sheet with today's start and stop times.
#[derive(Parser, Debug)]
#[command(name = "stag", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print the authorization URL and read the code from stdin instead of
    /// waiting for the browser to redirect to a local server.
    #[arg(long, global = true)]
    pub noauth_local_webserver: bool,

    /// Host name used in the OAuth redirect URL; it must resolve to this
    /// machine. Only used together with --auth-host-port.
    #[arg(long, global = true, default_value = "localhost")]
    pub auth_host_name: String,

    /// Port for the local OAuth redirect server (a free port when omitted).
    #[arg(long, global = true)]
    pub auth_host_port: Option<u16>,

    /// Log level for diagnostics printed on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LoggingLevel::Warn)]
    pub logging_level: LoggingLevel,

    /// Directory holding config.json, secret.json and credentials.json
    /// (defaults to ~/.stag).
    #[arg(long, global = true, env = "STAG_HOME")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Set up the program
    Setup {
        /// Link to your Google sheet
        sheet: String,
        /// File with the OAuth client secret, you can get it at
        /// https://console.developers.google.com/start/api?id=sheets.googleapis.com
        secret: PathBuf,
    },
    /// Write the start time
    Start,
    /// Write the stop time
    Stop,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    pub fn flow_options(&self) -> FlowOptions {
        FlowOptions {
            headless: self.noauth_local_webserver,
            host_name: self.auth_host_name.clone(),
            port: self.auth_host_port,
        }
    }
}

impl From<LoggingLevel> for tracing::Level {
    fn from(level: LoggingLevel) -> Self {
        match level {
            LoggingLevel::Error => tracing::Level::ERROR,
            LoggingLevel::Warn => tracing::Level::WARN,
            LoggingLevel::Info => tracing::Level::INFO,
            LoggingLevel::Debug => tracing::Level::DEBUG,
            LoggingLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Setup { sheet, secret } => Command::Setup {
                sheet_url: sheet,
                secret,
            },
            Commands::Start => Command::Update(EntryKind::Start),
            Commands::Stop => Command::Update(EntryKind::Stop),
        }
    }
}
