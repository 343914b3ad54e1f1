use std::process::ExitCode;

use clap::Parser;
use stag::{
    adapters::config::paths::ConfigPaths,
    cli::{args::Cli, cli_adapter::CliAdapter},
    ports::command_handler::CommandHandler,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.logging_level.into());

    info!("Starting stag");

    let flow = cli.flow_options();
    let result = match CliAdapter::new(ConfigPaths::resolve(cli.config_dir), flow) {
        Ok(cli_adapter) => cli_adapter.handle(cli.command.into()).await,
        Err(report) => Err(report),
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(report) => {
            eprintln!("Error: {:?}", report);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(level: tracing::Level) {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    Registry::default()
        .with(tracing_subscriber::filter::Targets::new().with_target("stag", level))
        .with(stderr_layer)
        .init();
}
