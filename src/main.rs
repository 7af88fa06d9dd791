use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod services;

use cli::Cli;
use services::output::print_error;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = services::settings::resolve(&cli)
        .and_then(|settings| commands::handle_record(&cli, &settings));

    if let Err(err) = &result {
        if cli.json {
            print_error(err);
        }
    }
    result
}
