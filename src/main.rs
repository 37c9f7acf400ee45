use anyhow::Result;

use eduboard::cli::{Cli, Command};
use eduboard::{build_config, handle_ingest, handle_serve, handle_toppers, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = build_config(cli);
    match &cli.command {
        Command::Serve { port } => handle_serve(config, *port),
        Command::Ingest {
            semester,
            file,
            subject,
        } => handle_ingest(&config, *semester, file, subject.as_deref()),
        Command::Toppers { scope } => handle_toppers(&config, *scope),
    }
}
