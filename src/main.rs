use anyhow::Result;
use clap::CommandFactory;
use colored::Colorize;

use fftt_smartping::cli::{Cli, Command};
use fftt_smartping::services::Outcome;
use fftt_smartping::{handle_lookup, handle_stats, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "fftt_smartping", &mut std::io::stdout());
            Ok(())
        }
        Command::Stats => report(handle_stats()?),
        _ => report(handle_lookup(command)?),
    }
}

fn report(outcome: Outcome) -> Result<()> {
    println!("{}", outcome.json);

    let source = outcome.source.as_deref().unwrap_or("-");
    if outcome.success {
        eprintln!("{} ({})", "success".green().bold(), source);
    } else {
        let error = outcome.error.as_deref().unwrap_or("unknown error");
        eprintln!("{} [{}] {}", "failure".red().bold(), source, error);
    }
    Ok(())
}
