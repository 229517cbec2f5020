use anyhow::Result;

use olympics_engine::cli::Command;
use olympics_engine::{handle_order, handle_resolve, handle_show, interpret};

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
        Command::Order { players, store } => handle_order(players, store.as_deref()),
        Command::Show { store } => handle_show(store.as_deref()),
        Command::Resolve { mode, rows } => handle_resolve(mode, rows),
    }
}
