pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod scoring;
pub mod seeding;
pub mod services;
pub mod store;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::ordering::{OrderingService, render_order};
use crate::services::scoring::{ScoringService, render_scores};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_order(players: &[String], store: Option<&str>) -> Result<()> {
    let config = AppConfig::new();
    let service = OrderingService::new(config, store);
    let record = service.run(players, &mut rand::thread_rng())?;
    print!("{}", render_order(&record));
    Ok(())
}

pub fn handle_show(store: Option<&str>) -> Result<()> {
    let config = AppConfig::new();
    let service = OrderingService::new(config, store);
    match service.current()? {
        Some(record) => print!("{}", render_order(&record)),
        None => println!("No player order has been generated yet"),
    }
    Ok(())
}

pub fn handle_resolve(mode: &str, rows: &[String]) -> Result<()> {
    let config = AppConfig::new();
    let service = ScoringService::new(config);
    let entries = service.run(mode, rows)?;
    print!("{}", render_scores(&entries));
    Ok(())
}
