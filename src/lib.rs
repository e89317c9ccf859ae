pub mod api;
pub mod auth;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::api::SmartPingClient;
use crate::cli::Command;
use crate::config::AppConfig;
use crate::domain::ResultEnvelope;
use crate::fetchers::{ClubStatsFetcher, ClubStatsService};
use crate::services::{LookupService, Outcome};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_lookup(command: &Command) -> Result<Outcome> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let client = match SmartPingClient::from_env(&config) {
            Ok(client) => client,
            Err(e) => return Outcome::from_envelope(&ResultEnvelope::<()>::from_error(&e)),
        };
        let service = LookupService::new(client, &config);
        service.run(command).await
    })
}

pub fn handle_stats() -> Result<Outcome> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let cache = ClubStatsService::cache_for(&config.stats);
        let service = ClubStatsService::new(ClubStatsFetcher::new(&config.stats)?, cache);
        let stats = service.stats().await;
        Outcome::from_envelope(&ResultEnvelope::ok(stats, "club_stats"))
    })
}
