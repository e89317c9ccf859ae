use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::api::SmartPingClient;
use crate::cli::{Command, LicenseeVariant};
use crate::config::AppConfig;
use crate::domain::{MatchLink, ResultEnvelope, TeamRecord};
use crate::errors::VALIDATION_TAG;
use crate::http::Transport;

/// Envelope of one command, rendered for display
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub success: bool,
    pub source: Option<String>,
    pub error: Option<String>,
    pub json: String,
}

impl Outcome {
    pub fn from_envelope<T: Serialize>(envelope: &ResultEnvelope<T>) -> Result<Self> {
        let json = serde_json::to_string_pretty(envelope).context("Failed to serialize result envelope")?;
        Ok(Self {
            success: envelope.success,
            source: envelope.source.clone(),
            error: envelope.error.clone(),
            json,
        })
    }
}

/// Runs one SmartPing lookup command against a client
pub struct LookupService<T: Transport> {
    client: SmartPingClient<T>,
    home_club: String,
}

impl<T: Transport> LookupService<T> {
    pub fn new(client: SmartPingClient<T>, config: &AppConfig) -> Self {
        Self {
            client,
            home_club: config.home.club_id.clone(),
        }
    }

    pub async fn run(&self, command: &Command) -> Result<Outcome> {
        info!("Running {:?}", command);

        match command {
            Command::Licensees { club, variant } => {
                let club = self.club(club);
                let envelope = match variant {
                    LicenseeVariant::Basic => self.client.club_licensees(club).await,
                    LicenseeVariant::Ranked => self.client.club_licensees_ranked(club).await,
                    LicenseeVariant::Categories => self.client.club_licensees_with_categories(club).await,
                };
                Outcome::from_envelope(&envelope)
            }
            Command::Licensee { licence } => Outcome::from_envelope(&self.client.licensee(licence).await),
            Command::History { licence } => Outcome::from_envelope(&self.client.ranking_history(licence).await),
            Command::PlayerMatches { licence } => {
                Outcome::from_envelope(&self.client.player_matches(licence).await)
            }
            Command::Teams { club } => Outcome::from_envelope(&self.client.club_teams(self.club(club)).await),
            Command::Matches { team, club } => match self.team(self.club(club), team).await {
                Ok(team) => Outcome::from_envelope(&self.client.team_matches(&team).await),
                Err(failure) => Outcome::from_envelope(&failure),
            },
            Command::TeamClub { team, club } => match self.team(self.club(club), team).await {
                Ok(team) => Outcome::from_envelope(&self.client.team_club(&team).await),
                Err(failure) => Outcome::from_envelope(&failure),
            },
            Command::PoolRanking { team, club } => {
                let club = self.club(club);
                match self.team(club, team).await {
                    Ok(team) => Outcome::from_envelope(&self.client.pool_ranking(&team, club).await),
                    Err(failure) => Outcome::from_envelope(&failure),
                }
            }
            Command::Club { number, team } => {
                Outcome::from_envelope(&self.client.club_details(number, team.as_deref()).await)
            }
            Command::SearchClubs { name, city } => {
                Outcome::from_envelope(&self.client.search_clubs(name.as_deref(), city.as_deref()).await)
            }
            Command::Opponent { label } => Outcome::from_envelope(&self.client.locate_opponent_club(label).await),
            Command::MatchDetails { link } => {
                Outcome::from_envelope(&self.client.match_details(&MatchLink::new(link.as_str())).await)
            }
            Command::Stats | Command::Completions { .. } => {
                anyhow::bail!("{:?} is not a SmartPing lookup", command)
            }
        }
    }

    fn club<'a>(&'a self, club: &'a Option<String>) -> &'a str {
        club.as_deref().unwrap_or(&self.home_club)
    }

    /// Team of the club with this id, from the club's team list
    async fn team(&self, club: &str, team_id: &str) -> std::result::Result<TeamRecord, ResultEnvelope<()>> {
        let envelope = self.client.club_teams(club).await;
        if !envelope.success {
            return Err(ResultEnvelope {
                success: false,
                data: None,
                error: envelope.error,
                source: envelope.source,
            });
        }

        envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .find(|team| team.team_id == team_id.trim())
            .ok_or_else(|| {
                ResultEnvelope::failure(format!("Team {} not found in club {}", team_id, club), VALIDATION_TAG)
            })
    }
}
