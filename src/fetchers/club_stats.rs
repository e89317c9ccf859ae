use std::sync::{Arc, LazyLock};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use log::{info, warn};
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::cache::TtlCache;
use crate::config::StatsSettings;

const TIMEOUT_SECS: u64 = 10;
const CACHE_KEY: &str = "club_stats";

static LICENSEES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"n°\s*\d+\s*-\s*(\d+)\s*licenciés").expect("valid licensees regex"));
static TEAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Liste des équipes\s*(\d+)").expect("valid teams regex"));

/// Headline numbers of the club shown on the public site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubStats {
    pub licensees: u32,
    pub teams: u32,
    pub years: i32,
    pub last_updated: String,
}

/// Reads licensee and team counts from the club's public page
pub struct ClubStatsFetcher {
    client: Client,
    page_url: String,
    founded_year: i32,
    fallback_licensees: u32,
    fallback_teams: u32,
}

impl ClubStatsFetcher {
    pub fn new(settings: &StatsSettings) -> Result<Self> {
        let client = Self::build_client(settings.user_agent)?;
        Ok(Self {
            client,
            page_url: settings.page_url.clone(),
            founded_year: settings.founded_year,
            fallback_licensees: settings.fallback_licensees,
            fallback_teams: settings.fallback_teams,
        })
    }

    /// Download and read the page; any fetch failure is an error
    pub async fn fetch(&self) -> Result<ClubStats> {
        info!("Fetching club stats from {}", self.page_url);
        let html = self.fetch_page().await?;
        Ok(self.extract(&html))
    }

    /// Counts found in the page, configured defaults for those missing
    pub fn extract(&self, html: &str) -> ClubStats {
        let text = Self::body_text(html);

        ClubStats {
            licensees: Self::capture_number(&LICENSEES, &text).unwrap_or(self.fallback_licensees),
            teams: Self::capture_number(&TEAMS, &text).unwrap_or(self.fallback_teams),
            years: self.years(),
            last_updated: Utc::now().to_rfc3339(),
        }
    }

    pub fn fallback(&self) -> ClubStats {
        ClubStats {
            licensees: self.fallback_licensees,
            teams: self.fallback_teams,
            years: self.years(),
            last_updated: Utc::now().to_rfc3339(),
        }
    }

    // --- Construction Helpers ---

    fn build_client(user_agent: &str) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")
    }

    // --- HTTP Fetching ---

    async fn fetch_page(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.page_url)
            .send()
            .await
            .context("Failed to send GET request")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }
        response.text().await.context("Failed to extract HTML text")
    }

    // --- Extraction ---

    fn body_text(html: &str) -> String {
        let document = Html::parse_document(html);
        let text: String = match Selector::parse("body") {
            Ok(selector) => document
                .select(&selector)
                .flat_map(|body| body.text())
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => String::new(),
        };
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn capture_number(pattern: &Regex, text: &str) -> Option<u32> {
        pattern.captures(text)?.get(1)?.as_str().parse().ok()
    }

    fn years(&self) -> i32 {
        Utc::now().year() - self.founded_year
    }
}

/// Club stats memoised in an injected cache for the configured time to live
pub struct ClubStatsService {
    fetcher: ClubStatsFetcher,
    cache: Arc<TtlCache<ClubStats>>,
}

impl ClubStatsService {
    pub fn new(fetcher: ClubStatsFetcher, cache: Arc<TtlCache<ClubStats>>) -> Self {
        Self { fetcher, cache }
    }

    /// Cache for a service built from settings
    pub fn cache_for(settings: &StatsSettings) -> Arc<TtlCache<ClubStats>> {
        Arc::new(TtlCache::new(Duration::from_secs(settings.ttl_secs)))
    }

    /// Cached stats; a failed fetch yields the fallback numbers and is not cached
    pub async fn stats(&self) -> ClubStats {
        self.cache
            .get_or_compute(CACHE_KEY, || self.fetcher.fetch())
            .await
            .unwrap_or_else(|e| {
                warn!("Error fetching club stats, using fallback: {:#}", e);
                self.fetcher.fallback()
            })
    }
}
