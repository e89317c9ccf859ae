use log::info;

pub struct SmartPingSettings {
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    /// Report documents without any recognisable element as parse errors
    pub strict_documents: bool,
}

impl Default for SmartPingSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.fftt.com/mobile/pxml/".to_string(),
            user_agent: "Club Pongiste Libercourtois",
            timeout_secs: 8,
            strict_documents: false,
        }
    }
}

/// The club this client works for, and where its hall is
#[derive(Debug, Clone)]
pub struct HomeSettings {
    pub club_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for HomeSettings {
    fn default() -> Self {
        Self {
            club_id: "07620112".to_string(),
            latitude: 50.481854,
            longitude: 3.017099,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TravelSettings {
    pub detour_factor: f64,
    pub average_speed_kmh: f64,
    pub minimum_minutes: u32,
}

impl Default for TravelSettings {
    fn default() -> Self {
        Self {
            detour_factor: 1.3,
            average_speed_kmh: 50.0,
            minimum_minutes: 10,
        }
    }
}

pub struct StatsSettings {
    pub page_url: String,
    pub user_agent: &'static str,
    pub ttl_secs: u64,
    pub founded_year: i32,
    pub fallback_licensees: u32,
    pub fallback_teams: u32,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            page_url: "https://www.pingpocket.fr/app/fftt/clubs/07620112".to_string(),
            user_agent: "Mozilla/5.0 (compatible; Club-Libercourtois-Bot/1.0)",
            ttl_secs: 60 * 60 * 24,
            founded_year: 1970,
            fallback_licensees: 78,
            fallback_teams: 9,
        }
    }
}

pub struct AppConfig {
    pub smartping: SmartPingSettings,
    pub home: HomeSettings,
    pub travel: TravelSettings,
    pub stats: StatsSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            smartping: SmartPingSettings::default(),
            home: HomeSettings::default(),
            travel: TravelSettings::default(),
            stats: StatsSettings::default(),
        }
    }

    /// Defaults with the home club overridden by `CLUB_ID` when set
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Some(club_id) = read_env("CLUB_ID") {
            info!("Using club {} from environment", club_id);
            config.stats.page_url = format!("https://www.pingpocket.fr/app/fftt/clubs/{}", club_id);
            config.home.club_id = club_id;
        }
        config
    }
}

pub(crate) fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
