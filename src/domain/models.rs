use serde::{Deserialize, Serialize};

use crate::domain::category::decode_category;
use crate::domain::links::{DivisionLink, MatchLink};
use crate::domain::travel::{GeoPoint, TravelEstimate};

/// A registered player, keyed by licence number
///
/// Completeness depends on the endpoint that produced the record: the basic
/// list carries points and echelon, the ranked list carries ranking and monthly
/// points, the licence lookup carries category and validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseeRecord {
    pub licence: String,
    pub surname: String,
    pub given_name: String,
    pub club_name: Option<String>,
    pub club_number: Option<String>,
    pub points: i64,
    /// Canonical ranking, whatever the upstream tag was called
    pub ranking: Option<String>,
    pub category: Option<String>,
    pub monthly_points: Option<String>,
    pub echelon: Option<String>,
    pub place: Option<i64>,
    pub nationality: Option<String>,
    pub sex: Option<String>,
    pub licence_type: Option<String>,
    pub certificate: Option<String>,
    pub validity: Option<String>,
    pub mixed_echelon: Option<String>,
}

impl LicenseeRecord {
    /// Human readable category, `Non renseigné` when unknown
    pub fn category_label(&self) -> String {
        decode_category(self.category.as_deref().unwrap_or(""))
    }

    /// Licences without a validation mark, or marked `O`, are active
    pub fn is_active(&self) -> bool {
        self.validity.as_deref().is_none_or(|v| v == "O")
    }
}

/// A team registered by a club in one competition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub team_id: String,
    pub team_label: String,
    pub division_label: String,
    pub division_link: DivisionLink,
    pub epreuve_id: String,
    pub epreuve_label: String,
}

/// One fixture of a pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub team_a: String,
    pub team_b: String,
    pub score_a: String,
    pub score_b: String,
    pub result_a: String,
    pub result_b: String,
    pub scheduled_date: String,
    pub actual_date: String,
    pub start_time: String,
    pub day_label: String,
    pub link: MatchLink,
    pub team_id_1: Option<String>,
    pub team_id_2: Option<String>,
}

impl MatchRecord {
    /// True when the team plays either side of this fixture
    pub fn involves(&self, team_id: &str) -> bool {
        self.team_id_1.as_deref() == Some(team_id) || self.team_id_2.as_deref() == Some(team_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub player_a: String,
    pub player_b: String,
    pub score_a: String,
    pub score_b: String,
    /// Free text such as `11/3 9/11 11/4`
    pub set_detail: String,
    pub ranking_a: Option<String>,
    pub ranking_b: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetailRecord {
    pub team_a: String,
    pub team_b: String,
    pub result_a: String,
    pub result_b: String,
    pub games: Vec<GameRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubDetailsRecord {
    pub club_number: String,
    pub name: String,
    /// Up to three hall address lines joined with `, `
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub travel: Option<TravelEstimate>,
}

impl ClubDetailsRecord {
    /// Hall coordinates, when both are present and numeric
    pub fn coordinates(&self) -> Option<GeoPoint> {
        let lat = self.latitude.as_deref()?.trim().parse::<f64>().ok()?;
        let lng = self.longitude.as_deref()?.trim().parse::<f64>().ok()?;
        Some(GeoPoint::new(lat, lng))
    }

    /// Address, postal code and city joined for a map search
    pub fn full_address(&self) -> String {
        [&self.address, &self.postal_code, &self.city]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSearchResult {
    pub club_number: String,
    pub name: String,
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Promotion,
    Relegation,
}

/// One row of a pool's standings table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStanding {
    pub position: u32,
    pub team_name: String,
    pub played: u32,
    pub points: i64,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub club_number: String,
    pub team_id: String,
    pub is_club_team: bool,
    pub zone: Option<Zone>,
}

/// A licensee's official ranking for one season phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingHistoryEntry {
    pub season: String,
    pub phase: String,
    pub points: Option<String>,
    pub echelon: Option<String>,
    pub place: Option<String>,
}

/// One individual game of a licensee as recorded by the ranking database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMatch {
    pub date: String,
    pub opponent_name: String,
    pub opponent_licence: Option<String>,
    pub opponent_ranking: Option<String>,
    pub victory: bool,
    pub points_delta: Option<f64>,
    pub coefficient: Option<f64>,
    pub championship_code: Option<String>,
    pub round: Option<String>,
}

/// The club a team plays for, resolved through its pool standings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamClub {
    pub team_id: String,
    #[serde(flatten)]
    pub details: ClubDetailsRecord,
    pub maps_url: String,
}

/// A club found from an opponent team label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentClub {
    pub searched_name: String,
    pub details: ClubDetailsRecord,
    pub maps_url: String,
}
