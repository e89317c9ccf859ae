use serde::{Deserialize, Serialize};

use crate::errors::{SmartPingError, TEAM_VALIDATION_TAG};

const DEFAULT_ORGANISME_PERE: &str = "67";

/// Decode a miniature query string into ordered key/value pairs
///
/// Pairs without a key or a value are dropped; values are percent-decoded once.
fn decode_params(raw: &str) -> Vec<(String, String)> {
    raw.trim()
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .map(|(key, value)| (key.to_string(), percent_decode(value)))
        .collect()
}

fn percent_decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Opaque `liendivision` blob of a team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DivisionLink(String);

impl DivisionLink {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> Vec<(String, String)> {
        decode_params(&self.0)
    }

    /// Pool identifiers needed by the pool endpoints
    pub fn pool_params(&self) -> Result<PoolParams, SmartPingError> {
        let params = self.decode();
        let cx_poule = lookup(&params, "cx_poule");
        let d1 = lookup(&params, "D1");

        match (cx_poule, d1) {
            (Some(cx_poule), Some(d1)) => Ok(PoolParams {
                cx_poule: cx_poule.to_string(),
                d1: d1.to_string(),
                organisme_pere: lookup(&params, "organisme_pere")
                    .unwrap_or(DEFAULT_ORGANISME_PERE)
                    .to_string(),
            }),
            _ => Err(SmartPingError::validation(
                TEAM_VALIDATION_TAG,
                "Missing required pool parameters (cx_poule or D1) in team data",
            )),
        }
    }
}

/// Decoded pool reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolParams {
    pub cx_poule: String,
    pub d1: String,
    pub organisme_pere: String,
}

impl PoolParams {
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("cx_poule".to_string(), self.cx_poule.clone()),
            ("D1".to_string(), self.d1.clone()),
            ("organisme_pere".to_string(), self.organisme_pere.clone()),
        ]
    }
}

/// Opaque `lien` blob of a fixture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchLink(String);

impl MatchLink {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// All parameters, merged as-is into the match detail request
    pub fn decode(&self) -> Vec<(String, String)> {
        decode_params(&self.0)
    }

    /// `equip_id1` and `equip_id2`, when numeric
    pub fn team_ids(&self) -> (Option<String>, Option<String>) {
        let params = self.decode();
        (numeric(&params, "equip_id1"), numeric(&params, "equip_id2"))
    }
}

fn numeric(params: &[(String, String)], key: &str) -> Option<String> {
    lookup(params, key)
        .filter(|value| value.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}
