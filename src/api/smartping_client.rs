use std::sync::LazyLock;

use log::{debug, info, warn};
use regex::Regex;

use crate::api::operation::Operation;
use crate::api::parsers::{
    self, BasicPlayerList, ClubDetail, ClubSearch, LicenceList, MatchSheet, PlayerGames, PoolResults,
    PoolStandings, RankedPlayerList, RankingHistory, Shape, TeamList,
};
use crate::auth::RequestSigner;
use crate::config::{AppConfig, Credentials, HomeSettings, TravelSettings};
use crate::domain::{
    ClubDetailsRecord, ClubSearchResult, GeoPoint, LicenseeRecord, MatchDetailRecord, MatchLink, MatchRecord,
    OpponentClub, PlayerMatch, PoolStanding, RankingHistoryEntry, ResultEnvelope, TeamClub, TeamRecord,
    estimate_travel,
};
use crate::errors::{SmartPingError, VALIDATION_TAG};
use crate::http::{HttpTransport, Transport, check_upstream_error};

const TEAM_NOT_FOUND_TAG: &str = "team_not_found_in_classement";
const CLUB_DETAILS_FAILED_TAG: &str = "club_details_failed";
const CLUB_NOT_FOUND_TAG: &str = "club_not_found";
const TEAM_CLUB_SOURCE: &str = "fftt_team_club_lookup";
const OPPONENT_SOURCE: &str = "smartping_club_search";
const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d+$").expect("valid team number regex"));
static TRAILING_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(A|B|C|D)$").expect("valid team letter regex"));
static HOSTED_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+reçoit\s+à\s+\w+$").expect("valid host suffix regex"));

/// Client for the federation's SmartPing XML API
///
/// Every public method signs a fresh request, decodes the response with the
/// shape of its operation and reports the outcome as a [`ResultEnvelope`].
/// Nothing is retried; [`SmartPingError::is_retryable`] tells callers which
/// failures are worth another try.
pub struct SmartPingClient<T = HttpTransport> {
    transport: T,
    signer: RequestSigner,
    strict_documents: bool,
    home: HomeSettings,
    travel: TravelSettings,
}

impl SmartPingClient<HttpTransport> {
    pub fn new(credentials: Credentials, config: &AppConfig) -> Result<Self, SmartPingError> {
        let transport = HttpTransport::new(&config.smartping)?;
        Ok(Self::with_transport(transport, credentials, config))
    }

    /// Client with credentials read from the environment
    pub fn from_env(config: &AppConfig) -> Result<Self, SmartPingError> {
        Self::new(Credentials::from_env()?, config)
    }
}

impl<T: Transport> SmartPingClient<T> {
    pub fn with_transport(transport: T, credentials: Credentials, config: &AppConfig) -> Self {
        Self {
            transport,
            signer: RequestSigner::new(credentials),
            strict_documents: config.smartping.strict_documents,
            home: config.home.clone(),
            travel: config.travel.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // --- Licensees ---

    /// Club licensees from the licence database (`xml_liste_joueur_o.php`)
    pub async fn club_licensees(&self, club_id: &str) -> ResultEnvelope<Vec<LicenseeRecord>> {
        let result = self.list_by_club::<BasicPlayerList>(club_id).await;
        finish(BasicPlayerList::OPERATION, log_count(result, "licensees"))
    }

    /// Club licensees with their official ranking (`xml_liste_joueur.php`)
    pub async fn club_licensees_ranked(&self, club_id: &str) -> ResultEnvelope<Vec<LicenseeRecord>> {
        let result = self.list_by_club::<RankedPlayerList>(club_id).await;
        finish(RankedPlayerList::OPERATION, log_count(result, "ranked licensees"))
    }

    /// Club licensees with category and validation (`xml_licence_b.php`)
    pub async fn club_licensees_with_categories(&self, club_id: &str) -> ResultEnvelope<Vec<LicenseeRecord>> {
        let result = self.list_by_club::<LicenceList>(club_id).await;
        finish(LicenceList::OPERATION, log_count(result, "licences"))
    }

    /// One licensee; `data: None` when the licence number is unknown
    pub async fn licensee(&self, licence: &str) -> ResultEnvelope<LicenseeRecord> {
        let result = match require(licence, "Licence number is required") {
            Ok(licence) => self
                .call::<LicenceList>(vec![param("licence", licence)])
                .await
                .map(|records| records.into_iter().next()),
            Err(e) => Err(e),
        };
        if let Ok(None) = &result {
            info!("No licensee {}", licence.trim());
        }
        finish_lookup(LicenceList::OPERATION, result)
    }

    pub async fn ranking_history(&self, licence: &str) -> ResultEnvelope<Vec<RankingHistoryEntry>> {
        let result = match require(licence, "Licence number is required") {
            Ok(licence) => self.call::<RankingHistory>(vec![param("numlic", licence)]).await,
            Err(e) => Err(e),
        };
        finish(RankingHistory::OPERATION, log_count(result, "ranking phases"))
    }

    /// Individual games of a licensee (`xml_partie_mysql.php`)
    pub async fn player_matches(&self, licence: &str) -> ResultEnvelope<Vec<PlayerMatch>> {
        let result = match require(licence, "Licence number is required") {
            Ok(licence) => self.call::<PlayerGames>(vec![param("licence", licence)]).await,
            Err(e) => Err(e),
        };
        finish(PlayerGames::OPERATION, log_count(result, "player games"))
    }

    // --- Teams and pools ---

    pub async fn club_teams(&self, club_id: &str) -> ResultEnvelope<Vec<TeamRecord>> {
        let result = match require(club_id, "Club identifier is required") {
            Ok(club_id) => self.call::<TeamList>(vec![param("numclu", club_id)]).await,
            Err(e) => Err(e),
        };
        finish(TeamList::OPERATION, log_count(result, "teams"))
    }

    /// Fixtures of the team's pool that involve the team, in upstream order
    ///
    /// The division link is decoded before anything is sent: a team without
    /// pool parameters fails with `team_validation` and no request is made.
    pub async fn team_matches(&self, team: &TeamRecord) -> ResultEnvelope<Vec<MatchRecord>> {
        let result = self.fetch_team_matches(team).await;
        finish(PoolResults::OPERATION, log_count(result, "team fixtures"))
    }

    async fn fetch_team_matches(&self, team: &TeamRecord) -> Result<Vec<MatchRecord>, SmartPingError> {
        let pool = team.division_link.pool_params()?;
        let fixtures = self.call::<PoolResults>(pool.to_query()).await?;
        let total = fixtures.len();

        let own: Vec<MatchRecord> = fixtures
            .into_iter()
            .filter(|fixture| fixture.involves(&team.team_id))
            .collect();
        debug!("Kept {} of {} pool fixtures for team {}", own.len(), total, team.team_id);
        Ok(own)
    }

    /// Standings of the team's pool, with the caller's club teams flagged
    pub async fn pool_ranking(&self, team: &TeamRecord, club_number: &str) -> ResultEnvelope<Vec<PoolStanding>> {
        let result = self.fetch_standings(team).await.map(|mut rows| {
            for row in rows.iter_mut() {
                row.is_club_team = !row.club_number.is_empty() && row.club_number == club_number.trim();
            }
            rows
        });
        finish(PoolStandings::OPERATION, log_count(result, "standings rows"))
    }

    async fn fetch_standings(&self, team: &TeamRecord) -> Result<Vec<PoolStanding>, SmartPingError> {
        let pool = team.division_link.pool_params()?;
        self.call::<PoolStandings>(pool.to_query()).await
    }

    /// Club of a team: the club number from the pool standings, then that club's details
    pub async fn team_club(&self, team: &TeamRecord) -> ResultEnvelope<TeamClub> {
        let club_number = match self.club_number_of(team).await {
            Ok(club_number) => club_number,
            Err(e) => {
                warn!("Team {} club lookup failed [{}]: {}", team.team_id, e.tag(), e);
                return ResultEnvelope::from_error(&e);
            }
        };
        info!("Team {} plays for club {}", team.team_label, club_number);

        match self.fetch_club_details(&club_number, Some(&team.team_id)).await {
            Ok(Some(details)) => ResultEnvelope::ok(
                TeamClub {
                    team_id: team.team_id.clone(),
                    maps_url: maps_search_url(&details),
                    details,
                },
                TEAM_CLUB_SOURCE,
            ),
            Ok(None) => club_details_failed(&club_number, "club not found"),
            Err(e) => club_details_failed(&club_number, &e.to_string()),
        }
    }

    async fn club_number_of(&self, team: &TeamRecord) -> Result<String, SmartPingError> {
        let standings = self.fetch_standings(team).await?;
        standings
            .into_iter()
            .find(|row| row.team_id == team.team_id)
            .map(|row| row.club_number)
            .filter(|club_number| !club_number.is_empty())
            .ok_or_else(|| {
                SmartPingError::validation(
                    TEAM_NOT_FOUND_TAG,
                    format!(
                        "Could not find club number for team {} (ID: {})",
                        team.team_label, team.team_id
                    ),
                )
            })
    }

    // --- Clubs ---

    /// Club details, with a travel estimate from home when the hall has coordinates
    ///
    /// `team_id` selects the hall the team plays in when a club has several.
    pub async fn club_details(&self, club_number: &str, team_id: Option<&str>) -> ResultEnvelope<ClubDetailsRecord> {
        let result = self.fetch_club_details(club_number, team_id).await;
        finish_lookup(ClubDetail::OPERATION, result)
    }

    async fn fetch_club_details(
        &self,
        club_number: &str,
        team_id: Option<&str>,
    ) -> Result<Option<ClubDetailsRecord>, SmartPingError> {
        let club_number = require(club_number, "Club number is required")?;
        let mut params = vec![param("club", club_number)];
        if let Some(team_id) = team_id.map(str::trim).filter(|id| !id.is_empty()) {
            params.push(param("idequipe", team_id));
        }

        let details = self.call::<ClubDetail>(params).await?;
        Ok(details.map(|club| self.with_travel(club)))
    }

    fn with_travel(&self, mut club: ClubDetailsRecord) -> ClubDetailsRecord {
        let home = GeoPoint::new(self.home.latitude, self.home.longitude);
        club.travel = club
            .coordinates()
            .map(|hall| estimate_travel(home, hall, &self.travel));
        club
    }

    /// Clubs matching a name and/or a city
    pub async fn search_clubs(&self, name: Option<&str>, city: Option<&str>) -> ResultEnvelope<Vec<ClubSearchResult>> {
        let result = self.fetch_club_search(name, city).await;
        finish(ClubSearch::OPERATION, log_count(result, "clubs"))
    }

    async fn fetch_club_search(
        &self,
        name: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<ClubSearchResult>, SmartPingError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let city = city.map(str::trim).filter(|c| !c.is_empty());

        let mut params = Vec::new();
        if let Some(city) = city {
            params.push(param("ville", city));
        }
        if let Some(name) = name {
            params.push(param("nom", name));
        }
        if params.is_empty() {
            return Err(SmartPingError::validation(VALIDATION_TAG, "A club name or city is required"));
        }

        self.call::<ClubSearch>(params).await
    }

    /// Club behind an opponent team label such as `ARRAS TT 3`
    pub async fn locate_opponent_club(&self, opponent: &str) -> ResultEnvelope<OpponentClub> {
        let opponent = opponent.trim();
        if opponent.is_empty() {
            return ResultEnvelope::from_error(&SmartPingError::validation(
                VALIDATION_TAG,
                "Opponent name is required",
            ));
        }

        let club_name = club_name_from_team(opponent);
        debug!("Opponent {} searched as club {}", opponent, club_name);

        match self.find_club_by_name(&club_name).await {
            Ok(Some(details)) => {
                info!("Opponent {} is club {}", opponent, details.club_number);
                let maps_url = maps_search_url(&details);
                ResultEnvelope::ok(
                    OpponentClub {
                        searched_name: club_name,
                        details,
                        maps_url,
                    },
                    OPPONENT_SOURCE,
                )
            }
            Ok(None) => {
                warn!("No club found for opponent {}", opponent);
                ResultEnvelope::failure(
                    format!("Could not find club details for opponent: {}", opponent),
                    CLUB_NOT_FOUND_TAG,
                )
            }
            Err(e) => {
                warn!("Opponent lookup failed [{}]: {}", e.tag(), e);
                ResultEnvelope::from_error(&e)
            }
        }
    }

    async fn find_club_by_name(&self, club_name: &str) -> Result<Option<ClubDetailsRecord>, SmartPingError> {
        let hits = self.fetch_club_search(Some(club_name), None).await?;
        match hits.into_iter().next() {
            Some(first) => self.fetch_club_details(&first.club_number, None).await,
            None => Ok(None),
        }
    }

    // --- Match sheets ---

    /// Game by game sheet of one fixture, from its link
    pub async fn match_details(&self, link: &MatchLink) -> ResultEnvelope<MatchDetailRecord> {
        let result = if link.is_empty() {
            Err(SmartPingError::validation(VALIDATION_TAG, "Match link is required"))
        } else {
            self.call::<MatchSheet>(link.decode()).await
        };
        if let Ok(Some(sheet)) = &result {
            info!("{} - {}: {} games", sheet.team_a, sheet.team_b, sheet.games.len());
        }
        finish_lookup(MatchSheet::OPERATION, result)
    }

    // --- Request plumbing ---

    async fn list_by_club<S: Shape>(&self, club_id: &str) -> Result<S::Output, SmartPingError> {
        let club_id = require(club_id, "Club identifier is required")?;
        self.call::<S>(vec![param("club", club_id)]).await
    }

    /// Sign, send, check the error sentinel and decode with the shape
    async fn call<S: Shape>(&self, params: Vec<(String, String)>) -> Result<S::Output, SmartPingError> {
        let operation = S::OPERATION;
        debug!("GET {} {:?}", operation.path(), params);

        let mut query = self.signer.sign().to_query();
        query.extend(operation.fixed_params());
        query.extend(params);

        let text = self.transport.get(operation, &query).await?;
        check_upstream_error(&text)?;
        parsers::decode::<S>(&text, self.strict_documents)
    }
}

fn param(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

fn require<'a>(value: &'a str, message: &str) -> Result<&'a str, SmartPingError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SmartPingError::validation(VALIDATION_TAG, message));
    }
    Ok(value)
}

fn log_count<V>(result: Result<Vec<V>, SmartPingError>, what: &str) -> Result<Vec<V>, SmartPingError> {
    result.inspect(|records| info!("Fetched {} {}", records.len(), what))
}

fn finish<V>(operation: Operation, result: Result<V, SmartPingError>) -> ResultEnvelope<V> {
    if let Err(e) = &result {
        warn!("{} failed [{}]: {}", operation.path(), e.tag(), e);
    }
    ResultEnvelope::from_result(result, operation.source())
}

fn finish_lookup<V>(operation: Operation, result: Result<Option<V>, SmartPingError>) -> ResultEnvelope<V> {
    if let Err(e) = &result {
        warn!("{} failed [{}]: {}", operation.path(), e.tag(), e);
    }
    ResultEnvelope::from_lookup(result, operation.source())
}

fn club_details_failed<V>(club_number: &str, reason: &str) -> ResultEnvelope<V> {
    warn!("Club {} details unavailable: {}", club_number, reason);
    ResultEnvelope::failure(
        format!(
            "Found club number {} but failed to get club details: {}",
            club_number, reason
        ),
        CLUB_DETAILS_FAILED_TAG,
    )
}

/// Club name from a team label: team number, team letter and host suffix removed
pub fn club_name_from_team(team_label: &str) -> String {
    let name = TRAILING_NUMBER.replace(team_label.trim(), "");
    let name = TRAILING_LETTER.replace(&name, "");
    let name = HOSTED_AT.replace(&name, "");
    name.trim().to_string()
}

fn maps_search_url(club: &ClubDetailsRecord) -> String {
    format!("{}{}", MAPS_SEARCH_URL, urlencoding::encode(&club.full_address()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DivisionLink, Zone};
    use crate::http::fake::FakeTransport;

    const TEAM_ID: &str = "202";

    fn client(transport: FakeTransport) -> SmartPingClient<FakeTransport> {
        client_with(transport, AppConfig::new())
    }

    fn client_with(transport: FakeTransport, config: AppConfig) -> SmartPingClient<FakeTransport> {
        let credentials = Credentials::new("SW123", "secret", "club@example.org").unwrap();
        SmartPingClient::with_transport(transport, credentials, &config)
    }

    fn team() -> TeamRecord {
        TeamRecord {
            team_id: TEAM_ID.to_string(),
            team_label: "LIBERCOURT CP 1".to_string(),
            division_label: "Pré-Régionale".to_string(),
            division_link: DivisionLink::new("cx_poule=54321&D1=9876&organisme_pere=1062"),
            ..Default::default()
        }
    }

    fn fixture(a: &str, b: &str, id_a: &str, id_b: &str) -> String {
        format!(
            "<tour><equa>{a}</equa><equb>{b}</equb><scorea>8</scorea><scoreb>6</scoreb>\
             <lien>renc_id=1&amp;equip_1={a}&amp;equip_2={b}&amp;equip_id1={id_a}&amp;equip_id2={id_b}</lien></tour>"
        )
    }

    fn standings() -> String {
        "<liste>\
         <classement><clt>1</clt><equipe>ARRAS TT 3</equipe><pts>20</pts><numero>07620001</numero><idequipe>101</idequipe></classement>\
         <classement><clt>2</clt><equipe>LIBERCOURT CP 1</equipe><pts>18</pts><numero>07620112</numero><idequipe>202</idequipe></classement>\
         <classement><clt>3</clt><equipe>DOUAI TT 2</equipe><pts>12</pts><numero>07590003</numero><idequipe>303</idequipe></classement>\
         </liste>"
            .to_string()
    }

    const CLUB: &str = "<liste><club><numero>07620001</numero><nom>ARRAS TT</nom>\
        <adressesalle1>Salle Coubertin</adressesalle1><codepsalle>62000</codepsalle>\
        <villesalle>ARRAS</villesalle><latitude>50.289</latitude><longitude>2.78</longitude></club></liste>";

    #[tokio::test]
    async fn test_signing_params_lead_every_request() {
        let transport = FakeTransport::new().respond("<liste><equipe><idequipe>1</idequipe></equipe></liste>");
        let client = client(transport);

        let envelope = client.club_teams("07620112").await;
        assert!(envelope.success);
        assert_eq!(envelope.source.as_deref(), Some("xml_equipe"));

        let calls = client.transport.calls();
        let keys: Vec<&str> = calls[0].query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["serie", "tm", "tmc", "id", "numclu"]);
        assert_eq!(calls[0].param("serie"), Some("club@example.org"));
        assert_eq!(calls[0].param("id"), Some("SW123"));
        assert_eq!(calls[0].param("tm").map(str::len), Some(17));
        assert_eq!(calls[0].param("tmc").map(str::len), Some(40));
    }

    #[tokio::test]
    async fn test_upstream_error_sentinel() {
        let transport = FakeTransport::new().respond("<erreurs><erreur>Identifiants invalides</erreur></erreurs>");
        let envelope = client(transport).club_licensees("07620112").await;

        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("FFTT Error: Identifiants invalides"));
        assert_eq!(envelope.source.as_deref(), Some("fftt_error"));
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn test_team_without_pool_params_fails_before_any_request() {
        let client = client(FakeTransport::new());
        let mut team = team();
        team.division_link = DivisionLink::new("D1=9876&organisme_pere=1062");

        let envelope = client.team_matches(&team).await;
        assert!(!envelope.success);
        assert_eq!(envelope.source.as_deref(), Some("team_validation"));
        assert!(envelope.error.is_some());
        assert_eq!(client.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_team_matches_keep_only_own_fixtures_in_order() {
        let body = format!(
            "<liste>{}{}{}{}{}</liste>",
            fixture("A", "B", "101", "202"),
            fixture("C", "D", "303", "404"),
            fixture("B", "C", "202", "303"),
            fixture("A", "D", "101", "404"),
            fixture("D", "B", "404", "202"),
        );
        let client = client(FakeTransport::new().respond(body));

        let envelope = client.team_matches(&team()).await;
        let matches = envelope.data.unwrap();
        let pairs: Vec<(&str, &str)> = matches.iter().map(|m| (m.team_a.as_str(), m.team_b.as_str())).collect();
        assert_eq!(pairs, vec![("A", "B"), ("B", "C"), ("D", "B")]);

        let call = &client.transport.calls()[0];
        assert_eq!(call.operation, Operation::PoolResults);
        assert_eq!(call.param("cx_poule"), Some("54321"));
        assert_eq!(call.param("D1"), Some("9876"));
        assert_eq!(call.param("action"), None);
    }

    #[tokio::test]
    async fn test_unknown_licence_is_found_nothing() {
        let client = client(FakeTransport::new().respond("<?xml version=\"1.0\"?><liste></liste>"));
        let envelope = client.licensee("9999999").await;
        assert!(envelope.success);
        assert!(envelope.data.is_none());
        assert!(envelope.error.is_none());
    }

    #[tokio::test]
    async fn test_empty_licence_element_is_not_found() {
        let client = client(FakeTransport::new().respond("<liste><licence/></liste>"));
        let envelope = client.licensee("9999999").await;
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_differs_from_not_found() {
        let transport = FakeTransport::new().fail(SmartPingError::Transport("HTTP 503: unavailable".into()));
        let envelope = client(transport).licensee("9999999").await;
        assert!(!envelope.success);
        assert_eq!(envelope.source.as_deref(), Some("transport_error"));
    }

    #[tokio::test]
    async fn test_licensee_detail() {
        let body = "<liste><licence><licence>621234</licence><nom>DUPONT</nom><prenom>Eric</prenom>\
                    <point>812</point><cat>S</cat></licence></liste>";
        let client = client(FakeTransport::new().respond(body));
        let envelope = client.licensee(" 621234 ").await;

        let record = envelope.data.unwrap();
        assert_eq!(record.licence, "621234");
        assert_eq!(record.category_label(), "Sénior");
        assert_eq!(client.transport.calls()[0].param("licence"), Some("621234"));
    }

    #[tokio::test]
    async fn test_blank_identifier_is_rejected_locally() {
        let client = client(FakeTransport::new());
        let envelope = client.club_licensees_ranked("  ").await;
        assert_eq!(envelope.source.as_deref(), Some("validation"));
        assert_eq!(client.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_pool_ranking_flags_club_teams() {
        let client = client(FakeTransport::new().respond(standings()));
        let rows = client.pool_ranking(&team(), "07620112").await.data.unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_club_team);
        assert!(!rows[0].is_club_team);
        assert_eq!(rows[0].zone, Some(Zone::Promotion));
        assert_eq!(rows[2].zone, Some(Zone::Relegation));
        assert_eq!(client.transport.calls()[0].param("action"), Some("classement"));
    }

    #[tokio::test]
    async fn test_team_club_takes_two_steps() {
        let transport = FakeTransport::new().respond(standings()).respond(CLUB);
        let client = client(transport);
        let mut team = team();
        team.team_id = "101".to_string();

        let envelope = client.team_club(&team).await;
        assert!(envelope.success);
        assert_eq!(envelope.source.as_deref(), Some("fftt_team_club_lookup"));
        let club = envelope.data.unwrap();
        assert_eq!(club.details.name, "ARRAS TT");
        assert_eq!(club.team_id, "101");
        assert_eq!(
            club.maps_url,
            "https://www.google.com/maps/search/?api=1&query=Salle%20Coubertin%2C%2062000%2C%20ARRAS"
        );

        let calls = client.transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].operation, Operation::ClubDetail);
        assert_eq!(calls[1].param("club"), Some("07620001"));
        assert_eq!(calls[1].param("idequipe"), Some("101"));
    }

    #[tokio::test]
    async fn test_team_club_distinguishes_its_failures() {
        let mut stranger = team();
        stranger.team_id = "999".to_string();
        let client = client(FakeTransport::new().respond(standings()));
        let envelope = client.team_club(&stranger).await;
        assert_eq!(envelope.source.as_deref(), Some("team_not_found_in_classement"));
        assert_eq!(client.transport.call_count(), 1);

        let transport = FakeTransport::new()
            .respond(standings())
            .fail(SmartPingError::Transport("request timed out".into()));
        let envelope = client_with(transport, AppConfig::new()).team_club(&team()).await;
        assert_eq!(envelope.source.as_deref(), Some("club_details_failed"));
        assert!(envelope.error.unwrap().contains("07620112"));
    }

    #[tokio::test]
    async fn test_club_details_carry_travel_estimate() {
        let client = client(FakeTransport::new().respond(CLUB));
        let club = client.club_details("07620001", None).await.data.unwrap();

        let travel = club.travel.unwrap();
        assert!(travel.minutes >= 10);
        assert!(travel.distance_km > 20.0);
        assert_eq!(client.transport.calls()[0].param("idequipe"), None);
    }

    #[tokio::test]
    async fn test_nearby_club_travel_hits_the_floor() {
        let body = "<liste><club><numero>07620112</numero><nom>LIBERCOURT CP</nom>\
                    <latitude>50.489</latitude><longitude>3.05</longitude></club></liste>";
        let client = client(FakeTransport::new().respond(body));

        let travel = client.club_details("07620112", None).await.data.unwrap().travel.unwrap();
        assert_eq!(travel.minutes, 10);
        assert!(travel.distance_km > 0.0);
    }

    #[tokio::test]
    async fn test_search_needs_name_or_city() {
        let client = client(FakeTransport::new());
        let envelope = client.search_clubs(None, Some(" ")).await;
        assert_eq!(envelope.source.as_deref(), Some("validation"));
        assert_eq!(client.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_locate_opponent_club() {
        let search = "<liste><club><numero>07620001</numero><nom>ARRAS TT</nom><ville>ARRAS</ville></club></liste>";
        let client = client(FakeTransport::new().respond(search).respond(CLUB));

        let envelope = client.locate_opponent_club("ARRAS TT 3").await;
        assert!(envelope.success);
        let opponent = envelope.data.unwrap();
        assert_eq!(opponent.searched_name, "ARRAS TT");
        assert_eq!(
            opponent.maps_url,
            "https://www.google.com/maps/search/?api=1&query=Salle%20Coubertin%2C%2062000%2C%20ARRAS"
        );
        assert!(opponent.details.travel.is_some());
        assert_eq!(client.transport.calls()[0].param("nom"), Some("ARRAS TT"));
    }

    #[tokio::test]
    async fn test_unknown_opponent_club() {
        let client = client(FakeTransport::new().respond("<liste></liste>"));
        let envelope = client.locate_opponent_club("INCONNU 2").await;
        assert_eq!(envelope.source.as_deref(), Some("club_not_found"));
        assert_eq!(client.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_match_details_merge_link_params() {
        let body = "<liste><resultat><equa>A</equa><equb>B</equb><resa>10</resa><resb>4</resb></resultat></liste>";
        let client = client(FakeTransport::new().respond(body));
        let link = MatchLink::new("renc_id=77&is_retour=0&equip_1=A&equip_2=B&equip_id1=1&equip_id2=2");

        let sheet = client.match_details(&link).await.data.unwrap();
        assert_eq!(sheet.result_a, "10");
        assert!(sheet.games.is_empty());

        let call = &client.transport.calls()[0];
        assert_eq!(call.param("renc_id"), Some("77"));
        assert_eq!(call.param("equip_id2"), Some("2"));
    }

    #[tokio::test]
    async fn test_empty_match_link_is_rejected() {
        let client = client(FakeTransport::new());
        let envelope = client.match_details(&MatchLink::default()).await;
        assert_eq!(envelope.source.as_deref(), Some("validation"));
        assert_eq!(client.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_strict_documents() {
        let mut config = AppConfig::new();
        config.smartping.strict_documents = true;
        let client = client_with(FakeTransport::new().respond("<html>Maintenance</html>"), config);

        let envelope = client.club_teams("07620112").await;
        assert!(!envelope.success);
        assert_eq!(envelope.source.as_deref(), Some("parse_error"));

        let lenient = client_with(FakeTransport::new().respond("<html>Maintenance</html>"), AppConfig::new());
        let envelope = lenient.club_teams("07620112").await;
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(Vec::new()));
    }

    #[test]
    fn test_club_name_from_team() {
        assert_eq!(club_name_from_team("ARRAS TT 3"), "ARRAS TT");
        assert_eq!(club_name_from_team("HENIN TT B"), "HENIN TT");
        assert_eq!(club_name_from_team("LENS TT reçoit à Liévin"), "LENS TT");
        assert_eq!(club_name_from_team("DOUAI"), "DOUAI");
    }
}
