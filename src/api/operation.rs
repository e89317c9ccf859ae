/// Upstream operations, each with its fixed path and record element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ClubLicensees,
    RankedLicensees,
    Licences,
    ClubTeams,
    PoolResults,
    PoolStandings,
    MatchSheet,
    ClubDetail,
    ClubSearch,
    RankingHistory,
    PlayerGames,
}

impl Operation {
    pub fn path(&self) -> &'static str {
        match self {
            Self::ClubLicensees => "xml_liste_joueur_o.php",
            Self::RankedLicensees => "xml_liste_joueur.php",
            Self::Licences => "xml_licence_b.php",
            Self::ClubTeams => "xml_equipe.php",
            Self::PoolResults | Self::PoolStandings => "xml_result_equ.php",
            Self::MatchSheet => "xml_chp_renc.php",
            Self::ClubDetail => "xml_club_detail.php",
            Self::ClubSearch => "xml_club_b.php",
            Self::RankingHistory => "xml_histo_classement.php",
            Self::PlayerGames => "xml_partie_mysql.php",
        }
    }

    /// Element whose presence means the document carries data
    pub fn record_element(&self) -> &'static str {
        match self {
            Self::ClubLicensees | Self::RankedLicensees => "joueur",
            Self::Licences => "licence",
            Self::ClubTeams => "equipe",
            Self::PoolResults => "tour",
            Self::PoolStandings => "classement",
            Self::MatchSheet => "resultat",
            Self::ClubDetail | Self::ClubSearch => "club",
            Self::RankingHistory => "histo",
            Self::PlayerGames => "partie",
        }
    }

    /// Parameters every request of this operation carries
    pub fn fixed_params(&self) -> Vec<(String, String)> {
        match self {
            Self::PoolStandings => vec![("action".to_string(), "classement".to_string())],
            _ => Vec::new(),
        }
    }

    /// Provenance tag for successful envelopes
    pub fn source(&self) -> &'static str {
        self.path().trim_end_matches(".php")
    }
}
