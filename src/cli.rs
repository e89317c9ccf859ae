use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "FFTT SmartPing client")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

/// Which upstream list to read club licensees from
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LicenseeVariant {
    /// Licence database, with points and echelon
    #[default]
    Basic,
    /// Ranking database, with official ranking and monthly points
    Ranked,
    /// Licence records, with category and validation
    Categories,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the licensees of a club
    Licensees {
        /// Club number (defaults to the home club)
        #[arg(short, long)]
        club: Option<String>,
        #[arg(short, long, value_enum, default_value_t = LicenseeVariant::Basic)]
        variant: LicenseeVariant,
    },
    /// Show one licensee
    Licensee { licence: String },
    /// Ranking history of a licensee
    History { licence: String },
    /// Individual games of a licensee
    PlayerMatches { licence: String },
    /// List the teams of a club
    Teams {
        #[arg(short, long)]
        club: Option<String>,
    },
    /// Fixtures of one team
    Matches {
        /// Team id, as listed by `teams`
        team: String,
        #[arg(short, long)]
        club: Option<String>,
    },
    /// Club details of one team's club, found through its pool standings
    TeamClub {
        team: String,
        #[arg(short, long)]
        club: Option<String>,
    },
    /// Standings of one team's pool
    PoolRanking {
        team: String,
        #[arg(short, long)]
        club: Option<String>,
    },
    /// Details of a club, with travel estimate from home
    Club {
        number: String,
        /// Team id, to pick the hall this team plays in
        #[arg(short, long)]
        team: Option<String>,
    },
    /// Search clubs by name and/or city
    SearchClubs {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Locate the club behind an opponent team label
    Opponent { label: String },
    /// Game by game sheet of a fixture, from its link
    MatchDetails { link: String },
    /// Licensee and team counts of the home club
    Stats,
    /// Print shell completions
    Completions { shell: Shell },
}
