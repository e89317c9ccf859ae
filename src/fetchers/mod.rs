pub mod club_stats;

pub use club_stats::{ClubStats, ClubStatsFetcher, ClubStatsService};
