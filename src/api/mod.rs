pub mod operation;
pub mod parsers;
pub mod smartping_client;

pub use operation::Operation;
pub use smartping_client::{SmartPingClient, club_name_from_team};
