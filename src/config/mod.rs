pub mod credentials;
pub mod settings;

pub use credentials::Credentials;
pub use settings::{AppConfig, HomeSettings, SmartPingSettings, StatsSettings, TravelSettings};
