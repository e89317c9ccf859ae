pub mod category;
mod envelope;
pub mod links;
pub mod models;
pub mod travel;

pub use category::{AgeGroup, CategoryKind, decode_category};
pub use envelope::ResultEnvelope;
pub use links::{DivisionLink, MatchLink, PoolParams};
pub use models::*;
pub use travel::{GeoPoint, TravelEstimate, estimate_travel, haversine_km};
