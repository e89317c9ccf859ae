mod clubs;
mod licensees;
mod match_details;
mod matches;
mod players;
mod teams;
mod text;
mod xml;

use log::debug;

use crate::api::operation::Operation;
use crate::errors::SmartPingError;

pub use clubs::{ClubDetail, ClubSearch};
pub use licensees::{BasicPlayerList, LicenceList, RankedPlayerList};
pub use match_details::{MatchSheet, PlayerPair, pair_for_game};
pub use matches::{PoolResults, PoolStandings};
pub use players::{PlayerGames, RankingHistory};
pub use teams::TeamList;
pub use text::repair_mojibake;
pub use xml::XmlNode;

/// One upstream document shape, decoded into canonical records
pub trait Shape {
    type Output: Default;
    const OPERATION: Operation;

    fn decode(document: &XmlNode) -> Self::Output;
}

/// Decode a response body for the shape's operation
///
/// A body without the record element yields the empty output, since an empty
/// upstream list looks the same as an unknown format. In strict mode a body
/// that has neither the record element nor a `<liste` wrapper is a parse error.
pub fn decode<S: Shape>(text: &str, strict: bool) -> Result<S::Output, SmartPingError> {
    let operation = S::OPERATION;
    let marker = format!("<{}", operation.record_element());

    if !text.contains(&marker) {
        if strict && !text.contains("<liste") {
            return Err(SmartPingError::Parse(format!(
                "Unrecognised {} document",
                operation.path()
            )));
        }
        debug!("No <{}> in {} response", operation.record_element(), operation.path());
        return Ok(S::Output::default());
    }

    let document = XmlNode::parse(text)?;
    Ok(S::decode(&document))
}

/// Leading integer of a numeric string (`"1234.5"` gives 1234)
pub(crate) fn int_prefix(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
