use crate::api::operation::Operation;
use crate::api::parsers::{Shape, XmlNode};
use crate::domain::{ClubDetailsRecord, ClubSearchResult};

const ADDRESS_LINES: [&str; 3] = ["adressesalle1", "adressesalle2", "adressesalle3"];

/// `xml_club_detail.php`: a single `<club>` with its hall and contact
pub struct ClubDetail;

/// `xml_club_b.php`: `<club>` hits of a name or city search
pub struct ClubSearch;

impl Shape for ClubDetail {
    type Output = Option<ClubDetailsRecord>;
    const OPERATION: Operation = Operation::ClubDetail;

    fn decode(document: &XmlNode) -> Self::Output {
        let node = document.records("club").into_iter().next()?;

        let address = ADDRESS_LINES
            .iter()
            .map(|line| node.repaired(line))
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Some(ClubDetailsRecord {
            club_number: node.string("numero"),
            name: node.repaired("nom"),
            address,
            postal_code: node.string("codepsalle"),
            city: node.repaired("villesalle"),
            phone: node.string("telcor"),
            email: node.string("mailcor"),
            website: node.string("web"),
            latitude: node.text_of("latitude"),
            longitude: node.text_of("longitude"),
            travel: None,
        })
    }
}

impl Shape for ClubSearch {
    type Output = Vec<ClubSearchResult>;
    const OPERATION: Operation = Operation::ClubSearch;

    fn decode(document: &XmlNode) -> Self::Output {
        document
            .records("club")
            .into_iter()
            .map(|node| ClubSearchResult {
                club_number: node.string("numero"),
                name: node.repaired("nom"),
                city: node.repaired("ville"),
            })
            .collect()
    }
}
