use crate::api::operation::Operation;
use crate::api::parsers::{Shape, XmlNode, int_prefix};
use crate::domain::LicenseeRecord;

/// `xml_liste_joueur_o.php`: flat `<joueur>` list from the licence database
pub struct BasicPlayerList;

/// `xml_liste_joueur.php`: flat `<joueur>` list from the ranking database
pub struct RankedPlayerList;

/// `xml_licence_b.php`: `<licence>` records wrapped in `<liste>`, one per licensee
pub struct LicenceList;

impl Shape for BasicPlayerList {
    type Output = Vec<LicenseeRecord>;
    const OPERATION: Operation = Operation::ClubLicensees;

    fn decode(document: &XmlNode) -> Self::Output {
        document.records("joueur").into_iter().map(basic_player).collect()
    }
}

impl Shape for RankedPlayerList {
    type Output = Vec<LicenseeRecord>;
    const OPERATION: Operation = Operation::RankedLicensees;

    fn decode(document: &XmlNode) -> Self::Output {
        document.records("joueur").into_iter().map(ranked_player).collect()
    }
}

impl Shape for LicenceList {
    type Output = Vec<LicenseeRecord>;
    const OPERATION: Operation = Operation::Licences;

    /// Records without a licence number are dropped
    fn decode(document: &XmlNode) -> Self::Output {
        document
            .records("licence")
            .into_iter()
            .map(licence_record)
            .filter(|record| !record.licence.trim().is_empty())
            .collect()
    }
}

fn basic_player(node: &XmlNode) -> LicenseeRecord {
    LicenseeRecord {
        club_name: node.text_of("club"),
        club_number: node.text_of("nclub"),
        points: points_from(node, &["points", "point"]),
        ranking: node.first_text(&["classement", "clast"]),
        ..common(node)
    }
}

fn ranked_player(node: &XmlNode) -> LicenseeRecord {
    LicenseeRecord {
        club_name: node.text_of("club"),
        club_number: node.text_of("nclub"),
        points: points_from(node, &["pointm"]),
        ranking: node.text_of("clast"),
        category: node.text_of("cat"),
        monthly_points: node.text_of("pointm"),
        ..common(node)
    }
}

fn licence_record(node: &XmlNode) -> LicenseeRecord {
    LicenseeRecord {
        club_name: node.text_of("nomclub"),
        club_number: node.text_of("numclub"),
        points: points_from(node, &["pointm", "point"]),
        ranking: node.text_of("point"),
        category: node.text_of("cat"),
        monthly_points: node.text_of("pointm"),
        validity: node.text_of("validation"),
        ..common(node)
    }
}

/// Fields every player shape names the same way
fn common(node: &XmlNode) -> LicenseeRecord {
    LicenseeRecord {
        licence: node.string("licence"),
        surname: node.repaired("nom"),
        given_name: node.repaired("prenom"),
        echelon: node.text_of("echelon"),
        place: node.text_of("place").as_deref().and_then(int_prefix),
        nationality: node.text_of("natio"),
        sex: node.text_of("sexe"),
        licence_type: node.text_of("type"),
        certificate: node.text_of("certif"),
        validity: node.text_of("valide"),
        mixed_echelon: node.text_of("echelon_mixte"),
        ..Default::default()
    }
}

fn points_from(node: &XmlNode, aliases: &[&str]) -> i64 {
    node.first_text(aliases)
        .as_deref()
        .and_then(int_prefix)
        .unwrap_or(0)
}
