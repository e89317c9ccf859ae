use crate::api::operation::Operation;
use crate::api::parsers::{Shape, XmlNode};
use crate::domain::{DivisionLink, TeamRecord};

/// `xml_equipe.php`: one `<equipe>` per team a club entered
pub struct TeamList;

impl Shape for TeamList {
    type Output = Vec<TeamRecord>;
    const OPERATION: Operation = Operation::ClubTeams;

    fn decode(document: &XmlNode) -> Self::Output {
        document
            .records("equipe")
            .into_iter()
            .map(|node| TeamRecord {
                team_id: node.string("idequipe"),
                team_label: node.repaired("libequipe"),
                division_label: node.repaired("libdivision"),
                division_link: DivisionLink::new(node.string("liendivision")),
                epreuve_id: node.string("idepr"),
                epreuve_label: node.repaired("libepr"),
            })
            .collect()
    }
}
