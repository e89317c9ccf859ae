use crate::api::operation::Operation;
use crate::api::parsers::{Shape, XmlNode, int_prefix};
use crate::domain::{MatchLink, MatchRecord, PoolStanding, Zone};

/// Pools smaller than this have no promotion or relegation zone
const ZONED_POOL_SIZE: usize = 3;

/// `xml_result_equ.php`: every `<tour>` of a pool, all teams included
pub struct PoolResults;

/// `xml_result_equ.php?action=classement`: the pool's standings table
pub struct PoolStandings;

impl Shape for PoolResults {
    type Output = Vec<MatchRecord>;
    const OPERATION: Operation = Operation::PoolResults;

    fn decode(document: &XmlNode) -> Self::Output {
        document.records("tour").into_iter().map(fixture).collect()
    }
}

fn fixture(node: &XmlNode) -> MatchRecord {
    let link = MatchLink::new(node.string("lien"));
    let (team_id_1, team_id_2) = link.team_ids();

    MatchRecord {
        team_a: node.repaired("equa"),
        team_b: node.repaired("equb"),
        score_a: node.string("scorea"),
        score_b: node.string("scoreb"),
        result_a: node.string("resa"),
        result_b: node.string("resb"),
        scheduled_date: node.string("dateprevue"),
        actual_date: node.string("datereelle"),
        start_time: node.string("heuredebut"),
        day_label: node.repaired("nomjour"),
        link,
        team_id_1,
        team_id_2,
    }
}

impl Shape for PoolStandings {
    type Output = Vec<PoolStanding>;
    const OPERATION: Operation = Operation::PoolStandings;

    /// Rows come back in upstream order; `is_club_team` is left for the caller
    fn decode(document: &XmlNode) -> Self::Output {
        let rows = document.records("classement");
        let size = rows.len();

        rows.into_iter()
            .enumerate()
            .map(|(index, node)| PoolStanding {
                position: count(node, "clt").unwrap_or(index as u32 + 1),
                team_name: node.repaired("equipe"),
                played: count(node, "joue").unwrap_or(0),
                points: int_prefix(&node.string("pts")).unwrap_or(0),
                wins: count(node, "vic").unwrap_or(0),
                draws: count(node, "nul").unwrap_or(0),
                losses: count(node, "def").unwrap_or(0),
                club_number: node.string("numero"),
                team_id: node.string("idequipe"),
                is_club_team: false,
                zone: zone_for(index, size),
            })
            .collect()
    }
}

fn count(node: &XmlNode, name: &str) -> Option<u32> {
    node.text_of(name)
        .as_deref()
        .and_then(int_prefix)
        .and_then(|n| u32::try_from(n).ok())
}

fn zone_for(index: usize, size: usize) -> Option<Zone> {
    if size < ZONED_POOL_SIZE {
        return None;
    }
    match index {
        0 => Some(Zone::Promotion),
        i if i + 1 == size => Some(Zone::Relegation),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parsers::decode;

    #[test]
    fn test_fixture_team_ids_come_from_link() {
        let doc = r#"<liste>
  <tour>
    <libelle>Poule 2 - tour n°1 du 20/09/2025</libelle>
    <equa>ARRAS TT 3</equa><equb>LIBERCOURT CP 1</equb>
    <scorea>8</scorea><scoreb>6</scoreb><resa>V</resa><resb>D</resb>
    <dateprevue>20/09/2025</dateprevue><datereelle>20/09/2025</datereelle>
    <heuredebut>16:00</heuredebut><nomjour>Journée 1</nomjour>
    <lien>renc_id=1&amp;is_retour=0&amp;equip_1=ARRAS+TT+3&amp;equip_2=LIBERCOURT+CP+1&amp;equip_id1=101&amp;equip_id2=202&amp;clubnum_1=07620001&amp;clubnum_2=07620112</lien>
  </tour>
</liste>"#;

        let matches = decode::<PoolResults>(doc, false).unwrap();
        assert_eq!(matches.len(), 1);
        let fixture = &matches[0];
        assert_eq!(fixture.team_a, "ARRAS TT 3");
        assert_eq!(fixture.score_a, "8");
        assert_eq!(fixture.start_time, "16:00");
        assert_eq!(fixture.team_id_1.as_deref(), Some("101"));
        assert_eq!(fixture.team_id_2.as_deref(), Some("202"));
        assert!(!fixture.link.is_empty());
    }

    fn standings_doc(rows: usize) -> String {
        let body: String = (1..=rows)
            .map(|i| {
                format!(
                    "<classement><poule>Poule 2</poule><clt>{i}</clt><equipe>EQUIPE {i}</equipe>\
                     <joue>7</joue><pts>{pts}</pts><numero>0762000{i}</numero>\
                     <vic>{vic}</vic><def>1</def><nul>0</nul><idequipe>{id}</idequipe></classement>",
                    pts = 22 - i,
                    vic = 7 - i,
                    id = 100 + i,
                )
            })
            .collect();
        format!("<liste>{body}</liste>")
    }

    #[test]
    fn test_standings_zones() {
        let standings = decode::<PoolStandings>(&standings_doc(4), false).unwrap();
        assert_eq!(standings.len(), 4);
        assert_eq!(standings[0].zone, Some(Zone::Promotion));
        assert_eq!(standings[1].zone, None);
        assert_eq!(standings[2].zone, None);
        assert_eq!(standings[3].zone, Some(Zone::Relegation));

        assert_eq!(standings[0].position, 1);
        assert_eq!(standings[0].points, 21);
        assert_eq!(standings[0].wins, 6);
        assert_eq!(standings[0].club_number, "07620001");
        assert_eq!(standings[3].team_id, "104");
        assert!(standings.iter().all(|row| !row.is_club_team));
    }

    #[test]
    fn test_small_pools_have_no_zones() {
        let standings = decode::<PoolStandings>(&standings_doc(2), false).unwrap();
        assert!(standings.iter().all(|row| row.zone.is_none()));
    }

    #[test]
    fn test_missing_position_uses_row_order() {
        let doc = "<liste><classement><equipe>A</equipe></classement><classement><equipe>B</equipe></classement></liste>";
        let standings = decode::<PoolStandings>(doc, false).unwrap();
        assert_eq!(standings[1].position, 2);
        assert_eq!(standings[1].played, 0);
    }

    #[test]
    fn test_standing_points_keep_large_and_negative_values() {
        let doc = "<liste><classement><equipe>A</equipe><pts>3000000000</pts></classement>\
                   <classement><equipe>B</equipe><pts>-2</pts></classement></liste>";
        let standings = decode::<PoolStandings>(doc, false).unwrap();
        assert_eq!(standings[0].points, 3_000_000_000);
        assert_eq!(standings[1].points, -2);
    }
}
