use crate::api::operation::Operation;
use crate::api::parsers::{Shape, XmlNode};
use crate::domain::{PlayerMatch, RankingHistoryEntry};

pub struct RankingHistory;

pub struct PlayerGames;

impl Shape for RankingHistory {
    type Output = Vec<RankingHistoryEntry>;
    const OPERATION: Operation = Operation::RankingHistory;

    fn decode(document: &XmlNode) -> Self::Output {
        document
            .records("histo")
            .into_iter()
            .map(|node| RankingHistoryEntry {
                season: node.string("saison"),
                phase: node.string("phase"),
                points: node.text_of("point"),
                echelon: node.text_of("echelon"),
                place: node.text_of("place"),
            })
            .collect()
    }
}

impl Shape for PlayerGames {
    type Output = Vec<PlayerMatch>;
    const OPERATION: Operation = Operation::PlayerGames;

    fn decode(document: &XmlNode) -> Self::Output {
        document
            .records("partie")
            .into_iter()
            .map(|node| PlayerMatch {
                date: node.string("date"),
                opponent_name: node.repaired("advnompre"),
                opponent_licence: node.text_of("advlic"),
                opponent_ranking: node.text_of("advclaof"),
                victory: node.text_of("vd").is_some_and(|vd| vd.eq_ignore_ascii_case("V")),
                points_delta: decimal(node, "pointres"),
                coefficient: decimal(node, "coefchamp"),
                championship_code: node.text_of("codechamp"),
                round: node.text_of("numjourn"),
            })
            .collect()
    }
}

/// Upstream decimals sometimes use a comma
fn decimal(node: &XmlNode, name: &str) -> Option<f64> {
    node.text_of(name)?.replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parsers::decode;

    #[test]
    fn test_ranking_history() {
        let doc = "<liste><histo><echelon>R</echelon><place>1320</place><point>812</point><saison>Saison 2024 / 2025</saison><phase>2</phase></histo>\
                   <histo><point>790</point><saison>Saison 2024 / 2025</saison><phase>1</phase></histo></liste>";
        let history = decode::<RankingHistory>(doc, false).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].season, "Saison 2024 / 2025");
        assert_eq!(history[0].points.as_deref(), Some("812"));
        assert_eq!(history[1].place, None);
    }

    #[test]
    fn test_player_games() {
        let doc = r#"<liste>
  <partie>
    <licence>621234</licence><advlic>629999</advlic><vd>V</vd><numjourn>3</numjourn>
    <codechamp>FF</codechamp><date>11/10/2025</date><advsexe>M</advsexe>
    <advnompre>LEFÃˆVRE Jean</advnompre><pointres>7,5</pointres><coefchamp>1</coefchamp><advclaof>9</advclaof>
  </partie>
  <partie><date>12/10/2025</date><advnompre>PETIT Hugo</advnompre><vd>D</vd><pointres>-2.25</pointres></partie>
</liste>"#;
        let games = decode::<PlayerGames>(doc, false).unwrap();
        assert_eq!(games.len(), 2);

        let win = &games[0];
        assert!(win.victory);
        assert_eq!(win.opponent_name, "LEFÈVRE Jean");
        assert_eq!(win.points_delta, Some(7.5));
        assert_eq!(win.coefficient, Some(1.0));
        assert_eq!(win.round.as_deref(), Some("3"));

        let loss = &games[1];
        assert!(!loss.victory);
        assert_eq!(loss.points_delta, Some(-2.25));
        assert_eq!(loss.opponent_licence, None);
    }
}
