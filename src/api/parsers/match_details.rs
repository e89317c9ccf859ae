use crate::api::operation::Operation;
use crate::api::parsers::{Shape, XmlNode};
use crate::domain::{GameRecord, MatchDetailRecord};

/// `xml_chp_renc.php`: a `<resultat>` header, the `<joueur>` line-ups, then one `<partie>` per game
pub struct MatchSheet;

/// Two players facing each other on the line-up, with their rankings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPair {
    pub player_a: String,
    pub ranking_a: String,
    pub player_b: String,
    pub ranking_b: String,
}

impl Shape for MatchSheet {
    type Output = Option<MatchDetailRecord>;
    const OPERATION: Operation = Operation::MatchSheet;

    fn decode(document: &XmlNode) -> Self::Output {
        let header = document.records("resultat").into_iter().next()?;

        let pairs: Vec<PlayerPair> = document
            .records("joueur")
            .into_iter()
            .map(|node| PlayerPair {
                player_a: node.repaired("xja"),
                ranking_a: node.string("xca"),
                player_b: node.repaired("xjb"),
                ranking_b: node.string("xcb"),
            })
            .collect();

        let games = document
            .records("partie")
            .into_iter()
            .map(|node| {
                let player_a = node.repaired("ja");
                let player_b = node.repaired("jb");
                let pair = pair_for_game(&pairs, &player_a, &player_b);

                GameRecord {
                    ranking_a: pair.map(|p| p.ranking_a.clone()).filter(|r| !r.is_empty()),
                    ranking_b: pair.map(|p| p.ranking_b.clone()).filter(|r| !r.is_empty()),
                    player_a,
                    player_b,
                    score_a: node.string("scorea"),
                    score_b: node.string("scoreb"),
                    set_detail: node.string("detail"),
                }
            })
            .collect();

        Some(MatchDetailRecord {
            team_a: header.repaired("equa"),
            team_b: header.repaired("equb"),
            result_a: header.string("resa"),
            result_b: header.string("resb"),
            games,
        })
    }
}

/// Best-effort join of a game onto the line-up, by surname
///
/// Games carry no key back to the line-up. The first pair whose player A
/// contains the game's first A word, or whose player B contains the game's
/// first B word, wins. Two players sharing a surname can be swapped.
pub fn pair_for_game<'a>(pairs: &'a [PlayerPair], player_a: &str, player_b: &str) -> Option<&'a PlayerPair> {
    let surname_a = first_word(player_a);
    let surname_b = first_word(player_b);

    pairs.iter().find(|pair| {
        surname_a.is_some_and(|s| pair.player_a.contains(s))
            || surname_b.is_some_and(|s| pair.player_b.contains(s))
    })
}

fn first_word(name: &str) -> Option<&str> {
    name.split_whitespace().next()
}
