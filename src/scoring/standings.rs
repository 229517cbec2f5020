use log::info;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::domain::{Medal, PlayerId, ScoreRecord, StandingEntry, Tally, Team, TeamStandingEntry};

impl Tally {
    pub fn add(&mut self, record: &ScoreRecord) {
        self.total_points += record.points;
        self.total_games += 1;
        match record.medal {
            Some(Medal::Gold) => self.medals.gold += 1,
            Some(Medal::Silver) => self.medals.silver += 1,
            Some(Medal::Bronze) => self.medals.bronze += 1,
            None => {}
        }
    }

    /// Leaderboard order: points, then gold, silver, bronze; best first.
    pub fn rank_cmp(&self, other: &Tally) -> Ordering {
        other
            .total_points
            .cmp(&self.total_points)
            .then(other.medals.gold.cmp(&self.medals.gold))
            .then(other.medals.silver.cmp(&self.medals.silver))
            .then(other.medals.bronze.cmp(&self.medals.bronze))
    }
}

/// Individual leaderboard for a tournament roster.
///
/// Every rostered player is listed, even without scores. Scores belonging to
/// players outside the roster, or to no player, are skipped.
pub fn individual_standings(roster: &[PlayerId], scores: &[ScoreRecord]) -> Vec<StandingEntry> {
    let mut tallies: HashMap<&str, Tally> = roster
        .iter()
        .map(|id| (id.as_str(), Tally::default()))
        .collect();

    for record in scores {
        let Some(player_id) = record.player_id.as_deref() else {
            continue;
        };
        if let Some(tally) = tallies.get_mut(player_id) {
            tally.add(record);
        }
    }

    let mut seen = HashSet::new();
    let mut standings: Vec<StandingEntry> = roster
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .map(|id| StandingEntry {
            player_id: id.clone(),
            tally: tallies[id.as_str()],
        })
        .collect();

    standings.sort_by(|a, b| a.tally.rank_cmp(&b.tally));
    info!("Built individual standings for {} players", standings.len());
    standings
}

/// Team leaderboard. A score counts for a team when the team assigned that
/// player to that score's event.
pub fn team_standings(teams: &[Team], scores: &[ScoreRecord]) -> Vec<TeamStandingEntry> {
    let mut standings: Vec<TeamStandingEntry> = teams
        .iter()
        .map(|team| TeamStandingEntry {
            team_id: team.id.clone(),
            name: team.name.clone(),
            tally: tally_team(team, scores),
        })
        .collect();

    standings.sort_by(|a, b| a.tally.rank_cmp(&b.tally));
    info!("Built team standings for {} teams", standings.len());
    standings
}

fn tally_team(team: &Team, scores: &[ScoreRecord]) -> Tally {
    let mut tally = Tally::default();
    for record in scores.iter().filter(|r| is_team_score(team, r)) {
        tally.add(record);
    }
    tally
}

fn is_team_score(team: &Team, record: &ScoreRecord) -> bool {
    let Some(player_id) = record.player_id.as_deref() else {
        return false;
    };
    team.assignments
        .iter()
        .any(|a| a.player_id == player_id && a.event_id == record.event_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MedalCount, TeamAssignment};

    fn record(player_id: &str, event_id: &str, points: u32, medal: Option<Medal>) -> ScoreRecord {
        ScoreRecord {
            player_id: Some(player_id.to_string()),
            event_id: event_id.to_string(),
            points,
            medal,
        }
    }

    fn roster(ids: &[&str]) -> Vec<PlayerId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_individual_totals() {
        let scores = vec![
            record("ann", "e1", 3, Some(Medal::Gold)),
            record("ann", "e2", 1, Some(Medal::Bronze)),
            record("bob", "e1", 2, Some(Medal::Silver)),
            record("bob", "e2", 0, None),
        ];

        let standings = individual_standings(&roster(&["bob", "ann", "cid"]), &scores);

        assert_eq!(standings[0].player_id, "ann");
        assert_eq!(
            standings[0].tally,
            Tally {
                total_points: 4,
                total_games: 2,
                medals: MedalCount { gold: 1, silver: 0, bronze: 1 },
            }
        );
        assert_eq!(standings[1].player_id, "bob");
        assert_eq!(standings[1].tally.total_games, 2);
        assert_eq!(standings[2].player_id, "cid");
        assert_eq!(standings[2].tally, Tally::default());
    }

    #[test]
    fn test_ties_break_on_medal_colour() {
        let scores = vec![
            // both on 3 points; ann via three bronzes, bob via one gold
            record("ann", "e1", 1, Some(Medal::Bronze)),
            record("ann", "e2", 1, Some(Medal::Bronze)),
            record("ann", "e3", 1, Some(Medal::Bronze)),
            record("bob", "e1", 3, Some(Medal::Gold)),
        ];

        let standings = individual_standings(&roster(&["ann", "bob"]), &scores);
        assert_eq!(standings[0].player_id, "bob");
        assert_eq!(standings[1].player_id, "ann");
    }

    #[test]
    fn test_unknown_and_missing_players_ignored() {
        let mut orphan = record("x", "e1", 3, Some(Medal::Gold));
        orphan.player_id = None;
        let scores = vec![orphan, record("stranger", "e1", 2, Some(Medal::Silver))];

        let standings = individual_standings(&roster(&["ann"]), &scores);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].tally, Tally::default());
    }

    #[test]
    fn test_duplicate_roster_entries_listed_once() {
        let scores = vec![record("ann", "e1", 3, Some(Medal::Gold))];
        let standings = individual_standings(&roster(&["ann", "ann"]), &scores);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].tally.total_points, 3);
    }

    #[test]
    fn test_team_scores_match_player_and_event() {
        let teams = vec![
            Team {
                id: "t1".into(),
                name: "Meeples".into(),
                assignments: vec![
                    TeamAssignment { player_id: "ann".into(), event_id: "e1".into() },
                    TeamAssignment { player_id: "bob".into(), event_id: "e2".into() },
                ],
            },
            Team {
                id: "t2".into(),
                name: "Dice".into(),
                assignments: vec![TeamAssignment { player_id: "cid".into(), event_id: "e1".into() }],
            },
        ];
        let scores = vec![
            record("ann", "e1", 3, Some(Medal::Gold)),
            // ann did not represent t1 in e2
            record("ann", "e2", 3, Some(Medal::Gold)),
            record("bob", "e2", 1, Some(Medal::Bronze)),
            record("cid", "e1", 2, Some(Medal::Silver)),
        ];

        let standings = team_standings(&teams, &scores);

        assert_eq!(standings[0].team_id, "t1");
        assert_eq!(standings[0].name, "Meeples");
        assert_eq!(standings[0].tally.total_points, 4);
        assert_eq!(standings[0].tally.total_games, 2);
        assert_eq!(standings[0].tally.medals.gold, 1);
        assert_eq!(standings[1].team_id, "t2");
        assert_eq!(standings[1].tally.total_points, 2);
    }

    #[test]
    fn test_team_without_scores() {
        let teams = vec![Team { id: "t".into(), name: "Idle".into(), assignments: vec![] }];
        let standings = team_standings(&teams, &[record("ann", "e1", 3, Some(Medal::Gold))]);
        assert_eq!(standings[0].tally, Tally::default());
    }
}
