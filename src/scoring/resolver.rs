use log::{debug, info};
use std::cmp::Ordering;

use crate::config::settings::ScoringSettings;
use crate::domain::{Medal, ResolutionMode, ScoreEntry, ScoreRow};
use crate::errors::EngineResult;

/// Resolves one game instance's scores into points and medals.
///
/// Rows without a player are dropped and get no output entry. In automatic mode
/// the top three scores earn gold, silver and bronze; in override mode each row's
/// own medal decides its points and the score is carried through untouched.
pub fn resolve(
    rows: &[ScoreRow],
    mode: ResolutionMode,
    config: &ScoringSettings,
) -> Vec<ScoreEntry> {
    let valid_rows = filter_scored_rows(rows);

    let entries = match mode {
        ResolutionMode::Automatic => resolve_by_rank(&valid_rows, config),
        ResolutionMode::Override => resolve_by_medal(&valid_rows, config),
    };

    info!(
        "Resolved {} scores in {} mode ({} rows dropped)",
        entries.len(),
        mode.as_str(),
        rows.len() - valid_rows.len()
    );
    entries
}

/// Same as [`resolve`], with the mode given as `"automatic"` or `"override"`.
pub fn resolve_with_mode(
    rows: &[ScoreRow],
    mode: &str,
    config: &ScoringSettings,
) -> EngineResult<Vec<ScoreEntry>> {
    let mode = mode.parse::<ResolutionMode>()?;
    Ok(resolve(rows, mode, config))
}

/// Points a medal is worth: gold 3, silver 2, bronze 1, none 0.
pub fn medal_points(medal: Option<Medal>, config: &ScoringSettings) -> u8 {
    medal.map_or(0, |m| config.points_for_rank(m.rank()))
}

fn filter_scored_rows(rows: &[ScoreRow]) -> Vec<(&str, &ScoreRow)> {
    rows.iter()
        .filter_map(|row| match row.player() {
            Some(player_id) => Some((player_id, row)),
            None => {
                debug!("Dropping score row without a player (score {})", row.score);
                None
            }
        })
        .collect()
}

fn resolve_by_rank(rows: &[(&str, &ScoreRow)], config: &ScoringSettings) -> Vec<ScoreEntry> {
    let ranking = rank_by_score(rows);

    rows.iter()
        .map(|&(player_id, row)| {
            // Duplicate (score, player) pairs share the first matching position
            let rank = ranking
                .iter()
                .position(|&(id, score)| id == player_id && score == row.score)
                .unwrap_or(ranking.len());

            ScoreEntry {
                player_id: player_id.to_string(),
                score: row.score,
                points: config.points_for_rank(rank),
                medal: Medal::for_rank(rank),
            }
        })
        .collect()
}

/// Highest score first, NaN last. `sort_by` is stable, so equal scores keep input order.
fn rank_by_score<'a>(rows: &[(&'a str, &ScoreRow)]) -> Vec<(&'a str, f64)> {
    let mut ranking: Vec<(&str, f64)> = rows
        .iter()
        .map(|&(player_id, row)| (player_id, row.score))
        .collect();
    ranking.sort_by(|a, b| descending(a.1, b.1));
    ranking
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

fn resolve_by_medal(rows: &[(&str, &ScoreRow)], config: &ScoringSettings) -> Vec<ScoreEntry> {
    rows.iter()
        .map(|&(player_id, row)| ScoreEntry {
            player_id: player_id.to_string(),
            score: row.score,
            points: medal_points(row.medal, config),
            medal: row.medal,
        })
        .collect()
}
