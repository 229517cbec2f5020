use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::{Medal, ScoreEntry, ScoreRow};
use crate::scoring;

pub struct ScoringService {
    config: AppConfig,
}

impl ScoringService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, mode: &str, raw_rows: &[String]) -> Result<Vec<ScoreEntry>> {
        let rows = raw_rows
            .iter()
            .map(|raw| parse_score_row(raw))
            .collect::<Result<Vec<_>>>()?;
        info!("Resolving {} score rows", rows.len());

        let entries = scoring::resolve_with_mode(&rows, mode, &self.config.scoring)?;
        Ok(entries)
    }
}

/// Parses `player=score` or `player=score:medal`. An empty player is kept so
/// the resolver can drop it like any other row without a player.
pub fn parse_score_row(raw: &str) -> Result<ScoreRow> {
    let (player, rest) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected player=score, got '{}'", raw))?;

    let (score, medal) = match rest.split_once(':') {
        Some((score, medal)) => (score, parse_medal(medal)?),
        None => (rest, None),
    };

    let score: f64 = score
        .trim()
        .parse()
        .with_context(|| format!("Invalid score in '{}'", raw))?;
    if !score.is_finite() {
        bail!("Score must be a finite number in '{}'", raw);
    }

    Ok(ScoreRow {
        player_id: Some(player.trim().to_string()),
        score,
        medal,
    })
}

fn parse_medal(raw: &str) -> Result<Option<Medal>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match raw.parse::<Medal>() {
        Ok(medal) => Ok(Some(medal)),
        Err(e) => bail!(e),
    }
}

pub fn render_scores(entries: &[ScoreEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let medal = match entry.medal {
            Some(Medal::Gold) => "gold".yellow().bold(),
            Some(Medal::Silver) => "silver".white().bold(),
            Some(Medal::Bronze) => "bronze".red(),
            None => "-".dimmed(),
        };
        out.push_str(&format!(
            "{:<24} {:>10} {:>8}  {} pt{}\n",
            entry.player_id,
            entry.score,
            medal,
            entry.points,
            if entry.points == 1 { "" } else { "s" }
        ));
    }
    out
}
