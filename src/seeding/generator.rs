use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::tiers::band_size;
use crate::config::settings::SeedingSettings;
use crate::domain::{GeneratedOrderRecord, OrderedPlayer, PlayerId, PlayerPresence, Tier};
use crate::errors::{EngineError, EngineResult};

/// Generates a new turn order for the present players, re-seeded from the
/// previous order.
///
/// Players ranked early last time (tier 1) get the fewest copies in the shuffle
/// pool and tend to slide back; newcomers and late players (tier 4) get the most
/// and tend to move up. The returned record carries fresh tiers taken from each
/// player's position in the new order.
pub fn generate<R: Rng + ?Sized>(
    present: &[PlayerId],
    previous: Option<&GeneratedOrderRecord>,
    config: &SeedingSettings,
    rng: &mut R,
) -> EngineResult<GeneratedOrderRecord> {
    generate_at(present, previous, config, rng, Utc::now())
}

/// [`generate`] with an explicit timestamp for the new record.
pub fn generate_at<R: Rng + ?Sized>(
    present: &[PlayerId],
    previous: Option<&GeneratedOrderRecord>,
    config: &SeedingSettings,
    rng: &mut R,
    now: DateTime<Utc>,
) -> EngineResult<GeneratedOrderRecord> {
    let players = distinct_players(present);
    if players.is_empty() {
        return Err(EngineError::NoPlayersAvailable);
    }

    // 1. Seed tiers from the previous order
    let seeded = seed_tiers(&players, previous, config);

    // 2. Weighted pool and shuffle
    let mut pool = build_weighted_pool(&seeded);
    pool.shuffle(rng);

    // 3. Keep first appearance of each player
    let order = first_occurrences(&pool);

    // 4. New tiers from position in the new order
    let record = GeneratedOrderRecord {
        players: assign_tiers(&order),
        timestamp: now,
    };

    info!(
        "Generated player order for {} players (pool of {}, {} previous entries)",
        record.len(),
        pool.len(),
        previous.map_or(0, |p| p.len())
    );
    Ok(record)
}

/// Filters a roster down to present players, decodes the stored previous order
/// and generates. A stored order that cannot be read is treated as absent.
pub fn generate_from_presence<R: Rng + ?Sized>(
    roster: &[PlayerPresence],
    previous_blob: Option<&str>,
    config: &SeedingSettings,
    rng: &mut R,
) -> EngineResult<GeneratedOrderRecord> {
    let present: Vec<PlayerId> = roster
        .iter()
        .filter(|p| p.is_present)
        .map(|p| p.player_id.clone())
        .collect();

    let previous = GeneratedOrderRecord::decode_prior(previous_blob);
    generate(&present, previous.as_ref(), config, rng)
}

fn distinct_players(present: &[PlayerId]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(present.len());
    present
        .iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect()
}

fn seed_tiers<'a>(
    players: &[&'a str],
    previous: Option<&GeneratedOrderRecord>,
    config: &SeedingSettings,
) -> Vec<(&'a str, Tier)> {
    let previous_tiers = previous.map(|p| p.tier_map()).unwrap_or_default();

    players
        .iter()
        .map(|&id| {
            let tier = previous_tiers
                .get(id)
                .copied()
                .unwrap_or(config.newcomer_tier);
            debug!("Seeding {} at {}", id, tier);
            (id, tier)
        })
        .collect()
}

fn build_weighted_pool<'a>(seeded: &[(&'a str, Tier)]) -> Vec<&'a str> {
    seeded
        .iter()
        .flat_map(|&(id, tier)| std::iter::repeat_n(id, tier.weight()))
        .collect()
}

fn first_occurrences<'a>(pool: &[&'a str]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    pool.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn assign_tiers(order: &[&str]) -> Vec<OrderedPlayer> {
    let size = band_size(order.len());
    order
        .iter()
        .enumerate()
        .map(|(idx, &id)| OrderedPlayer {
            id: id.to_string(),
            tier: Tier::for_position(idx, size),
        })
        .collect()
}
