use anyhow::Result;
use colored::Colorize;
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::{GeneratedOrderRecord, PlayerId, Tier};
use crate::seeding;
use crate::store::OrderStore;

pub struct OrderingService {
    config: AppConfig,
    store: OrderStore,
}

impl OrderingService {
    pub fn new(config: AppConfig, store_path: Option<&str>) -> Self {
        let path = store_path
            .map(str::to_string)
            .unwrap_or_else(|| config.seeding.store_path.clone());
        Self {
            config,
            store: OrderStore::new(path),
        }
    }

    /// Generates, persists and returns a new order seeded from the stored one.
    pub fn run<R: rand::Rng + ?Sized>(
        &self,
        players: &[PlayerId],
        rng: &mut R,
    ) -> Result<GeneratedOrderRecord> {
        info!("=== Generating Player Order ===");
        info!("Order file: {}", self.store.path().display());

        let previous = self.store.load()?;
        match &previous {
            Some(p) => info!("  → Re-seeding from order generated at {}", p.timestamp),
            None => info!("  → No previous order, all players start in the last tier"),
        }

        let record = seeding::generate(players, previous.as_ref(), &self.config.seeding, rng)?;
        self.store.save(&record)?;
        Ok(record)
    }

    pub fn current(&self) -> Result<Option<GeneratedOrderRecord>> {
        self.store.load()
    }
}

pub fn render_order(record: &GeneratedOrderRecord) -> String {
    let mut out = format!("Player order ({})\n", record.timestamp.to_rfc3339());
    for (idx, player) in record.players.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<24} {}\n",
            idx + 1,
            player.id,
            paint_tier(player.tier)
        ));
    }
    out
}

fn paint_tier(tier: Tier) -> colored::ColoredString {
    let label = tier.to_string();
    match tier.value() {
        1 => label.green(),
        2 => label.cyan(),
        3 => label.yellow(),
        _ => label.normal(),
    }
}
