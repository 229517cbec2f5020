use crate::domain::Tier;

#[derive(Debug, Clone)]
pub struct ScoringSettings {
    /// Points for finishing positions 0, 1 and 2; everyone below scores nothing
    pub podium_points: [u8; 3],
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            podium_points: [3, 2, 1],
        }
    }
}

impl ScoringSettings {
    pub fn points_for_rank(&self, rank: usize) -> u8 {
        self.podium_points.get(rank).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct SeedingSettings {
    /// Seed tier for players missing from the previous order
    pub newcomer_tier: Tier,
    pub store_path: String,
}

impl Default for SeedingSettings {
    fn default() -> Self {
        Self {
            newcomer_tier: Tier::LAST,
            store_path: std::env::var("ORDER_STORE_PATH")
                .unwrap_or_else(|_| "player_order.json".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scoring: ScoringSettings,
    pub seeding: SeedingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scoring: ScoringSettings::default(),
            seeding: SeedingSettings::default(),
        }
    }
}
