pub mod generator;
pub mod record;
pub mod tiers;

pub use generator::{generate, generate_at, generate_from_presence};
pub use tiers::band_size;
