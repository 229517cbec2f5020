pub mod resolver;
pub mod standings;

pub use resolver::{medal_points, resolve, resolve_with_mode};
pub use standings::{individual_standings, team_standings};
