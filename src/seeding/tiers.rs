use crate::domain::Tier;

impl Tier {
    /// Copies of a player placed in the shuffle pool: 1, 2, 4 or 8.
    pub fn weight(&self) -> usize {
        1 << (self.value() - 1)
    }

    /// Tier for a zero-based position in an ordered list split into bands of `band_size`.
    pub fn for_position(index: usize, band_size: usize) -> Tier {
        let band = index / band_size.max(1) + 1;
        let clamped = band.min(Tier::COUNT) as u8;
        Tier::try_from(clamped).unwrap_or(Tier::LAST)
    }
}

/// Players per tier band for an order of `player_count` players: `ceil(n / 4)`.
pub fn band_size(player_count: usize) -> usize {
    player_count.div_ceil(Tier::COUNT)
}
