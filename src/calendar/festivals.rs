//! Festival dates. Festival days are always sunny and announced in the
//! morning.
//!
//! - Egg Festival (Spring 13)
//! - Luau (Summer 11)
//! - Harvest Festival (Fall 16)
//! - Winter Star (Winter 25)

use serde::{Deserialize, Serialize};

use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FestivalKind {
    EggFestival,
    Luau,
    HarvestFestival,
    WinterStar,
}

impl FestivalKind {
    pub fn display_name(self) -> &'static str {
        match self {
            FestivalKind::EggFestival => "Egg Festival",
            FestivalKind::Luau => "Luau",
            FestivalKind::HarvestFestival => "Harvest Festival",
            FestivalKind::WinterStar => "Winter Star Festival",
        }
    }
}

pub fn festival_for_date(season: Season, day: u8) -> Option<FestivalKind> {
    match (season, day) {
        (Season::Spring, 13) => Some(FestivalKind::EggFestival),
        (Season::Summer, 11) => Some(FestivalKind::Luau),
        (Season::Fall, 16) => Some(FestivalKind::HarvestFestival),
        (Season::Winter, 25) => Some(FestivalKind::WinterStar),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_festival_per_season() {
        for season in Season::ALL {
            let count = (1..=DAYS_PER_SEASON)
                .filter(|&d| festival_for_date(season, d).is_some())
                .count();
            assert_eq!(count, 1);
        }
        assert_eq!(festival_for_date(Season::Spring, 1), None);
    }
}
