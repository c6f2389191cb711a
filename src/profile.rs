use serde::Serialize;

use crate::percentile::{Category, PlayerRow};

/// One radar axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisValue {
    pub category: &'static str,
    pub percentile: Option<f64>,
}

/// The percentile shape of one retained player, axes in `Category::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player: String,
    pub team: String,
    pub axes: Vec<AxisValue>,
}

impl PlayerProfile {
    pub fn from_row(row: &PlayerRow) -> Self {
        Self {
            player: row.player.clone(),
            team: row.team.clone(),
            axes: Category::ALL
                .iter()
                .map(|c| AxisValue {
                    category: c.header(),
                    percentile: row.percentile(*c),
                })
                .collect(),
        }
    }
}

pub fn profiles(rows: &[PlayerRow]) -> Vec<PlayerProfile> {
    rows.iter().map(PlayerProfile::from_row).collect()
}

/// First retained row for `name`, compared case-insensitively.
pub fn find_profile(rows: &[PlayerRow], name: &str) -> Option<PlayerProfile> {
    let needle = name.trim().to_lowercase();
    rows.iter()
        .find(|r| r.player.to_lowercase() == needle)
        .map(PlayerProfile::from_row)
}
