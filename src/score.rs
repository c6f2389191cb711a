use serde::Serialize;

use crate::percentile::{round_to, RawStats};

const TEAM_WEIGHT: f64 = 0.15;
const POINTS_WEIGHT: f64 = 0.28;
const REBOUNDS_WEIGHT: f64 = 0.12;
const ASSISTS_WEIGHT: f64 = 0.16;
const EFG_WEIGHT: f64 = 0.21;
const STEALS_WEIGHT: f64 = 0.08;

const EFG_SCALE: f64 = 60.0;
const STEALS_SCALE: f64 = 20.0;

/// Everything the composite score reads, by name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreInputs {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub efg_pct: f64,
    pub steals: f64,
    pub team_wins: u32,
    pub team_rank: u32,
}

impl ScoreInputs {
    /// `None` when any stat the formula reads is missing.
    pub fn from_stats(stats: &RawStats, team_wins: u32, team_rank: u32) -> Option<Self> {
        Some(Self {
            points: stats.points?,
            rebounds: stats.rebounds?,
            assists: stats.assists?,
            efg_pct: stats.efg_pct?,
            steals: stats.steals?,
            team_wins,
            team_rank,
        })
    }
}

/// Fixed ad-hoc weighting; weights are not normalized. Only eFG% (x60) and
/// steals (x20) are scaled before weighting; rebounds and assists enter
/// unscaled, unlike the earlier script's x3 / x4. Rounded to 2 decimals.
pub fn mvp_score(inputs: &ScoreInputs) -> f64 {
    let efg = inputs.efg_pct * EFG_SCALE;
    let stl = inputs.steals * STEALS_SCALE;
    let team = (inputs.team_wins + inputs.team_rank) as f64;

    let score = TEAM_WEIGHT * team
        + POINTS_WEIGHT * inputs.points
        + REBOUNDS_WEIGHT * inputs.rebounds
        + ASSISTS_WEIGHT * inputs.assists
        + EFG_WEIGHT * efg
        + STEALS_WEIGHT * stl;
    round_to(score, 2)
}
