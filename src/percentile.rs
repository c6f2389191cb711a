use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Thresholds;
use crate::error::{MvpError, Result};
use crate::per_game::StatsTable;

pub const PLAYER_COLUMN: &str = "Player";
/// Older pages label the team column `Tm`, newer ones `Team`.
pub const TEAM_COLUMNS: [&str; 2] = ["Tm", "Team"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    GamesStarted,
    EffectiveFgPct,
    Steals,
    Rebounds,
    Assists,
    Points,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::GamesStarted,
        Category::EffectiveFgPct,
        Category::Steals,
        Category::Rebounds,
        Category::Assists,
        Category::Points,
    ];

    /// Column header on the per-game page.
    pub fn header(self) -> &'static str {
        match self {
            Category::GamesStarted => "GS",
            Category::EffectiveFgPct => "eFG%",
            Category::Steals => "STL",
            Category::Rebounds => "TRB",
            Category::Assists => "AST",
            Category::Points => "PTS",
        }
    }
}

/// Per-game numbers after coercion. `None` marks a cell that was not a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RawStats {
    pub games_started: Option<f64>,
    pub efg_pct: Option<f64>,
    pub steals: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
    pub points: Option<f64>,
}

impl RawStats {
    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::GamesStarted => self.games_started,
            Category::EffectiveFgPct => self.efg_pct,
            Category::Steals => self.steals,
            Category::Rebounds => self.rebounds,
            Category::Assists => self.assists,
            Category::Points => self.points,
        }
    }

    fn set(&mut self, category: Category, value: Option<f64>) {
        let slot = match category {
            Category::GamesStarted => &mut self.games_started,
            Category::EffectiveFgPct => &mut self.efg_pct,
            Category::Steals => &mut self.steals,
            Category::Rebounds => &mut self.rebounds,
            Category::Assists => &mut self.assists,
            Category::Points => &mut self.points,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRow {
    pub player: String,
    pub team: String,
    pub stats: RawStats,
    /// Filled by [`assign_percentiles`]; absent for categories the player has
    /// no value in.
    pub percentiles: HashMap<Category, f64>,
}

impl PlayerRow {
    pub fn new(player: impl Into<String>, team: impl Into<String>, stats: RawStats) -> Self {
        Self {
            player: player.into(),
            team: team.into(),
            stats,
            percentiles: HashMap::new(),
        }
    }

    pub fn percentile(&self, category: Category) -> Option<f64> {
        self.percentiles.get(&category).copied()
    }
}

/// Turns the raw text table into typed rows. Unreadable stat cells become
/// missing values.
pub fn coerce_rows(table: &StatsTable) -> Result<Vec<PlayerRow>> {
    let player_idx = table.require_column(&[PLAYER_COLUMN])?;
    let team_idx = table.require_column(&TEAM_COLUMNS)?;
    let mut stat_idx = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        stat_idx.push((category, table.require_column(&[category.header()])?));
    }

    let rows = table
        .rows
        .iter()
        .map(|cells| {
            let mut stats = RawStats::default();
            for (category, idx) in &stat_idx {
                let raw = cells.get(*idx).map(String::as_str).unwrap_or("");
                match parse_stat(category.header(), raw) {
                    Ok(v) => stats.set(*category, Some(v)),
                    Err(e) => {
                        debug!("{}: {e}", cells.get(player_idx).map(String::as_str).unwrap_or("?"));
                        stats.set(*category, None);
                    }
                }
            }
            PlayerRow::new(
                cells.get(player_idx).cloned().unwrap_or_default(),
                cells.get(team_idx).cloned().unwrap_or_default(),
                stats,
            )
        })
        .collect();
    Ok(rows)
}

pub fn parse_stat(column: &str, raw: &str) -> Result<f64> {
    let s = raw.trim();
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MvpError::NumericCoercion {
            column: column.to_string(),
            raw: raw.to_string(),
        })
}

/// Strict `>` on points, games started and eFG%. A missing value never passes.
pub fn passes(stats: &RawStats, thresholds: &Thresholds) -> bool {
    let above = |v: Option<f64>, floor: f64| v.is_some_and(|v| v > floor);
    above(stats.points, thresholds.min_points)
        && above(stats.games_started, thresholds.min_games_started)
        && above(stats.efg_pct, thresholds.min_efg)
}

pub fn filter_rows(rows: Vec<PlayerRow>, thresholds: &Thresholds) -> Vec<PlayerRow> {
    let total = rows.len();
    let kept: Vec<PlayerRow> = rows
        .into_iter()
        .filter(|row| passes(&row.stats, thresholds))
        .collect();
    info!("{} of {} player rows pass thresholds", kept.len(), total);
    kept
}

/// Fractional rank with ties averaged: the value at 1-based sorted positions
/// `a..=b` gets `(a + b) / 2 / n`. Missing values get `None` and are not
/// counted in `n`.
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| v.map(|v| (idx, v)))
        .collect();
    let n = present.len();
    let mut out = vec![None; values.len()];
    if n == 0 {
        return out;
    }
    present.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut start = 0usize;
    while start < n {
        let mut end = start + 1;
        while end < n && present[end].1 == present[start].1 {
            end += 1;
        }
        // positions start+1 ..= end
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        let pct = avg_rank / n as f64;
        for (idx, _) in &present[start..end] {
            out[*idx] = Some(pct);
        }
        start = end;
    }
    out
}

pub fn assign_percentiles(rows: &mut [PlayerRow]) {
    for category in Category::ALL {
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.stats.get(category)).collect();
        for (row, pct) in rows.iter_mut().zip(percentile_ranks(&values)) {
            match pct {
                Some(p) => {
                    row.percentiles.insert(category, round_percentile(p));
                }
                None => {
                    row.percentiles.remove(&category);
                }
            }
        }
    }
}

/// Coerce, filter, then rank every category over the retained set.
pub fn rank_eligible(table: &StatsTable, thresholds: &Thresholds) -> Result<Vec<PlayerRow>> {
    let rows = coerce_rows(table)?;
    let mut kept = filter_rows(rows, thresholds);
    assign_percentiles(&mut kept);
    Ok(kept)
}

/// 3 decimals, floored at 0.001 so large pools never round a rank to zero.
pub fn round_percentile(p: f64) -> f64 {
    round_to(p, 3).max(MIN_PERCENTILE)
}

const MIN_PERCENTILE: f64 = 0.001;

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
