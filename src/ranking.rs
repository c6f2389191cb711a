use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::MvpError;
use crate::percentile::PlayerRow;
use crate::score::{mvp_score, ScoreInputs};
use crate::standings::{find_team, TeamRecord};

pub const MULTI_TEAM_SUFFIX: &str = " (Multiple Teams -> Not Eligible)";
pub const INCOMPLETE_SUFFIX: &str = " (Incomplete Stats -> Not Eligible)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlayer {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "MVP Score")]
    pub score: f64,
    #[serde(skip, default = "eligible_default")]
    pub eligible: bool,
}

fn eligible_default() -> bool {
    true
}

impl ScoredPlayer {
    fn ineligible(name: &str, suffix: &str) -> Self {
        Self {
            player: format!("{name}{suffix}"),
            score: 0.0,
            eligible: false,
        }
    }
}

/// Scores one retained row against the standings.
pub fn score_player(row: &PlayerRow, teams: &[TeamRecord]) -> ScoredPlayer {
    let Some(team) = find_team(teams, &row.team) else {
        let miss = MvpError::LookupMiss {
            player: row.player.clone(),
            team: row.team.clone(),
        };
        debug!("{miss}");
        return ScoredPlayer::ineligible(&row.player, MULTI_TEAM_SUFFIX);
    };
    let Some(inputs) = ScoreInputs::from_stats(&row.stats, team.wins, team.rank) else {
        warn!("{}: missing stats, cannot score", row.player);
        return ScoredPlayer::ineligible(&row.player, INCOMPLETE_SUFFIX);
    };
    ScoredPlayer {
        player: row.player.clone(),
        score: mvp_score(&inputs),
        eligible: true,
    }
}

/// Stable sort by score, highest first.
pub fn sort_by_score(players: &mut [ScoredPlayer]) {
    players.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Keeps the first occurrence of every name.
pub fn dedup_by_name(players: Vec<ScoredPlayer>) -> Vec<ScoredPlayer> {
    let mut seen = HashSet::new();
    players
        .into_iter()
        .filter(|p| seen.insert(p.player.clone()))
        .collect()
}

/// Every retained name is scored from its first retained row. On the per-game
/// page a traded player's combined-team row precedes the per-team rows, so
/// the whole player resolves to the ineligible record.
pub fn aggregate(rows: &[PlayerRow], teams: &[TeamRecord]) -> Vec<ScoredPlayer> {
    let mut first_rows: Vec<&PlayerRow> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for row in rows {
        if seen.insert(row.player.as_str()) {
            first_rows.push(row);
        }
    }
    let mut scored: Vec<ScoredPlayer> = first_rows
        .into_iter()
        .map(|row| score_player(row, teams))
        .collect();
    sort_by_score(&mut scored);
    dedup_by_name(scored)
}
