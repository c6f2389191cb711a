use serde::Serialize;
use tracing::info;

use crate::config::Thresholds;
use crate::error::Result;
use crate::per_game::extract_per_game;
use crate::percentile::{rank_eligible, PlayerRow};
use crate::ranking::{aggregate, ScoredPlayer};
use crate::season_source::{validate_season, SeasonSource};
use crate::standings::{extract_standings, TeamRecord};

/// Intermediate and final results of one season run.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    pub season: String,
    pub thresholds: Thresholds,
    pub teams: Vec<TeamRecord>,
    pub players: Vec<PlayerRow>,
    pub ranking: Vec<ScoredPlayer>,
}

/// Fetches and parses both documents, then filters, ranks and scores.
/// Any fetch or layout failure aborts the run.
pub fn build_season_report(
    source: &dyn SeasonSource,
    season: &str,
    thresholds: &Thresholds,
) -> Result<SeasonReport> {
    let season = validate_season(season)?;

    let standings_html = source.standings_document(season)?;
    let teams = extract_standings(&standings_html)?;

    let per_game_html = source.per_game_document(season)?;
    let table = extract_per_game(&per_game_html)?;
    let players = rank_eligible(&table, thresholds)?;

    let ranking = aggregate(&players, &teams);
    info!(
        "season {season}: {} teams, {} eligible rows, {} ranked players",
        teams.len(),
        players.len(),
        ranking.len()
    );

    Ok(SeasonReport {
        season: season.to_string(),
        thresholds: *thresholds,
        teams,
        players,
        ranking,
    })
}

pub fn rank_season(
    source: &dyn SeasonSource,
    season: &str,
    thresholds: &Thresholds,
) -> Result<Vec<ScoredPlayer>> {
    Ok(build_season_report(source, season, thresholds)?.ranking)
}
