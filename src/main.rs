use anyhow::{Context, Result};

use nba_mvp::cli::{
    has_flag, init_tracing, season_from_args, source_from_args, thresholds_from_args,
    top_from_args,
};
use nba_mvp::{rank_season, ScoredPlayer, Settings};

fn main() -> Result<()> {
    init_tracing();
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        print_usage();
        return Ok(());
    }

    let settings = Settings::from_env();
    let season = season_from_args(&args);
    let thresholds = thresholds_from_args(&args)?;
    let top = top_from_args(&args)?;
    let source = source_from_args(&args, &settings)?;

    let mut ranking = match rank_season(source.as_ref(), &season, &thresholds) {
        Ok(ranking) => ranking,
        Err(err) => {
            let status = err.response_status();
            return Err(err).with_context(|| format!("season {season} failed ({status})"));
        }
    };
    if let Some(n) = top {
        ranking.truncate(n);
    }

    if has_flag(&args, "--json") {
        let json = serde_json::to_string_pretty(&ranking).context("serialize ranking")?;
        println!("{json}");
    } else {
        print_table(&season, &ranking);
    }
    Ok(())
}

fn print_table(season: &str, ranking: &[ScoredPlayer]) {
    println!("MVP ranking {season}");
    println!("{:<5} {:<48} {:>9}", "Rank", "Player", "Score");
    println!("{}", "-".repeat(64));
    for (idx, p) in ranking.iter().enumerate() {
        println!("{:<5} {:<48} {:>9.2}", idx + 1, p.player, p.score);
    }
    let ineligible = ranking.iter().filter(|p| !p.eligible).count();
    println!();
    println!("Players: {} ({} not eligible)", ranking.len(), ineligible);
}

fn print_usage() {
    println!("usage: nba_mvp [--season YEAR] [--min-points N] [--min-efg PCT] [--min-gs N]");
    println!("               [--top N] [--json] [--from-dir DIR]");
    println!();
    println!("Defaults: current year, points > 15, eFG% > 40, games started > 50.");
    println!("--from-dir reads NBA_<season>_standings.html and NBA_<season>_per_game.html");
    println!("from DIR instead of basketball-reference.com.");
}
