use anyhow::{bail, Context, Result};

use nba_mvp::cli::{
    flag_value, has_flag, init_tracing, season_from_args, source_from_args, thresholds_from_args,
};
use nba_mvp::profile::{find_profile, profiles, PlayerProfile};
use nba_mvp::{build_season_report, Settings};

fn main() -> Result<()> {
    init_tracing();
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    let settings = Settings::from_env();
    let season = season_from_args(&args);
    let thresholds = thresholds_from_args(&args)?;
    let source = source_from_args(&args, &settings)?;

    let report = build_season_report(source.as_ref(), &season, &thresholds)
        .with_context(|| format!("season {season}"))?;

    let selected: Vec<PlayerProfile> = match flag_value(&args, "--player") {
        Some(name) => match find_profile(&report.players, &name) {
            Some(p) => vec![p],
            None => bail!("{name} is not among the {} eligible players", report.players.len()),
        },
        None => profiles(&report.players),
    };

    if has_flag(&args, "--json") {
        let json = serde_json::to_string_pretty(&selected).context("serialize profiles")?;
        println!("{json}");
        return Ok(());
    }

    for p in &selected {
        println!("{} ({})", p.player, p.team);
        for axis in &p.axes {
            match axis.percentile {
                Some(v) => println!("  {:<5} {:>6.3}", axis.category, v),
                None => println!("  {:<5} {:>6}", axis.category, "-"),
            }
        }
    }
    Ok(())
}
