use anyhow::{Context, Result};
use chrono::Datelike;

use crate::config::{Settings, Thresholds};
use crate::season_source::{BasketballReference, DirectorySource, SeasonSource};

/// Value of `--name value` or `--name=value`.
pub fn flag_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            let trimmed = val.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() && !next.starts_with("--") {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

pub fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    flag_value(args, name)
        .map(|raw| raw.parse::<T>().with_context(|| format!("invalid {name} {raw:?}")))
        .transpose()
}

/// `--min-points`, `--min-efg` (percent) and `--min-gs`.
pub fn thresholds_from_args(args: &[String]) -> Result<Thresholds> {
    Ok(Thresholds::from_request(
        parse_flag::<f64>(args, "--min-points")?,
        parse_flag::<f64>(args, "--min-efg")?,
        parse_flag::<f64>(args, "--min-gs")?,
    ))
}

pub fn season_from_args(args: &[String]) -> String {
    flag_value(args, "--season").unwrap_or_else(|| chrono::Local::now().year().to_string())
}

pub fn top_from_args(args: &[String]) -> Result<Option<usize>> {
    parse_flag::<usize>(args, "--top")
}

/// `--from-dir DIR` reads saved pages, otherwise the live site.
pub fn source_from_args(args: &[String], settings: &Settings) -> Result<Box<dyn SeasonSource>> {
    if let Some(dir) = flag_value(args, "--from-dir") {
        return Ok(Box::new(DirectorySource::new(dir)));
    }
    let live = BasketballReference::from_settings(settings).context("unable to set up http source")?;
    Ok(Box::new(live))
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
