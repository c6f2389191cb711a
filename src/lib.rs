pub mod cli;
pub mod config;
pub mod error;
pub mod http_client;
pub mod per_game;
pub mod percentile;
pub mod pipeline;
pub mod profile;
pub mod ranking;
pub mod score;
pub mod season_source;
pub mod standings;

pub use config::{Settings, Thresholds};
pub use error::{MvpError, Result};
pub use pipeline::{build_season_report, rank_season, SeasonReport};
pub use ranking::ScoredPlayer;
pub use season_source::{BasketballReference, DirectorySource, SeasonSource};
