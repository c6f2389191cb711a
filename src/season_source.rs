use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;
use tracing::info;

use crate::config::Settings;
use crate::error::{MvpError, Result};

/// Supplies the two raw documents a season ranking is built from.
pub trait SeasonSource {
    fn standings_document(&self, season: &str) -> Result<String>;
    fn per_game_document(&self, season: &str) -> Result<String>;
}

pub fn standings_file_name(season: &str) -> String {
    format!("NBA_{season}_standings.html")
}

pub fn per_game_file_name(season: &str) -> String {
    format!("NBA_{season}_per_game.html")
}

/// Season tokens are plain years such as `2024`.
pub fn validate_season(season: &str) -> Result<&str> {
    let trimmed = season.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(MvpError::InvalidSeason(season.to_string()));
    }
    Ok(trimmed)
}

/// Live pages from basketball-reference.com. One GET per document, no retry.
pub struct BasketballReference {
    client: Client,
    base_url: String,
}

impl BasketballReference {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let client = crate::http_client::http_client(settings)?.clone();
        Ok(Self::new(client, settings.base_url.clone()))
    }

    pub fn standings_url(&self, season: &str) -> String {
        format!("{}/{}", self.base_url, standings_file_name(season))
    }

    pub fn per_game_url(&self, season: &str) -> String {
        format!("{}/{}", self.base_url, per_game_file_name(season))
    }

    fn fetch(&self, url: &str) -> Result<String> {
        info!("fetching {url}");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(MvpError::transport_status(
                url,
                status.as_u16(),
                format!("status code {}", status.as_u16()),
            ));
        }
        let body = resp.text()?;
        info!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}

impl SeasonSource for BasketballReference {
    fn standings_document(&self, season: &str) -> Result<String> {
        self.fetch(&self.standings_url(season))
    }

    fn per_game_document(&self, season: &str) -> Result<String> {
        self.fetch(&self.per_game_url(season))
    }
}

/// Saved copies of the two pages, named like the remote documents.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        info!("reading {}", path.display());
        Ok(fs::read_to_string(path)?)
    }
}

impl SeasonSource for DirectorySource {
    fn standings_document(&self, season: &str) -> Result<String> {
        self.read(&standings_file_name(season))
    }

    fn per_game_document(&self, season: &str) -> Result<String> {
        self.read(&per_game_file_name(season))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_must_be_digits() {
        assert_eq!(validate_season(" 2024 ").unwrap(), "2024");
        assert!(matches!(validate_season(""), Err(MvpError::InvalidSeason(_))));
        assert!(matches!(validate_season("20/24"), Err(MvpError::InvalidSeason(_))));
    }

    #[test]
    fn urls_follow_remote_layout() {
        let src = BasketballReference::new(Client::new(), "https://example.test/leagues");
        assert_eq!(
            src.standings_url("2021"),
            "https://example.test/leagues/NBA_2021_standings.html"
        );
        assert_eq!(
            src.per_game_url("2021"),
            "https://example.test/leagues/NBA_2021_per_game.html"
        );
    }

    #[test]
    fn missing_saved_page_is_io_error() {
        let src = DirectorySource::new("/nonexistent/nba_mvp");
        assert!(matches!(src.standings_document("2024"), Err(MvpError::Io(_))));
    }
}
