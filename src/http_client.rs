use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

use crate::config::Settings;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Process-wide client. The first caller's settings win.
pub fn http_client(settings: &Settings) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| build_client(settings))
}

pub fn build_client(settings: &Settings) -> Result<Client> {
    Client::builder()
        .timeout(settings.timeout)
        .user_agent(settings.user_agent.clone())
        .build()
        .context("failed to build http client")
}
