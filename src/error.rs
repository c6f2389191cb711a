use thiserror::Error;

pub type Result<T> = std::result::Result<T, MvpError>;

/// Failures of the ranking pipeline, one variant per stage.
#[derive(Debug, Error)]
pub enum MvpError {
    /// Upstream document could not be retrieved (non-2xx or unreachable).
    #[error("failed to fetch {url}: {reason}")]
    Transport {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// Expected table, column or attribute is absent.
    #[error("unexpected document layout: {0}")]
    SchemaMismatch(String),

    #[error("column {column}: cannot read {raw:?} as a number")]
    NumericCoercion { column: String, raw: String },

    #[error("{player}: team {team:?} not found in standings")]
    LookupMiss { player: String, team: String },

    #[error("invalid season {0:?}")]
    InvalidSeason(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MvpError {
    pub fn transport_status(url: &str, status: u16, reason: impl Into<String>) -> Self {
        MvpError::Transport {
            url: url.to_string(),
            status: Some(status),
            reason: reason.into(),
        }
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            MvpError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Status code a request handler answers with for this failure.
    pub fn response_status(&self) -> u16 {
        match self {
            MvpError::Transport { .. } | MvpError::InvalidSeason(_) => 400,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for MvpError {
    fn from(err: reqwest::Error) -> Self {
        MvpError::Transport {
            url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
    }
}
