use thiserror::Error;

/// Fixed phrase prepended to every user-facing alert.
pub const ALERT_PREFIX: &str = "Discovery request failed: ";

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("unknown rag mode: {0}")]
    UnknownMode(String),
}

impl DiscoverError {
    /// Message shown to the user when a search attempt dies. Both network and
    /// decode failures surface through this one path, no retry.
    pub fn alert_text(&self) -> String {
        format!("{ALERT_PREFIX}{self}")
    }
}

pub type Result<T, E = DiscoverError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_text_carries_prefix_and_message() {
        let error = DiscoverError::Status {
            status: 500,
            body: "engine offline".to_string(),
        };
        let alert = error.alert_text();
        assert!(alert.starts_with(ALERT_PREFIX));
        assert!(alert.contains("500"));
        assert!(alert.contains("engine offline"));
    }
}
