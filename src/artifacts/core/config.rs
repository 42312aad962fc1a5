//! Process-level configuration
//!
//! Settings come from the environment, the same way commit authorship is configured in git:
//!
//! - `GITLET_DATE`: fixed timestamp for new commits (`%Y-%m-%d %H:%M:%S %z` or RFC 2822)
//! - `GITLET_LOG`: tracing filter directive for diagnostics on stderr (default `warn`)

use anyhow::Context;
use chrono::{DateTime, FixedOffset};

pub const DATE_ENV: &str = "GITLET_DATE";
pub const LOG_ENV: &str = "GITLET_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Name of the metadata directory inside the working directory
pub const GITLET_DIR: &str = ".gitlet";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    commit_date: Option<DateTime<FixedOffset>>,
}

impl Config {
    pub fn new(commit_date: Option<DateTime<FixedOffset>>) -> Self {
        Config { commit_date }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let commit_date = match std::env::var(DATE_ENV) {
            Ok(raw) => Some(
                Self::parse_date(&raw)
                    .with_context(|| format!("{DATE_ENV} is not a valid date: {raw}"))?,
            ),
            Err(_) => None,
        };

        Ok(Config { commit_date })
    }

    /// Filter directive for the tracing subscriber
    pub fn log_filter() -> String {
        std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
    }

    /// Timestamp to stamp on the next commit
    pub fn commit_timestamp(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    fn parse_date(raw: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z")
            .or_else(|_| DateTime::parse_from_rfc2822(raw))
            .map_err(anyhow::Error::from)
    }
}
