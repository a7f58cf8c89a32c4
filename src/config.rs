use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "MARK_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "MARK_API_TIMEOUT_SECS";

/// What a view shows when its fetch batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Substitute the view's sample data and flag it as such.
    Fallback,
    /// Show an error banner instead of sample data.
    Surface,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub timeout: Option<Duration>,
    pub failure_policy: FailurePolicy,
}

impl Settings {
    /// Flags win over the environment, the environment over defaults.
    pub fn resolve(
        base_url: Option<String>,
        timeout_secs: Option<u64>,
        no_fallback: bool,
    ) -> anyhow::Result<Self> {
        let raw_url = match base_url {
            Some(url) => url,
            None => std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = parse_base_url(&raw_url)?;

        let timeout_secs = match timeout_secs {
            Some(secs) => Some(secs),
            None => match std::env::var(TIMEOUT_ENV) {
                Ok(value) => Some(
                    value
                        .trim()
                        .parse::<u64>()
                        .with_context(|| format!("{TIMEOUT_ENV} must be a whole number of seconds"))?,
                ),
                Err(_) => None,
            },
        };

        Ok(Self {
            base_url,
            timeout: timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs),
            failure_policy: if no_fallback {
                FailurePolicy::Surface
            } else {
                FailurePolicy::Fallback
            },
        })
    }

    #[cfg(test)]
    pub fn with_base_url(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: None,
            failure_policy: FailurePolicy::Fallback,
        })
    }
}

fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid API base URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("API base URL must use http or https, got {}", url.scheme());
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_override_defaults() {
        let settings = Settings::resolve(Some("http://api.internal:9000".to_string()), Some(5), true)
            .unwrap();
        assert_eq!(settings.base_url.as_str(), "http://api.internal:9000/");
        assert_eq!(settings.timeout, Some(Duration::from_secs(5)));
        assert_eq!(settings.failure_policy, FailurePolicy::Surface);
    }

    #[test]
    fn environment_fills_in_missing_flags() {
        std::env::set_var(BASE_URL_ENV, "https://api.example.com/v1");
        std::env::set_var(TIMEOUT_ENV, " 12 ");
        let settings = Settings::resolve(None, None, false).unwrap();
        assert_eq!(settings.base_url.as_str(), "https://api.example.com/v1");
        assert_eq!(settings.timeout, Some(Duration::from_secs(12)));

        let flagged = Settings::resolve(Some(DEFAULT_BASE_URL.to_string()), Some(3), false).unwrap();
        assert_eq!(flagged.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(flagged.timeout, Some(Duration::from_secs(3)));

        std::env::set_var(TIMEOUT_ENV, "soon");
        let err = Settings::resolve(None, None, false).unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_ENV));

        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);
        let defaults = Settings::resolve(None, None, false).unwrap();
        assert_eq!(defaults.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(defaults.timeout, None);
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let settings =
            Settings::resolve(Some(DEFAULT_BASE_URL.to_string()), Some(0), false).unwrap();
        assert_eq!(settings.timeout, None);
        assert_eq!(settings.failure_policy, FailurePolicy::Fallback);
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(Settings::with_base_url("ftp://localhost:8000").is_err());
        assert!(Settings::with_base_url("not a url").is_err());
    }
}
