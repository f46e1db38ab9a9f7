use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::OnceCell;
use reqwest::Url;

static SETTINGS: OnceCell<Settings> = OnceCell::new();

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the footprint REST API.
    pub api_url: Url,
    pub timeout: Duration,
    /// Only e-mails in this domain may sign up; any domain when unset.
    pub signup_email_domain: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("API_URL not set"))?;
        let api_url = Url::parse(raw_url.trim())
            .with_context(|| format!("API_URL is not a valid URL: {raw_url}"))?;
        if api_url.cannot_be_a_base() {
            return Err(anyhow!("API_URL cannot be used as a base URL: {raw_url}"));
        }

        let timeout_secs = match lookup("API_TIMEOUT_SECS") {
            Some(v) if !v.trim().is_empty() => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("API_TIMEOUT_SECS is not a number: {v}"))?,
            _ => DEFAULT_TIMEOUT_SECS,
        };

        let signup_email_domain = lookup("SIGNUP_EMAIL_DOMAIN")
            .map(|v| v.trim().trim_start_matches('@').to_lowercase())
            .filter(|v| !v.is_empty());

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            signup_email_domain,
        })
    }
}

/// Loaded once, on first use.
pub fn settings() -> Result<&'static Settings> {
    SETTINGS.get_or_try_init(Settings::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let s = Settings::from_lookup(lookup(&[("API_URL", "https://api.example.org/v1")])).unwrap();
        assert_eq!(s.api_url.as_str(), "https://api.example.org/v1");
        assert_eq!(s.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(s.signup_email_domain, None);
    }

    #[test]
    fn explicit_values() {
        let s = Settings::from_lookup(lookup(&[
            ("API_URL", " http://localhost:8000/ "),
            ("API_TIMEOUT_SECS", "3"),
            ("SIGNUP_EMAIL_DOMAIN", "@EBI.ac.uk"),
        ]))
        .unwrap();
        assert_eq!(s.timeout, Duration::from_secs(3));
        assert_eq!(s.signup_email_domain.as_deref(), Some("ebi.ac.uk"));
    }

    #[test]
    fn missing_or_bad_url() {
        assert!(Settings::from_lookup(lookup(&[])).is_err());
        assert!(Settings::from_lookup(lookup(&[("API_URL", "not a url")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("API_URL", "mailto:a@b.c")])).is_err());
    }

    #[test]
    fn bad_timeout() {
        let err = Settings::from_lookup(lookup(&[
            ("API_URL", "http://localhost"),
            ("API_TIMEOUT_SECS", "ten"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("API_TIMEOUT_SECS"));
    }
}
