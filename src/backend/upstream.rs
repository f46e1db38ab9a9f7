use std::error::Error as _;

use anyhow::{anyhow, Context, Result};
use dioxus::logger::tracing::{debug, warn};
use once_cell::sync::OnceCell;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::settings;
use crate::shared::types::ProblemBody;

static CLIENT: OnceCell<Client> = OnceCell::new();

fn client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let settings = settings()?;
        Client::builder()
            .connect_timeout(std::time::Duration::from_secs(2))
            .timeout(settings.timeout)
            .build()
            .context("building HTTP client")
    })
}

/// `base` joined with percent-encoded `segments`, always with a trailing
/// slash.
pub fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("{base} cannot be a base URL"))?
        .pop_if_empty()
        .extend(segments)
        .push("");
    Ok(url)
}

/// Turns an error response into an error, keeping the upstream problem
/// details when the body carries them.
pub fn error_from_body(method: &str, url: &Url, status: StatusCode, body: &[u8]) -> anyhow::Error {
    match serde_json::from_slice::<ProblemBody>(body) {
        Ok(problem) => anyhow::Error::new(problem.detail),
        Err(_) => anyhow!("{} {} failed with status {}", method, url, status),
    }
}

async fn request<T: DeserializeOwned>(
    method: Method,
    segments: &[&str],
    body: Option<serde_json::Value>,
) -> Result<T> {
    let url = endpoint_url(&settings()?.api_url, segments)?;
    let method_s = method.as_str().to_string();
    debug!("[upstream] {} {}", method_s, url);

    let mut req = client()?
        .request(method, url.clone())
        .header("Accept", "application/json")
        .header("Cache-Control", "no-store");
    if let Some(b) = body {
        req = req.json(&b);
    }
    let res = match req.send().await {
        Ok(r) => r,
        Err(e) => {
            let mut chain = Vec::new();
            let mut src: Option<&dyn std::error::Error> = e.source();
            while let Some(s) = src {
                chain.push(s.to_string());
                src = s.source();
            }
            warn!(
                "[upstream] {} {} failed (timeout={}, connect={}): {}",
                method_s,
                url,
                e.is_timeout(),
                e.is_connect(),
                chain.join(" -> ")
            );
            return Err(anyhow!("sending {} {}: {}", method_s, url, e));
        }
    };

    let status = res.status();
    let bytes = res
        .bytes()
        .await
        .with_context(|| format!("reading body from {} {}", method_s, url))?;
    if !status.is_success() {
        warn!("[upstream] {} {} returned {}", method_s, url, status);
        return Err(error_from_body(&method_s, &url, status, &bytes));
    }
    serde_json::from_slice(&bytes).map_err(|e| {
        let snip = String::from_utf8_lossy(&bytes);
        let snip = snip.chars().take(300).collect::<String>();
        warn!("[upstream] undecodable body from {}: {}", url, snip);
        anyhow!("decoding JSON from {} {} failed: {}", method_s, url, e)
    })
}

pub async fn get_json<T: DeserializeOwned>(segments: &[&str]) -> Result<T> {
    request(Method::GET, segments, None).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(segments: &[&str], body: &B) -> Result<T> {
    let body = serde_json::to_value(body).context("encoding request body")?;
    request(Method::POST, segments, Some(body)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::ApiProblem;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn root_keeps_trailing_slash() {
        let url = endpoint_url(&base("https://api.example.org/v1"), &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.org/v1/");
        let url = endpoint_url(&base("https://api.example.org"), &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.org/");
    }

    #[test]
    fn segments_are_joined() {
        let url = endpoint_url(&base("https://api.example.org/v1/"), &["distribution", "cpu"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.org/v1/distribution/cpu/");
    }

    #[test]
    fn team_names_are_encoded() {
        let url = endpoint_url(
            &base("http://localhost:8000"),
            &["user", "abc123", "team", "Data Science/ML"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/user/abc123/team/Data%20Science%2FML/"
        );
    }

    #[test]
    fn problem_bodies_become_typed_errors() {
        let url = base("http://localhost/user/x/");
        let body = br#"{"detail": {"status": "401", "title": "Unauthorized", "detail": "Invalid UUID"}}"#;
        let err = error_from_body("GET", &url, StatusCode::UNAUTHORIZED, body);
        let problem = err.downcast_ref::<ApiProblem>().unwrap();
        assert_eq!(problem.to_string(), "401 Unauthorized. Invalid UUID.");

        let err = error_from_body("GET", &url, StatusCode::BAD_GATEWAY, b"<html>");
        assert!(err.downcast_ref::<ApiProblem>().is_none());
        assert!(err.to_string().contains("502"));
    }
}
