//! Shared HTTP plumbing for the upstream JSON sources.

use crate::config::config;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Build the HTTP client used by every source.
pub fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config().http_timeout())
        .user_agent(concat!("paddock/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// GET `url` with `query` and decode the JSON body.
///
/// Any non-2xx status is an error naming the URL; there is no retry.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T> {
    log::info!("GET {} {:?}", url, query);

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow::anyhow!("{} answered with status: {}", url, status));
    }

    response
        .json::<T>()
        .await
        .with_context(|| format!("Malformed response from {}", url))
}

/// Join a base URL and a path without doubling slashes.
pub fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("https://f1api.dev/api", "current"), "https://f1api.dev/api/current");
        assert_eq!(join("https://f1api.dev/api/", "/2024"), "https://f1api.dev/api/2024");
    }
}
