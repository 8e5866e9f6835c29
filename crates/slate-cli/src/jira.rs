//! Jira Cloud REST client implementing the core's issue source seam.

use anyhow::{Context, Result, anyhow, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use slate_core::config::TrackerConfig;
use slate_core::source::{IssueSource, Page, SearchPage};
use serde_json::json;
use tracing::debug;

#[derive(Debug)]
pub struct JiraClient {
    base_url: String,
    authorization: String,
}

impl JiraClient {
    /// Build a client from tracker configuration.
    ///
    /// # Errors
    ///
    /// Fails when the base URL or credentials are missing; this is a
    /// terminal config error, not something to retry around.
    pub fn from_config(config: &TrackerConfig) -> Result<Self> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            anyhow!("missing tracker base URL: set SLATE_JIRA_BASE or [tracker] base_url")
        })?;
        let (Some(email), Some(token)) = (config.email.as_deref(), config.api_token.as_deref())
        else {
            bail!("missing tracker credentials: set SLATE_JIRA_EMAIL and SLATE_JIRA_TOKEN");
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            authorization: format!("Basic {}", BASE64.encode(format!("{email}:{token}"))),
        })
    }
}

impl IssueSource for JiraClient {
    fn search(&self, query: &str, fields: Option<&[String]>, page: Page) -> Result<SearchPage> {
        let url = format!("{}/rest/api/3/search", self.base_url);
        let mut body = json!({
            "jql": query,
            "startAt": page.start_at,
            "maxResults": page.max_results,
        });
        if let Some(fields) = fields {
            body["fields"] = json!(fields);
        }

        debug!(url = url.as_str(), start_at = page.start_at, "tracker search");
        let response = ureq::post(&url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json")
            .send_json(body)
            .map_err(|err| anyhow!("tracker search request failed for {url}: {err}"))?;

        response
            .into_json::<SearchPage>()
            .context("decode tracker search response")
    }
}

#[cfg(test)]
mod tests {
    use super::JiraClient;
    use slate_core::config::TrackerConfig;

    #[test]
    fn missing_credentials_is_a_config_error() {
        let config = TrackerConfig {
            base_url: Some("https://tracker.example".into()),
            email: None,
            api_token: None,
        };
        let err = JiraClient::from_config(&config).expect_err("must fail");
        assert!(err.to_string().contains("credentials"));
    }

    #[test]
    fn base_url_is_trimmed() {
        let config = TrackerConfig {
            base_url: Some("https://tracker.example/".into()),
            email: Some("kim@example.com".into()),
            api_token: Some("token".into()),
        };
        let client = JiraClient::from_config(&config).expect("client builds");
        assert_eq!(client.base_url, "https://tracker.example");
        assert!(client.authorization.starts_with("Basic "));
    }
}
