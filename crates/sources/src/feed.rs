//! HTTP adapter for endpoints that already speak the job record format.
//!
//! Issues `GET {url}?q={query}&location={location}` and decodes a JSON array
//! of [`JobRecord`]. Header values may reference environment variables
//! (`${LINKEDIN_COOKIE}`); a missing variable makes the adapter unavailable.

use std::collections::HashMap;
use std::time::Duration;

use huntbot_core::env::resolve_env_refs;
use huntbot_core::{CoreError, JobRecord};
use url::Url;

use crate::traits::{SourceAdapter, SourceError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches postings from a JSON feed endpoint.
#[derive(Debug)]
pub struct JsonFeedAdapter {
    name: String,
    url: Url,
    /// Resolved request headers.
    headers: Vec<(String, String)>,
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

impl JsonFeedAdapter {
    /// Create a feed adapter, resolving `${VAR}` references in header values.
    pub fn new(
        name: impl Into<String>,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<Self, SourceError> {
        let name = name.into();
        let url = Url::parse(url)
            .map_err(|e| SourceError::Config(format!("invalid feed url '{url}': {e}")))?;

        let mut resolved = Vec::with_capacity(headers.len());
        for (key, value) in headers {
            let value = resolve_env_refs(value).map_err(|e| match e {
                CoreError::MissingEnv(var) => {
                    SourceError::Unavailable(format!("{name}: {var} is not set"))
                }
                other => SourceError::Config(other.to_string()),
            })?;
            resolved.push((key.clone(), value));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            name,
            url,
            headers: resolved,
            client,
        })
    }

    fn request_url(&self, query: &str, location: &str) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("location", location);
        url
    }
}

#[async_trait::async_trait]
impl SourceAdapter for JsonFeedAdapter {
    async fn fetch(&self, query: &str, location: &str) -> Result<Vec<JobRecord>, SourceError> {
        let mut request = self.client.get(self.request_url(query, location));
        for (key, value) in &self.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut records: Vec<JobRecord> = response.json().await?;
        for record in &mut records {
            if record.source.is_empty() {
                record.source = self.name.clone();
            }
        }

        tracing::debug!(
            source = %self.name,
            query,
            location,
            count = records.len(),
            "feed fetched"
        );
        Ok(records)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const BODY: &str = r#"[
        {
            "title": "Product Manager - Fintech",
            "company": "PayTech India",
            "location": "Pune (Hybrid)",
            "industry": "Finance",
            "url": "https://jobs.test/1"
        },
        {
            "title": "Growth PM",
            "company": "Acme",
            "location": "Remote",
            "url": "https://jobs.test/2",
            "source": "upstream"
        }
    ]"#;

    #[tokio::test]
    async fn fetch_sends_query_and_decodes_records() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jobs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "product manager fintech".into()),
                Matcher::UrlEncoded("location".into(), "Pune".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let adapter =
            JsonFeedAdapter::new("feed", &format!("{}/jobs", server.url()), &HashMap::new())
                .unwrap();
        let records = adapter.fetch("product manager fintech", "Pune").await.unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, "feed");
        assert_eq!(records[1].source, "upstream");
        assert_eq!(records[0].industry.as_deref(), Some("Finance"));
    }

    #[tokio::test]
    async fn fetch_forwards_resolved_headers() {
        std::env::set_var("HUNTBOT_FEED_TEST_COOKIE", "session-1");
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/feed")
            .match_query(Matcher::Any)
            .match_header("cookie", "li_at=session-1")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let headers = HashMap::from([(
            "Cookie".to_string(),
            "li_at=${HUNTBOT_FEED_TEST_COOKIE}".to_string(),
        )]);
        let adapter =
            JsonFeedAdapter::new("network", &format!("{}/feed", server.url()), &headers).unwrap();
        let records = adapter.fetch("pm", "Pune").await.unwrap();

        mock.assert_async().await;
        assert!(records.is_empty());
        std::env::remove_var("HUNTBOT_FEED_TEST_COOKIE");
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jobs")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let adapter =
            JsonFeedAdapter::new("feed", &format!("{}/jobs", server.url()), &HashMap::new())
                .unwrap();
        match adapter.fetch("pm", "Pune").await {
            Err(SourceError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected Status error, got: {other:?}"),
        }
    }

    #[test]
    fn missing_credential_makes_source_unavailable() {
        let headers = HashMap::from([(
            "Cookie".to_string(),
            "${HUNTBOT_FEED_NEVER_SET_COOKIE}".to_string(),
        )]);
        match JsonFeedAdapter::new("network", "https://feed.test/", &headers) {
            Err(SourceError::Unavailable(msg)) => {
                assert!(msg.contains("HUNTBOT_FEED_NEVER_SET_COOKIE"))
            }
            other => panic!("expected Unavailable, got: {other:?}"),
        }
    }

    #[test]
    fn invalid_url_is_config_error() {
        let result = JsonFeedAdapter::new("feed", "not a url", &HashMap::new());
        assert!(matches!(result, Err(SourceError::Config(_))));
    }
}
