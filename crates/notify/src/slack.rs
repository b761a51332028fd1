//! Slack Web API delivery channel.
//!
//! Resolves channels through `conversations.list` and posts Block Kit
//! messages through `chat.postMessage`.

use std::time::Duration;

use serde::Deserialize;

use huntbot_core::env::resolve_env_refs;

use crate::payload::NotificationPayload;
use crate::traits::{Ack, ChannelId, DeliveryChannel, NotifyError};

const PAGE_LIMIT: u32 = 200;
const DEFAULT_RETRY_AFTER_SECS: u64 = 30;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ConversationsPage {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channels: Vec<Conversation>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct Conversation {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

/// Posts notifications to Slack with a bot token.
#[derive(Debug)]
pub struct SlackChannel {
    token: String,
    api_base: String,
    client: reqwest::Client,
}

impl SlackChannel {
    /// Creates a new `SlackChannel` from configuration values.
    ///
    /// `${VAR}` references in `token` are resolved from the environment.
    /// Returns [`NotifyError::Config`] if the token is empty or the env var
    /// is missing.
    pub fn from_config(token: &str, api_base: &str) -> Result<Self, NotifyError> {
        let token = resolve_env_refs(token).map_err(|e| NotifyError::Config(e.to_string()))?;
        if token.trim().is_empty() {
            return Err(NotifyError::Config(
                "Slack bot token must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.api_base, method)
    }
}

fn retry_after(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[async_trait::async_trait]
impl DeliveryChannel for SlackChannel {
    /// Pages through `conversations.list` until a channel named `name` turns up.
    async fn resolve_channel(&self, name: &str) -> Result<ChannelId, NotifyError> {
        let name = name.trim_start_matches('#');
        let mut cursor = String::new();

        loop {
            let mut query = vec![
                ("limit", PAGE_LIMIT.to_string()),
                ("exclude_archived", "true".to_string()),
            ];
            if !cursor.is_empty() {
                query.push(("cursor", cursor.clone()));
            }

            let response = self
                .client
                .get(self.endpoint("conversations.list"))
                .bearer_auth(&self.token)
                .query(&query)
                .send()
                .await?;

            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(NotifyError::RateLimited {
                    retry_after_secs: retry_after(&response),
                });
            }

            let page: ConversationsPage = response.json().await?;
            if !page.ok {
                return Err(NotifyError::Api(format!(
                    "error fetching channels: {}",
                    page.error.as_deref().unwrap_or("unknown error")
                )));
            }

            if let Some(channel) = page.channels.into_iter().find(|c| c.name == name) {
                tracing::info!(channel = %name, id = %channel.id, "found channel");
                return Ok(ChannelId(channel.id));
            }

            cursor = page
                .response_metadata
                .map(|m| m.next_cursor)
                .unwrap_or_default();
            if cursor.is_empty() {
                return Err(NotifyError::ChannelNotFound(name.to_string()));
            }
        }
    }

    /// Posts the payload via `chat.postMessage` with link unfurling disabled.
    async fn send(
        &self,
        channel: &ChannelId,
        payload: &NotificationPayload,
    ) -> Result<Ack, NotifyError> {
        let body = serde_json::json!({
            "channel": channel.as_str(),
            "text": payload.text,
            "blocks": payload.blocks,
            "unfurl_links": false,
        });

        let response = self
            .client
            .post(self.endpoint("chat.postMessage"))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(NotifyError::RateLimited {
                retry_after_secs: retry_after(&response),
            });
        }

        let resp: PostMessageResponse = response.json().await?;
        if resp.ok {
            return Ok(Ack {
                message_id: resp.ts,
            });
        }

        Err(NotifyError::Api(
            resp.error.unwrap_or_else(|| "unknown Slack API error".to_string()),
        ))
    }

    fn transport_name(&self) -> &str {
        "slack"
    }
}
