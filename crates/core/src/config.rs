use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::duration::{self, format_duration};
use crate::error::CoreError;

// ── Top-level config ──────────────────────────────────────────

/// Full configuration for the job relay.
///
/// Parsed from `huntbot.toml`; every section has defaults so an empty file
/// yields the stock product-manager search profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntbotConfig {
    #[serde(default)]
    pub slack: SlackConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

impl HuntbotConfig {
    /// Parse config from a TOML string, apply env overrides and validate.
    pub fn from_toml(toml_str: &str) -> Result<Self, CoreError> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Load `path`, using built-in defaults only when the file does not exist.
    ///
    /// A file that exists but fails to read, parse or validate is an error.
    pub fn from_file_or_defaults(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        match Self::from_file(path) {
            Err(CoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "config file not found, using built-in defaults"
                );
                Self::from_env()
            }
            other => other,
        }
    }

    /// Built-in defaults with env overrides applied.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// - `HUNTBOT_SLACK_CHANNEL` -> `slack.channel`
    /// - `HUNTBOT_SLACK_TOKEN` -> `slack.token`
    /// - `HUNTBOT_INTERVAL` -> `schedule.interval`
    /// - `HUNTBOT_COOLDOWN` -> `schedule.cooldown`
    pub fn apply_env_overrides(&mut self) -> Result<(), CoreError> {
        if let Ok(v) = std::env::var("HUNTBOT_SLACK_CHANNEL") {
            self.slack.channel = v;
        }
        if let Ok(v) = std::env::var("HUNTBOT_SLACK_TOKEN") {
            self.slack.token = v;
        }
        if let Ok(v) = std::env::var("HUNTBOT_INTERVAL") {
            self.schedule.interval = parse_env_duration("HUNTBOT_INTERVAL", &v)?;
        }
        if let Ok(v) = std::env::var("HUNTBOT_COOLDOWN") {
            self.schedule.cooldown = parse_env_duration("HUNTBOT_COOLDOWN", &v)?;
        }
        Ok(())
    }

    /// Check that every operator-supplied list is usable.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_empty("slack.channel", &self.slack.channel)?;
        require_non_empty("slack.token", &self.slack.token)?;
        require_non_empty("slack.api_base", &self.slack.api_base)?;

        if self.schedule.interval.is_zero() {
            return Err(CoreError::Config("schedule.interval must be positive".into()));
        }
        if self.schedule.cooldown.is_zero() {
            return Err(CoreError::Config("schedule.cooldown must be positive".into()));
        }
        require_at_most("schedule.interval", self.schedule.interval)?;
        require_at_most("schedule.cooldown", self.schedule.cooldown)?;
        require_at_most("schedule.source_pause", self.schedule.source_pause)?;
        require_at_most("schedule.send_pause", self.schedule.send_pause)?;

        require_keywords("search.roles", &self.search.roles)?;
        require_keywords("search.industries", &self.search.industries)?;
        require_keywords("search.locations", &self.search.locations)?;
        require_keywords("search.accepted_locations", &self.search.accepted_locations)?;

        if self.sources.is_empty() {
            return Err(CoreError::Config("at least one [[sources]] entry is required".into()));
        }
        for source in &self.sources {
            source.validate()?;
        }
        Ok(())
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  slack:     channel=#{}, api_base={}", self.slack.channel, self.slack.api_base);
        tracing::info!(
            "  schedule:  interval={}, cooldown={}, source_pause={}, send_pause={}",
            format_duration(self.schedule.interval),
            format_duration(self.schedule.cooldown),
            format_duration(self.schedule.source_pause),
            format_duration(self.schedule.send_pause),
        );
        tracing::info!(
            "  search:    {} roles x {} industries x {} locations ({} accepted location tokens)",
            self.search.roles.len(),
            self.search.industries.len(),
            self.search.locations.len(),
            self.search.accepted_locations.len(),
        );
        for source in &self.sources {
            tracing::info!("  source:    {} ({:?}, {:?})", source.name, source.sweep, source.kind);
        }
    }
}

impl Default for HuntbotConfig {
    fn default() -> Self {
        Self {
            slack: SlackConfig::default(),
            schedule: ScheduleConfig::default(),
            search: SearchConfig::default(),
            sources: default_sources(),
        }
    }
}

// ── Section configs ─────────────────────────────────────────────────

/// Destination channel and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Channel name without the leading `#`.
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Bot token; `${VAR}` references are resolved when the client is built.
    #[serde(default = "default_token")]
    pub token: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_channel() -> String {
    "job-notifications".into()
}

fn default_token() -> String {
    "${SLACK_BOT_TOKEN}".into()
}

fn default_api_base() -> String {
    "https://slack.com/api".into()
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            token: default_token(),
            api_base: default_api_base(),
        }
    }
}

/// Timing of passes and politeness pauses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Sleep between successful passes.
    #[serde(with = "duration::human", default = "default_interval")]
    pub interval: Duration,

    /// Sleep after a pass that faulted.
    #[serde(with = "duration::human", default = "default_cooldown")]
    pub cooldown: Duration,

    /// Pause between consecutive source adapter calls.
    #[serde(with = "duration::human", default = "default_source_pause")]
    pub source_pause: Duration,

    /// Pause between consecutive sends.
    #[serde(with = "duration::human", default = "default_send_pause")]
    pub send_pause: Duration,
}

fn default_interval() -> Duration {
    Duration::from_secs(24 * 3_600)
}

fn default_cooldown() -> Duration {
    Duration::from_secs(300)
}

fn default_source_pause() -> Duration {
    Duration::from_secs(2)
}

fn default_send_pause() -> Duration {
    Duration::from_secs(1)
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            cooldown: default_cooldown(),
            source_pause: default_source_pause(),
            send_pause: default_send_pause(),
        }
    }
}

/// The search profile and the location filter tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,

    #[serde(default = "default_industries")]
    pub industries: Vec<String>,

    /// Location queries issued to adapters during the sweep.
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,

    /// Tokens a record's location text must contain to be kept.
    #[serde(default = "default_accepted_locations")]
    pub accepted_locations: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_roles() -> Vec<String> {
    strings(&[
        "product manager",
        "senior product manager",
        "lead product manager",
        "principal product manager",
        "product growth",
        "growth product manager",
    ])
}

fn default_industries() -> Vec<String> {
    strings(&["finance", "fintech", "healthcare", "health tech", "education", "edtech"])
}

fn default_locations() -> Vec<String> {
    strings(&["Bangalore", "Pune", "Chennai", "Hyderabad", "Remote India"])
}

fn default_accepted_locations() -> Vec<String> {
    strings(&[
        "bangalore",
        "bengaluru",
        "pune",
        "chennai",
        "hyderabad",
        "remote",
        "hybrid",
        "work from home",
    ])
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            roles: default_roles(),
            industries: default_industries(),
            locations: default_locations(),
            accepted_locations: default_accepted_locations(),
        }
    }
}

/// Which sweep a source takes part in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepKind {
    /// Public job boards: roles x industries x locations, industry-filtered.
    #[default]
    Board,
    /// Personal-connection feeds: roles x locations, location-filtered only.
    Network,
}

/// How a source obtains its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A built-in sample record set selected by `preset`.
    Fixture,
    /// A JSON endpoint returning an array of job records.
    JsonFeed,
}

/// One `[[sources]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,

    #[serde(default)]
    pub sweep: SweepKind,

    pub kind: SourceKind,

    /// Fixture preset name (`kind = "fixture"`).
    #[serde(default)]
    pub preset: Option<String>,

    /// Feed URL (`kind = "json_feed"`).
    #[serde(default)]
    pub url: Option<String>,

    /// Extra request headers; values may contain `${VAR}` references.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl SourceConfig {
    pub fn fixture(name: &str, sweep: SweepKind, preset: &str) -> Self {
        Self {
            name: name.to_string(),
            sweep,
            kind: SourceKind::Fixture,
            preset: Some(preset.to_string()),
            url: None,
            headers: HashMap::new(),
        }
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_non_empty("sources.name", &self.name)?;
        match self.kind {
            SourceKind::Fixture => {
                let preset = self.preset.as_deref().unwrap_or_default();
                require_non_empty(&format!("sources.{}.preset", self.name), preset)
            }
            SourceKind::JsonFeed => {
                let url = self.url.as_deref().unwrap_or_default();
                require_non_empty(&format!("sources.{}.url", self.name), url)
            }
        }
    }
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::fixture("linkedin-network", SweepKind::Network, "linkedin-network"),
        SourceConfig::fixture("linkedin", SweepKind::Board, "linkedin-board"),
        SourceConfig::fixture("indeed", SweepKind::Board, "indeed-board"),
    ]
}

// ── Validation helpers ──────────────────────────────────────────────

fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Config(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Upper bound for any schedule duration.
pub const MAX_SCHEDULE_DURATION: Duration = Duration::from_secs(365 * 86_400);

fn require_at_most(field: &str, value: Duration) -> Result<(), CoreError> {
    if value > MAX_SCHEDULE_DURATION {
        return Err(CoreError::Config(format!(
            "{field} must not exceed {}",
            format_duration(MAX_SCHEDULE_DURATION)
        )));
    }
    Ok(())
}

fn require_keywords(field: &str, values: &[String]) -> Result<(), CoreError> {
    if values.is_empty() {
        return Err(CoreError::Config(format!("{field} must list at least one entry")));
    }
    for (i, value) in values.iter().enumerate() {
        require_non_empty(&format!("{field}[{i}]"), value)?;
    }
    Ok(())
}

fn parse_env_duration(key: &str, value: &str) -> Result<Duration, CoreError> {
    duration::parse_duration(value)
        .ok_or_else(|| CoreError::Config(format!("{key}: invalid duration '{value}'")))
}
