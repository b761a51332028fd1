use std::fmt;

use serde::{Deserialize, Serialize};

/// Field separator for identity keys. Never appears in scraped text.
const KEY_SEPARATOR: char = '\u{1f}';

/// One discovered posting as produced by a source adapter.
///
/// Records are treated as read-only once an adapter hands them over; the
/// pipeline only derives identity keys from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    /// Free-text location, e.g. `"Pune (Hybrid)"`.
    pub location: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub posted_date: Option<String>,
    pub url: String,
    /// Name of the adapter that produced this record. Feeds may omit it; the
    /// adapter fills it in.
    #[serde(default)]
    pub source: String,
    /// True when the record came from a personal-connection feed.
    #[serde(default)]
    pub is_network_post: bool,
    #[serde(default)]
    pub posted_by: Option<String>,
    #[serde(default)]
    pub connection_degree: Option<String>,
}

impl JobRecord {
    /// Create a board posting with the required fields set.
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            industry: None,
            description: None,
            posted_date: None,
            url: url.into(),
            source: source.into(),
            is_network_post: false,
            posted_by: None,
            connection_degree: None,
        }
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_posted_date(mut self, posted_date: impl Into<String>) -> Self {
        self.posted_date = Some(posted_date.into());
        self
    }

    /// Mark the record as a network post attributed to `posted_by`.
    pub fn from_network(
        mut self,
        posted_by: impl Into<String>,
        connection_degree: Option<String>,
    ) -> Self {
        self.is_network_post = true;
        self.posted_by = Some(posted_by.into());
        self.connection_degree = connection_degree;
        self
    }

    /// Whether the location text mentions remote work.
    pub fn is_remote(&self) -> bool {
        self.location.to_lowercase().contains("remote")
    }

    /// Identity used to collapse duplicates within one sweep: `(title, company)`.
    ///
    /// Location is not part of this key, unlike [`JobRecord::delivery_key`].
    pub fn aggregation_key(&self) -> AggregationKey {
        AggregationKey(join_key(&[&self.title, &self.company]))
    }

    /// Identity used to suppress repeat deliveries across passes:
    /// `(company, title, location)`.
    pub fn delivery_key(&self) -> DeliveryKey {
        DeliveryKey(join_key(&[&self.company, &self.title, &self.location]))
    }
}

fn join_key(parts: &[&str]) -> String {
    let mut key = String::with_capacity(parts.iter().map(|p| p.len() + 1).sum());
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(part);
    }
    key
}

fn fmt_key(key: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, part) in key.split(KEY_SEPARATOR).enumerate() {
        if i > 0 {
            f.write_str(" | ")?;
        }
        f.write_str(part)?;
    }
    Ok(())
}

/// Aggregation identity key, see [`JobRecord::aggregation_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey(String);

impl AggregationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AggregationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_key(&self.0, f)
    }
}

/// Delivery identity key, see [`JobRecord::delivery_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryKey(String);

impl DeliveryKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_key(&self.0, f)
    }
}
