//! Turns `[[sources]]` config entries into adapters grouped by sweep.

use std::sync::Arc;

use huntbot_core::{SourceConfig, SourceKind, SweepKind};

use crate::feed::JsonFeedAdapter;
use crate::fixture::StaticAdapter;
use crate::profile::Sweep;
use crate::traits::{SourceAdapter, SourceError};

/// Build a single adapter from its config entry.
pub fn build_adapter(config: &SourceConfig) -> Result<Arc<dyn SourceAdapter>, SourceError> {
    match config.kind {
        SourceKind::Fixture => {
            let preset = config.preset.as_deref().ok_or_else(|| {
                SourceError::Config(format!("source '{}' has no preset", config.name))
            })?;
            Ok(Arc::new(StaticAdapter::from_preset(&config.name, preset)?))
        }
        SourceKind::JsonFeed => {
            let url = config.url.as_deref().ok_or_else(|| {
                SourceError::Config(format!("source '{}' has no url", config.name))
            })?;
            Ok(Arc::new(JsonFeedAdapter::new(&config.name, url, &config.headers)?))
        }
    }
}

/// Group configured sources into the network sweep followed by the board sweep.
///
/// Sources that cannot be built (missing credentials, bad preset) are logged
/// and left out; the remaining sources still run.
pub fn build_sweeps(configs: &[SourceConfig]) -> Vec<Sweep> {
    let mut network = Vec::new();
    let mut board = Vec::new();

    for config in configs {
        let adapter = match build_adapter(config) {
            Ok(adapter) => adapter,
            Err(e) => {
                tracing::warn!(source = %config.name, error = %e, "skipping source");
                continue;
            }
        };
        match config.sweep {
            SweepKind::Network => network.push(adapter),
            SweepKind::Board => board.push(adapter),
        }
    }

    let mut sweeps = Vec::new();
    if !network.is_empty() {
        sweeps.push(Sweep::network(network));
    }
    if !board.is_empty() {
        sweeps.push(Sweep::board(board));
    }
    sweeps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::aggregator::Aggregator;
    use crate::filter::LocationFilter;
    use crate::profile::SearchProfile;

    #[test]
    fn default_sources_build_network_then_board() {
        let config = huntbot_core::HuntbotConfig::default();
        let sweeps = build_sweeps(&config.sources);
        assert_eq!(sweeps.len(), 2);
        assert_eq!(sweeps[0].label(), "network");
        assert_eq!(sweeps[0].adapters().len(), 1);
        assert_eq!(sweeps[1].label(), "board");
        let names: Vec<_> = sweeps[1].adapters().iter().map(|a| a.name().to_string()).collect();
        assert_eq!(names, vec!["linkedin", "indeed"]);
    }

    #[test]
    fn unavailable_network_source_is_skipped() {
        let sources = vec![
            SourceConfig {
                name: "linkedin-network".into(),
                sweep: SweepKind::Network,
                kind: SourceKind::JsonFeed,
                preset: None,
                url: Some("https://feed.test/network".into()),
                headers: HashMap::from([(
                    "Cookie".to_string(),
                    "${HUNTBOT_BUILDER_UNSET_COOKIE}".to_string(),
                )]),
            },
            SourceConfig::fixture("indeed", SweepKind::Board, "indeed-board"),
        ];
        let sweeps = build_sweeps(&sources);
        assert_eq!(sweeps.len(), 1);
        assert_eq!(sweeps[0].label(), "board");
    }

    #[tokio::test]
    async fn network_feed_records_become_network_posts() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/network")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"title":"Growth PM","company":"Acme","location":"Pune","url":"https://feed.test/p/1","posted_by":"Priya"}]"#,
            )
            .create_async()
            .await;

        let sources = vec![SourceConfig {
            name: "network-feed".into(),
            sweep: SweepKind::Network,
            kind: SourceKind::JsonFeed,
            preset: None,
            url: Some(format!("{}/network", server.url())),
            headers: HashMap::new(),
        }];
        let aggregator = Aggregator::new(
            SearchProfile::new(vec!["pm".into()], vec!["fintech".into()], vec!["Pune".into()]),
            LocationFilter::new(["pune"]),
            build_sweeps(&sources),
            Duration::ZERO,
        );

        let report = aggregator.collect().await;

        assert_eq!(report.jobs.len(), 1);
        assert!(report.jobs[0].is_network_post);
        assert_eq!(report.jobs[0].posted_by.as_deref(), Some("Priya"));
        assert_eq!(report.jobs[0].source, "network-feed");
        assert_eq!(report.network_count(), 1);
    }

    #[test]
    fn bad_preset_is_reported() {
        let config = SourceConfig::fixture("x", SweepKind::Board, "nope");
        assert!(build_adapter(&config).is_err());
    }
}
