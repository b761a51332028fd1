//! Runs every sweep over the search profile and collapses duplicates.
//!
//! Adapter failures are absorbed as empty results; one broken source never
//! aborts the sweep. Calls are strictly sequential with a fixed pause between
//! consecutive adapter invocations.

use std::collections::HashSet;
use std::time::Duration;

use huntbot_core::JobRecord;

use crate::filter::{IndustryFilter, LocationFilter};
use crate::profile::{SearchProfile, Sweep};

/// Output of one aggregation sweep.
#[derive(Debug, Default)]
pub struct Aggregation {
    /// Deduplicated records in first-seen order.
    pub jobs: Vec<JobRecord>,
    /// Records returned by adapters before filtering.
    pub fetched: usize,
    /// Records dropped by the location/industry filters.
    pub filtered_out: usize,
    /// Records dropped as `(title, company)` duplicates.
    pub duplicates: usize,
    /// Adapter calls that failed and counted as empty.
    pub source_failures: usize,
}

impl Aggregation {
    pub fn network_count(&self) -> usize {
        self.jobs.iter().filter(|j| j.is_network_post).count()
    }

    pub fn board_count(&self) -> usize {
        self.jobs.len() - self.network_count()
    }
}

/// Sweeps all configured sources across the search profile.
pub struct Aggregator {
    profile: SearchProfile,
    location_filter: LocationFilter,
    industry_filter: IndustryFilter,
    sweeps: Vec<Sweep>,
    pause: Duration,
}

impl Aggregator {
    pub fn new(
        profile: SearchProfile,
        location_filter: LocationFilter,
        sweeps: Vec<Sweep>,
        pause: Duration,
    ) -> Self {
        let industry_filter = IndustryFilter::new(&profile.industries);
        Self {
            profile,
            location_filter,
            industry_filter,
            sweeps,
            pause,
        }
    }

    /// Total adapter calls one sweep will make.
    pub fn planned_calls(&self) -> usize {
        self.sweeps
            .iter()
            .map(|s| s.queries(&self.profile).len() * s.adapters().len())
            .sum()
    }

    /// Run every sweep and return the deduplicated records.
    pub async fn collect(&self) -> Aggregation {
        let mut report = Aggregation::default();
        let mut collected = Vec::new();
        let mut calls = 0usize;
        tracing::info!(
            sweeps = self.sweeps.len(),
            planned_calls = self.planned_calls(),
            "aggregation starting"
        );

        for sweep in &self.sweeps {
            let queries = sweep.queries(&self.profile);
            tracing::info!(
                sweep = sweep.label(),
                adapters = sweep.adapters().len(),
                queries = queries.len(),
                "starting sweep"
            );

            for query in &queries {
                for adapter in sweep.adapters() {
                    if calls > 0 && !self.pause.is_zero() {
                        tokio::time::sleep(self.pause).await;
                    }
                    calls += 1;

                    let records = match adapter.fetch(&query.text, &query.location).await {
                        Ok(records) => records,
                        Err(e) => {
                            tracing::warn!(
                                source = adapter.name(),
                                query = %query.text,
                                location = %query.location,
                                error = %e,
                                "source fetch failed, treating as empty"
                            );
                            report.source_failures += 1;
                            continue;
                        }
                    };

                    report.fetched += records.len();
                    for mut job in records {
                        sweep.stamp(&mut job);
                        if sweep.admits(&job, &self.location_filter, &self.industry_filter) {
                            collected.push(job);
                        } else {
                            report.filtered_out += 1;
                        }
                    }
                }
            }
        }

        let before = collected.len();
        report.jobs = dedup_by_aggregation_key(collected);
        report.duplicates = before - report.jobs.len();

        tracing::info!(
            unique = report.jobs.len(),
            network = report.network_count(),
            board = report.board_count(),
            fetched = report.fetched,
            filtered_out = report.filtered_out,
            duplicates = report.duplicates,
            source_failures = report.source_failures,
            "aggregation complete"
        );

        report
    }
}

/// Keep the first record for each `(title, company)` key, preserving order.
///
/// Later duplicates are dropped whole; fields are never merged.
pub fn dedup_by_aggregation_key<I>(records: I) -> Vec<JobRecord>
where
    I: IntoIterator<Item = JobRecord>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|job| seen.insert(job.aggregation_key()))
        .collect()
}
