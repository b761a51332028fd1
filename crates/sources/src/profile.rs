//! Search profile and the two sweep variants that expand it into queries.

use std::sync::Arc;

use huntbot_core::config::SearchConfig;
use huntbot_core::JobRecord;

use crate::filter::{IndustryFilter, LocationFilter};
use crate::traits::SourceAdapter;

/// The configured `roles x industries x locations` search space.
#[derive(Debug, Clone)]
pub struct SearchProfile {
    pub roles: Vec<String>,
    pub industries: Vec<String>,
    pub locations: Vec<String>,
}

impl SearchProfile {
    pub fn new(roles: Vec<String>, industries: Vec<String>, locations: Vec<String>) -> Self {
        Self {
            roles,
            industries,
            locations,
        }
    }

    pub fn from_config(search: &SearchConfig) -> Self {
        Self::new(
            search.roles.clone(),
            search.industries.clone(),
            search.locations.clone(),
        )
    }
}

/// One adapter invocation's arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub location: String,
}

/// Personal-connection feeds.
///
/// Queried per `role x location` with no industry dimension, and filtered by
/// location only: network posts are not tagged by industry.
pub struct NetworkSweep {
    pub adapters: Vec<Arc<dyn SourceAdapter>>,
}

/// Public job boards.
///
/// Queried per `role x industry x location` as `"{role} {industry}"`, then
/// filtered by location and by industry.
pub struct BoardSweep {
    pub adapters: Vec<Arc<dyn SourceAdapter>>,
}

/// A group of adapters sharing one query expansion and filter chain.
pub enum Sweep {
    Network(NetworkSweep),
    Board(BoardSweep),
}

impl Sweep {
    pub fn network(adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Sweep::Network(NetworkSweep { adapters })
    }

    pub fn board(adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Sweep::Board(BoardSweep { adapters })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sweep::Network(_) => "network",
            Sweep::Board(_) => "board",
        }
    }

    pub fn adapters(&self) -> &[Arc<dyn SourceAdapter>] {
        match self {
            Sweep::Network(s) => &s.adapters,
            Sweep::Board(s) => &s.adapters,
        }
    }

    /// Expand the profile into this sweep's queries, in call order.
    pub fn queries(&self, profile: &SearchProfile) -> Vec<Query> {
        let mut queries = Vec::new();
        match self {
            Sweep::Network(_) => {
                for role in &profile.roles {
                    for location in &profile.locations {
                        queries.push(Query {
                            text: role.clone(),
                            location: location.clone(),
                        });
                    }
                }
            }
            Sweep::Board(_) => {
                for role in &profile.roles {
                    for industry in &profile.industries {
                        for location in &profile.locations {
                            queries.push(Query {
                                text: format!("{role} {industry}"),
                                location: location.clone(),
                            });
                        }
                    }
                }
            }
        }
        queries
    }

    /// Records from a network sweep are network posts, whatever the feed says.
    pub fn stamp(&self, job: &mut JobRecord) {
        if let Sweep::Network(_) = self {
            job.is_network_post = true;
        }
    }

    /// Whether a fetched record survives this sweep's filter chain.
    pub fn admits(
        &self,
        job: &JobRecord,
        locations: &LocationFilter,
        industries: &IndustryFilter,
    ) -> bool {
        match self {
            Sweep::Network(_) => locations.admits(job),
            Sweep::Board(_) => locations.admits(job) && industries.admits(job),
        }
    }
}
