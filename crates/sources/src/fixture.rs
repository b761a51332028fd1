//! Fixed-record adapters and the bundled sample postings.
//!
//! A [`StaticAdapter`] returns the same records for every query, which is how
//! the board and network presets behave until a real integration replaces
//! them.

use huntbot_core::JobRecord;

use crate::traits::{SourceAdapter, SourceError};

/// Adapter that returns a fixed record list regardless of the query.
#[derive(Debug, Clone)]
pub struct StaticAdapter {
    name: String,
    records: Vec<JobRecord>,
}

impl StaticAdapter {
    pub fn new(name: impl Into<String>, records: Vec<JobRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Build an adapter from a named preset.
    pub fn from_preset(name: impl Into<String>, preset: &str) -> Result<Self, SourceError> {
        let records = match preset {
            "linkedin-board" => linkedin_board(),
            "indeed-board" => indeed_board(),
            "linkedin-network" => linkedin_network(),
            other => {
                return Err(SourceError::Config(format!("unknown fixture preset '{other}'")));
            }
        };
        Ok(Self::new(name, records))
    }
}

#[async_trait::async_trait]
impl SourceAdapter for StaticAdapter {
    async fn fetch(&self, _query: &str, _location: &str) -> Result<Vec<JobRecord>, SourceError> {
        Ok(self.records.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Sample LinkedIn public job board postings.
pub fn linkedin_board() -> Vec<JobRecord> {
    vec![
        JobRecord::new(
            "Senior Product Manager - Healthcare",
            "HealthTech Solutions India",
            "Bangalore",
            "https://www.linkedin.com/jobs/view/example1",
            "LinkedIn",
        )
        .with_industry("Healthcare")
        .with_description(
            "Looking for an experienced PM to lead our healthcare platform initiatives. \
             Experience with telemedicine and healthcare workflows required.",
        )
        .with_posted_date("2 days ago"),
        JobRecord::new(
            "Product Manager - Fintech",
            "PayTech India",
            "Pune (Hybrid)",
            "https://www.linkedin.com/jobs/view/example2",
            "LinkedIn",
        )
        .with_industry("Finance")
        .with_description(
            "Join our team to build the next generation of payment products. \
             Experience with UPI and digital payments preferred.",
        )
        .with_posted_date("1 day ago"),
        JobRecord::new(
            "Lead Product Manager - EdTech",
            "Learning Platform Co",
            "Remote (India)",
            "https://www.linkedin.com/jobs/view/example3",
            "LinkedIn",
        )
        .with_industry("Education")
        .with_description(
            "Lead the product strategy for our online learning platform serving \
             millions of students across India.",
        )
        .with_posted_date("Today"),
    ]
}

/// Sample Indeed postings.
pub fn indeed_board() -> Vec<JobRecord> {
    vec![
        JobRecord::new(
            "Product Manager - Digital Health",
            "MedTech Innovations",
            "Hyderabad",
            "https://www.indeed.com/viewjob?jk=example1",
            "Indeed",
        )
        .with_industry("Healthcare")
        .with_description(
            "Seeking a PM passionate about healthcare technology. Work on products \
             that impact millions of patients across India.",
        )
        .with_posted_date("Today"),
        JobRecord::new(
            "Senior PM - Financial Services",
            "Fintech Unicorn",
            "Chennai (Remote)",
            "https://www.indeed.com/viewjob?jk=example2",
            "Indeed",
        )
        .with_industry("Finance")
        .with_description(
            "Build innovative financial products for the Indian market. Experience \
             with lending, payments, or wealth management required.",
        )
        .with_posted_date("2 days ago"),
    ]
}

/// Sample hiring posts from personal connections.
pub fn linkedin_network() -> Vec<JobRecord> {
    vec![
        JobRecord::new(
            "Product Manager - Growth",
            "TechStartup India",
            "Bangalore (Hybrid)",
            "https://www.linkedin.com/feed/update/urn:li:activity:example1",
            "LinkedIn Network",
        )
        .with_industry("Technology")
        .with_description(
            "We're hiring a PM to lead our growth initiatives. Looking for someone \
             with 3+ years of experience in product-led growth.",
        )
        .with_posted_date("1 day ago")
        .from_network("Rajesh Kumar", Some("1st degree connection".into())),
        JobRecord::new(
            "Senior Product Manager",
            "Innovation Labs",
            "Pune (Remote)",
            "https://www.linkedin.com/feed/update/urn:li:activity:example2",
            "LinkedIn Network",
        )
        .with_industry("SaaS")
        .with_description(
            "Exciting opportunity to build the next generation of B2B products. \
             Join our growing team!",
        )
        .with_posted_date("3 hours ago")
        .from_network("Priya Sharma", Some("2nd degree connection".into())),
    ]
}
