//! Keyword filters applied to records straight after each adapter call.
//!
//! Both filters use case-insensitive substring containment, so `"remote"`
//! matches `"Remote (India)"`. False positives are accepted in exchange for
//! never dropping a posting that names an accepted keyword.

use huntbot_core::JobRecord;

/// Returns true if any accepted location token appears in `location`.
///
/// Tokens are trimmed and compared case-insensitively; blank tokens never
/// match.
pub fn location_matches<S: AsRef<str>>(location: &str, accepted: &[S]) -> bool {
    contains_any(location, accepted)
}

fn contains_any<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    let text = text.to_lowercase();
    keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .any(|k| text.contains(&k.to_lowercase()))
}

fn normalize<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Keeps records whose location text contains an accepted token.
#[derive(Debug, Clone)]
pub struct LocationFilter {
    accepted: Vec<String>,
}

impl LocationFilter {
    pub fn new<I, S>(accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            accepted: normalize(accepted),
        }
    }

    pub fn matches(&self, location: &str) -> bool {
        location_matches(location, &self.accepted)
    }

    pub fn admits(&self, job: &JobRecord) -> bool {
        self.matches(&job.location)
    }
}

/// Keeps board records whose industry mentions a configured keyword.
///
/// Records without an industry pass; they cannot be ruled out.
#[derive(Debug, Clone)]
pub struct IndustryFilter {
    industries: Vec<String>,
}

impl IndustryFilter {
    pub fn new<I, S>(industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            industries: normalize(industries),
        }
    }

    pub fn admits(&self, job: &JobRecord) -> bool {
        match job.industry.as_deref() {
            Some(industry) if !industry.trim().is_empty() => {
                contains_any(industry, &self.industries)
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_at(location: &str) -> JobRecord {
        JobRecord::new("PM", "Acme", location, "https://acme.test", "test")
    }

    #[test]
    fn hybrid_suffix_still_matches() {
        assert!(LocationFilter::new(["pune"]).matches("Pune (Hybrid)"));
        assert!(location_matches("Pune (Hybrid)", &["pune"]));
    }

    #[test]
    fn unlisted_city_rejected() {
        assert!(!LocationFilter::new(["bangalore", "pune"]).matches("Mumbai"));
        assert!(!location_matches("Mumbai", &["bangalore", "pune"]));
    }

    #[test]
    fn blank_token_matches_nothing_in_either_form() {
        assert!(!location_matches("Mumbai", &["", "pune"]));
        assert!(!LocationFilter::new(["", "pune"]).matches("Mumbai"));
        assert!(location_matches("Pune", &["  ", "pune"]));
    }

    #[test]
    fn matching_ignores_case_on_both_sides() {
        assert!(location_matches("remote (india)", &["REMOTE"]));
        assert!(location_matches("BENGALURU", &["bengaluru"]));
    }

    #[test]
    fn empty_accept_list_matches_nothing() {
        let none: [&str; 0] = [];
        assert!(!location_matches("Pune", &none));
    }

    #[test]
    fn location_filter_checks_record_location() {
        let filter = LocationFilter::new(["bangalore", "remote", "work from home"]);
        assert!(filter.admits(&job_at("Remote (India)")));
        assert!(filter.admits(&job_at("Work From Home - Anywhere")));
        assert!(!filter.admits(&job_at("Delhi NCR")));
    }

    #[test]
    fn blank_tokens_are_ignored() {
        let filter = LocationFilter::new(["", "  ", "pune"]);
        assert!(!filter.matches("Mumbai"));
        assert!(filter.matches("Pune"));
    }

    #[test]
    fn industry_filter_matches_substring() {
        let filter = IndustryFilter::new(["finance", "healthcare", "edtech"]);
        assert!(filter.admits(&job_at("Pune").with_industry("Finance")));
        assert!(filter.admits(&job_at("Pune").with_industry("Digital Healthcare")));
        assert!(!filter.admits(&job_at("Pune").with_industry("SaaS")));
    }

    #[test]
    fn industry_filter_passes_untagged_records() {
        let filter = IndustryFilter::new(["finance"]);
        assert!(filter.admits(&job_at("Pune")));
        assert!(filter.admits(&job_at("Pune").with_industry("   ")));
    }
}
