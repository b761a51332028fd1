//! Maps a [`JobRecord`] to a Block Kit notification.
//!
//! Pure and deterministic: the same record always yields the same payload.

use huntbot_core::JobRecord;

use crate::payload::{Block, Element, NotificationPayload, TextObject};

pub const NETWORK_MARKER: &str = "👥";
pub const REMOTE_MARKER: &str = "🌐";
pub const DEFAULT_MARKER: &str = "🎯";

/// Maximum description length in characters.
pub const DESCRIPTION_LIMIT: usize = 300;
/// Appended to every description, truncated or not.
pub const CONTINUATION: &str = "...";

const INDUSTRY_PLACEHOLDER: &str = "N/A";
const POSTED_PLACEHOLDER: &str = "Recently";
const DEGREE_PLACEHOLDER: &str = "Connection";

/// Leading marker: network post, else remote, else default.
pub fn marker(job: &JobRecord) -> &'static str {
    if job.is_network_post {
        NETWORK_MARKER
    } else if job.is_remote() {
        REMOTE_MARKER
    } else {
        DEFAULT_MARKER
    }
}

/// First [`DESCRIPTION_LIMIT`] characters followed by [`CONTINUATION`].
pub fn truncate_description(description: &str) -> String {
    let mut out: String = description.chars().take(DESCRIPTION_LIMIT).collect();
    out.push_str(CONTINUATION);
    out
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Render a job record as a notification payload.
pub fn format_job(job: &JobRecord) -> NotificationPayload {
    let mut blocks = vec![
        Block::Header {
            text: TextObject::plain(format!("{} {}", marker(job), job.title)),
        },
        Block::Section {
            text: None,
            fields: vec![
                TextObject::mrkdwn(format!("*Company:*\n{}", job.company)),
                TextObject::mrkdwn(format!("*Location:*\n{}", job.location)),
                TextObject::mrkdwn(format!(
                    "*Industry:*\n{}",
                    present(&job.industry).unwrap_or(INDUSTRY_PLACEHOLDER)
                )),
                TextObject::mrkdwn(format!(
                    "*Posted:*\n{}",
                    present(&job.posted_date).unwrap_or(POSTED_PLACEHOLDER)
                )),
            ],
            accessory: None,
        },
    ];

    if job.is_network_post {
        if let Some(posted_by) = present(&job.posted_by) {
            let degree = present(&job.connection_degree).unwrap_or(DEGREE_PLACEHOLDER);
            blocks.push(Block::Context {
                elements: vec![TextObject::mrkdwn(format!(
                    "👤 Posted by: *{posted_by}* ({degree})"
                ))],
            });
        }
    }

    if let Some(description) = present(&job.description) {
        blocks.push(Block::Section {
            text: Some(TextObject::mrkdwn(format!(
                "*Description:*\n{}",
                truncate_description(description)
            ))),
            fields: Vec::new(),
            accessory: None,
        });
    }

    let label = if job.is_network_post {
        "View Post 👀"
    } else {
        "Apply Now 🚀"
    };
    blocks.push(Block::Section {
        text: Some(TextObject::mrkdwn(" ")),
        fields: Vec::new(),
        accessory: Some(Element::Button {
            text: TextObject::plain(label),
            url: job.url.clone(),
            action_id: "apply_button".to_string(),
        }),
    });
    blocks.push(Block::Divider);

    NotificationPayload {
        text: format!("New Job: {} at {}", job.title, job.company),
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_job() -> JobRecord {
        JobRecord::new(
            "Product Manager - Fintech",
            "PayTech India",
            "Pune (Hybrid)",
            "https://jobs.test/2",
            "LinkedIn",
        )
    }

    fn network_job() -> JobRecord {
        board_job().from_network("Rajesh Kumar", Some("1st degree connection".into()))
    }

    fn find_description(payload: &NotificationPayload) -> Option<String> {
        payload.blocks.iter().find_map(|b| match b {
            Block::Section { text: Some(t), .. } if t.text().starts_with("*Description:*") => {
                Some(t.text().trim_start_matches("*Description:*\n").to_string())
            }
            _ => None,
        })
    }

    fn header(payload: &NotificationPayload) -> &str {
        match &payload.blocks[0] {
            Block::Header { text } => text.text(),
            other => panic!("expected header, got: {other:?}"),
        }
    }

    fn button(payload: &NotificationPayload) -> (&str, &str) {
        payload
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Section {
                    accessory: Some(Element::Button { text, url, .. }),
                    ..
                } => Some((text.text(), url.as_str())),
                _ => None,
            })
            .expect("button block")
    }

    #[test]
    fn marker_precedence() {
        let mut remote_network = network_job();
        remote_network.location = "Remote".into();
        assert_eq!(marker(&remote_network), NETWORK_MARKER);

        let mut remote = board_job();
        remote.location = "Chennai (Remote)".into();
        assert_eq!(marker(&remote), REMOTE_MARKER);

        assert_eq!(marker(&board_job()), DEFAULT_MARKER);
    }

    #[test]
    fn header_carries_marker_and_title() {
        assert_eq!(header(&format_job(&board_job())), "🎯 Product Manager - Fintech");
    }

    #[test]
    fn placeholders_for_missing_fields() {
        let payload = format_job(&board_job());
        let fields = match &payload.blocks[1] {
            Block::Section { fields, .. } => fields,
            other => panic!("expected fields section, got: {other:?}"),
        };
        let texts: Vec<&str> = fields.iter().map(|f| f.text()).collect();
        assert_eq!(
            texts,
            vec![
                "*Company:*\nPayTech India",
                "*Location:*\nPune (Hybrid)",
                "*Industry:*\nN/A",
                "*Posted:*\nRecently",
            ]
        );
    }

    #[test]
    fn present_fields_are_rendered() {
        let job = board_job().with_industry("Finance").with_posted_date("1 day ago");
        let plain = format_job(&job).to_plain_text();
        assert!(plain.contains("*Industry:* Finance"));
        assert!(plain.contains("*Posted:* 1 day ago"));
    }

    #[test]
    fn short_description_still_gets_continuation() {
        let description = "x".repeat(50);
        let payload = format_job(&board_job().with_description(description.clone()));
        assert_eq!(find_description(&payload), Some(format!("{description}...")));
    }

    #[test]
    fn long_description_truncated_to_limit() {
        let description = "y".repeat(450);
        let payload = format_job(&board_job().with_description(description));
        let rendered = find_description(&payload).unwrap();
        assert_eq!(rendered.chars().count(), DESCRIPTION_LIMIT + CONTINUATION.len());
        assert!(rendered.ends_with("y..."));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let description = "é".repeat(301);
        assert_eq!(truncate_description(&description), format!("{}...", "é".repeat(300)));
    }

    #[test]
    fn no_description_block_when_absent() {
        assert!(find_description(&format_job(&board_job())).is_none());
        assert!(find_description(&format_job(&board_job().with_description(""))).is_none());
    }

    #[test]
    fn network_attribution_line() {
        let payload = format_job(&network_job());
        let context = payload.blocks.iter().find_map(|b| match b {
            Block::Context { elements } => Some(elements[0].text().to_string()),
            _ => None,
        });
        assert_eq!(
            context.as_deref(),
            Some("👤 Posted by: *Rajesh Kumar* (1st degree connection)")
        );
    }

    #[test]
    fn attribution_defaults_degree_label() {
        let job = board_job().from_network("Priya Sharma", None);
        let plain = format_job(&job).to_plain_text();
        assert!(plain.contains("👤 Posted by: *Priya Sharma* (Connection)"));
    }

    #[test]
    fn board_posts_have_no_attribution() {
        let mut job = board_job();
        job.posted_by = Some("Someone".into());
        assert!(!format_job(&job)
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Context { .. })));
    }

    #[test]
    fn call_to_action_label_depends_on_origin() {
        assert_eq!(
            button(&format_job(&board_job())),
            ("Apply Now 🚀", "https://jobs.test/2")
        );
        assert_eq!(
            button(&format_job(&network_job())),
            ("View Post 👀", "https://jobs.test/2")
        );
    }

    #[test]
    fn ends_with_divider_and_has_fallback_text() {
        let payload = format_job(&board_job());
        assert_eq!(payload.blocks.last(), Some(&Block::Divider));
        assert_eq!(payload.text, "New Job: Product Manager - Fintech at PayTech India");
    }

    #[test]
    fn formatting_is_deterministic() {
        let job = network_job().with_description("Growth role");
        assert_eq!(format_job(&job), format_job(&job));
    }
}
