//! Block Kit message structures.

use serde::Serialize;

/// A rendered notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationPayload {
    /// Fallback text shown by clients that cannot render blocks.
    pub text: String,
    pub blocks: Vec<Block>,
}

impl NotificationPayload {
    /// Flatten the blocks into readable lines for logs.
    pub fn to_plain_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Header { text } => lines.push(text.text().to_string()),
                Block::Section {
                    text,
                    fields,
                    accessory,
                } => {
                    if let Some(text) = text {
                        if !text.text().trim().is_empty() {
                            lines.push(text.text().to_string());
                        }
                    }
                    for field in fields {
                        lines.push(field.text().replace('\n', " "));
                    }
                    if let Some(Element::Button { text, url, .. }) = accessory {
                        lines.push(format!("{} -> {}", text.text(), url));
                    }
                }
                Block::Context { elements } => {
                    lines.extend(elements.iter().map(|e| e.text().to_string()));
                }
                Block::Divider => {}
            }
        }
        lines.join("\n")
    }
}

/// One layout block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: TextObject,
    },
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        fields: Vec<TextObject>,
        #[serde(skip_serializing_if = "Option::is_none")]
        accessory: Option<Element>,
    },
    Context {
        elements: Vec<TextObject>,
    },
    Divider,
}

/// Text composition object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText { text: String, emoji: bool },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        TextObject::PlainText {
            text: text.into(),
            emoji: true,
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        TextObject::Mrkdwn { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            TextObject::PlainText { text, .. } | TextObject::Mrkdwn { text } => text,
        }
    }
}

/// Interactive element attached to a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Button {
        text: TextObject,
        url: String,
        action_id: String,
    },
}
