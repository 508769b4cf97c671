//! Content configuration for the client component.
//!
//! A `ClientConfig` is the base shape (`selfId`, `passiveMode`) plus exactly
//! one content variant chosen by the `injectType` tag. Instances only come out
//! of [`validate`](crate::config::validation::validate), so the tag and the
//! content field can never disagree.

use serde::{Deserialize, Serialize};

/// Default click-confirmation message for `button`.
pub const DEFAULT_ALERT_TEXT: &str = "点击生效了！";

/// Default placeholder paragraph for `text`.
pub const DEFAULT_SHOW_TEXT: &str = "注入了文本!";

/// Default placeholder frame target for `iframe`.
pub const DEFAULT_SHOW_URL: &str = "https://www.example.com";

/// Default sample markup block for `html`.
pub const DEFAULT_HTML_CONTENT: &str = r#"<div data-v-3643fc79="" data-v-c7b1cbd5="" class="screen screen-cover">
    <h1 data-v-3643fc79=""><span data-v-3643fc79="" class="koi">Koi</span>shi.js</h1>
    <p data-v-3643fc79="" class="desc">创建跨平台、可扩展、高性能的机器人</p>
    <div data-v-3643fc79="" class="actions">
        <a data-v-3643fc79="" class="action-button primary" href="/zh-CN/manual/starter/">即刻起步</a><a data-v-3643fc79=""
            class="action-button secondary">了解更多</a>
    </div>
    <svg width="100" height="100" data-v-3643fc79="" aria-hidden="true" focusable="false" role="img" viewBox="0 0 320 512">
        <g data-v-3643fc79="">
            <path data-v-3643fc79="" fill="var(--vp-c-brand-alt)"
                d="M160 256.14l-56.51 56.47-96.44-96.15a23.77 23.77.0 01-.18-33.61l.18-.18 22.59-22.51a23.94 23.94.0 0133.85.0z">
            </path>
            <path data-v-3643fc79="" fill="var(--vp-c-brand-darker)"
                d="M313 182.57 290.21 160a23.94 23.94.0 00-33.85.0L103.47 312.61 143 352l.06.06a24 24 0 0033.93-.16L313 216.36l.18-.17a23.78 23.78.0 00-.18-33.62z">
            </path>
        </g>
    </svg>
</div>"#;

/// Number of filler characters in the default `markdown` content.
const MARKDOWN_FILLER_LEN: usize = 68;

/// Default filler text for `markdown`.
pub fn default_markdown_content() -> String {
    "水".repeat(MARKDOWN_FILLER_LEN)
}

/// Discriminant selecting which content kind a config carries.
///
/// The same tag set doubles as the `type` of a delivered payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectType {
    Button,
    Text,
    Iframe,
    Html,
    Markdown,
    Null,
}

impl InjectType {
    /// All tags, in declaration order.
    pub const ALL: [InjectType; 6] = [
        InjectType::Button,
        InjectType::Text,
        InjectType::Iframe,
        InjectType::Html,
        InjectType::Markdown,
        InjectType::Null,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InjectType::Button => "button",
            InjectType::Text => "text",
            InjectType::Iframe => "iframe",
            InjectType::Html => "html",
            InjectType::Markdown => "markdown",
            InjectType::Null => "null",
        }
    }

    /// Parse a raw tag. Matching is exact (case sensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }

    /// Name of the content field this tag requires, if any.
    pub fn content_field(&self) -> Option<&'static str> {
        match self {
            InjectType::Button => Some("alertText"),
            InjectType::Text => Some("showText"),
            InjectType::Iframe => Some("showUrl"),
            InjectType::Html | InjectType::Markdown => Some("content"),
            InjectType::Null => None,
        }
    }
}

impl std::fmt::Display for InjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every content field name any variant may carry.
pub const CONTENT_FIELDS: [&str; 4] = ["alertText", "showText", "showUrl", "content"];

/// The content payload, one variant per `injectType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "injectType", rename_all = "lowercase")]
pub enum Content {
    Button {
        #[serde(rename = "alertText")]
        alert_text: String,
    },
    Text {
        #[serde(rename = "showText")]
        show_text: String,
    },
    Iframe {
        #[serde(rename = "showUrl")]
        show_url: String,
    },
    /// Raw markup.
    Html { content: String },
    /// Markdown source.
    Markdown { content: String },
    Null,
}

impl Content {
    /// Build the variant for `tag`, using the kind's default when `value` is absent.
    pub fn with_value(tag: InjectType, value: Option<String>) -> Self {
        match tag {
            InjectType::Button => Content::Button {
                alert_text: value.unwrap_or_else(|| DEFAULT_ALERT_TEXT.to_string()),
            },
            InjectType::Text => Content::Text {
                show_text: value.unwrap_or_else(|| DEFAULT_SHOW_TEXT.to_string()),
            },
            InjectType::Iframe => Content::Iframe {
                show_url: value.unwrap_or_else(|| DEFAULT_SHOW_URL.to_string()),
            },
            InjectType::Html => Content::Html {
                content: value.unwrap_or_else(|| DEFAULT_HTML_CONTENT.to_string()),
            },
            InjectType::Markdown => Content::Markdown {
                content: value.unwrap_or_else(default_markdown_content),
            },
            InjectType::Null => Content::Null,
        }
    }

    pub fn inject_type(&self) -> InjectType {
        match self {
            Content::Button { .. } => InjectType::Button,
            Content::Text { .. } => InjectType::Text,
            Content::Iframe { .. } => InjectType::Iframe,
            Content::Html { .. } => InjectType::Html,
            Content::Markdown { .. } => InjectType::Markdown,
            Content::Null => InjectType::Null,
        }
    }

    /// The configured string, or `None` for `Content::Null`.
    pub fn value(&self) -> Option<&str> {
        match self {
            Content::Button { alert_text } => Some(alert_text),
            Content::Text { show_text } => Some(show_text),
            Content::Iframe { show_url } => Some(show_url),
            Content::Html { content } | Content::Markdown { content } => Some(content),
            Content::Null => None,
        }
    }
}

/// Validated configuration of one client component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    /// Opaque id distinguishing instances of the component.
    #[serde(rename = "selfId")]
    pub self_id: String,

    /// `true` arms the push channel, `false` serves pull requests only.
    #[serde(rename = "passiveMode")]
    pub passive_mode: bool,

    #[serde(flatten)]
    pub content: Content,
}

impl ClientConfig {
    pub fn inject_type(&self) -> InjectType {
        self.content.inject_type()
    }
}
