use crate::error::ViralfyError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Wechat,
    Xiaohongshu,
    Zhihu,
    Bilibili,
    Douyin,
    Twitter,
    Linkedin,
    Youtube,
    Instagram,
    Tiktok,
    Facebook,
    Medium,
    Substack,
    Threads,
    Bluesky,
}

impl Platform {
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Wechat,
            Platform::Xiaohongshu,
            Platform::Zhihu,
            Platform::Bilibili,
            Platform::Douyin,
            Platform::Twitter,
            Platform::Linkedin,
            Platform::Youtube,
            Platform::Instagram,
            Platform::Tiktok,
            Platform::Facebook,
            Platform::Medium,
            Platform::Substack,
            Platform::Threads,
            Platform::Bluesky,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Wechat => "wechat",
            Platform::Xiaohongshu => "xiaohongshu",
            Platform::Zhihu => "zhihu",
            Platform::Bilibili => "bilibili",
            Platform::Douyin => "douyin",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
            Platform::Medium => "medium",
            Platform::Substack => "substack",
            Platform::Threads => "threads",
            Platform::Bluesky => "bluesky",
        }
    }

    /// Human label and the kind of content the platform carries.
    pub fn describe(self) -> (&'static str, &'static str) {
        match self {
            Platform::Wechat => ("WeChat Official Account", "long-form articles"),
            Platform::Xiaohongshu => ("Xiaohongshu", "lifestyle image posts"),
            Platform::Zhihu => ("Zhihu", "in-depth Q&A"),
            Platform::Bilibili => ("Bilibili", "video scripts"),
            Platform::Douyin => ("Douyin", "short video scripts"),
            Platform::Twitter => ("Twitter/X", "short posts and threads"),
            Platform::Linkedin => ("LinkedIn", "professional long-form"),
            Platform::Youtube => ("YouTube", "video scripts"),
            Platform::Instagram => ("Instagram", "image carousels"),
            Platform::Tiktok => ("TikTok", "short video scripts"),
            Platform::Facebook => ("Facebook", "community posts"),
            Platform::Medium => ("Medium", "blog articles"),
            Platform::Substack => ("Substack", "newsletter issues"),
            Platform::Threads => ("Threads", "short conversational posts"),
            Platform::Bluesky => ("Bluesky", "short posts"),
        }
    }

    /// Platforms pre-selected by `viralfy init`.
    pub fn default_selection() -> &'static [Platform] {
        &[Platform::Wechat, Platform::Xiaohongshu, Platform::Twitter]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = ViralfyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = if wanted == "x" { "twitter" } else { wanted.as_str() };
        Platform::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ViralfyError::InvalidValue {
                kind: "platform",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// ContentField
// ---------------------------------------------------------------------------

/// Business category of a project. Persisted with the labels the external
/// scripts and assistant templates expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentField {
    #[serde(rename = "编程开发")]
    Programming,
    #[serde(rename = "设计创意")]
    Design,
    #[serde(rename = "商业管理")]
    Business,
    #[serde(rename = "个人成长")]
    PersonalGrowth,
    #[serde(rename = "营销推广")]
    Marketing,
    #[serde(rename = "科技创新")]
    Technology,
    #[serde(rename = "生活方式")]
    Lifestyle,
    #[serde(rename = "其他")]
    Other,
}

impl ContentField {
    pub fn all() -> &'static [ContentField] {
        &[
            ContentField::Programming,
            ContentField::Design,
            ContentField::Business,
            ContentField::PersonalGrowth,
            ContentField::Marketing,
            ContentField::Technology,
            ContentField::Lifestyle,
            ContentField::Other,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentField::Programming => "编程开发",
            ContentField::Design => "设计创意",
            ContentField::Business => "商业管理",
            ContentField::PersonalGrowth => "个人成长",
            ContentField::Marketing => "营销推广",
            ContentField::Technology => "科技创新",
            ContentField::Lifestyle => "生活方式",
            ContentField::Other => "其他",
        }
    }

    /// Short ASCII key accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            ContentField::Programming => "programming",
            ContentField::Design => "design",
            ContentField::Business => "business",
            ContentField::PersonalGrowth => "growth",
            ContentField::Marketing => "marketing",
            ContentField::Technology => "technology",
            ContentField::Lifestyle => "lifestyle",
            ContentField::Other => "other",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ContentField::Programming => "tutorials and engineering practice",
            ContentField::Design => "UI/UX and visual design",
            ContentField::Business => "startups, management, business analysis",
            ContentField::PersonalGrowth => "self-improvement and productivity",
            ContentField::Marketing => "digital marketing and growth",
            ContentField::Technology => "AI, Web3 and emerging tech",
            ContentField::Lifestyle => "health, travel, everyday life",
            ContentField::Other => "anything else",
        }
    }
}

impl fmt::Display for ContentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentField {
    type Err = ViralfyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ContentField::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s || f.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ViralfyError::InvalidValue {
                kind: "content field",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "bilingual")]
    Bilingual,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::ZhCn, Language::EnUs, Language::Bilingual]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::ZhCn => "zh-CN",
            Language::EnUs => "en-US",
            Language::Bilingual => "bilingual",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::ZhCn => "Chinese (Simplified)",
            Language::EnUs => "English",
            Language::Bilingual => "Bilingual (Chinese + English)",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = ViralfyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::all()
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ViralfyError::InvalidValue {
                kind: "language",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// NewsletterStatus
// ---------------------------------------------------------------------------

/// drafting → reviewing → completed → distributed. Advanced only by the
/// external scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterStatus {
    Drafting,
    Reviewing,
    Completed,
    Distributed,
}

impl NewsletterStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NewsletterStatus::Drafting => "drafting",
            NewsletterStatus::Reviewing => "reviewing",
            NewsletterStatus::Completed => "completed",
            NewsletterStatus::Distributed => "distributed",
        }
    }
}

impl fmt::Display for NewsletterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CreationMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationMode {
    Create,
    Import,
    Assisted,
}

impl CreationMode {
    pub fn all() -> &'static [CreationMode] {
        &[
            CreationMode::Create,
            CreationMode::Import,
            CreationMode::Assisted,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CreationMode::Create => "create",
            CreationMode::Import => "import",
            CreationMode::Assisted => "assisted",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CreationMode::Create => "Write from scratch (create)",
            CreationMode::Import => "Import existing content (import)",
            CreationMode::Assisted => "AI-assisted draft (assisted)",
        }
    }
}

impl fmt::Display for CreationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CreationMode {
    type Err = ViralfyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "create" => Ok(CreationMode::Create),
            "import" => Ok(CreationMode::Import),
            "assisted" => Ok(CreationMode::Assisted),
            _ => Err(ViralfyError::InvalidValue {
                kind: "creation mode",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Topic enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicSource {
    Twitter,
    Youtube,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicStatus {
    Pending,
    Researching,
    Writing,
    Distributed,
    Archived,
}

impl TopicStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TopicStatus::Pending => "pending",
            TopicStatus::Researching => "researching",
            TopicStatus::Writing => "writing",
            TopicStatus::Distributed => "distributed",
            TopicStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
