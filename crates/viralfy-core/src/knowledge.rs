//! Research knowledge bases, `research/<topic-id>-knowledge-base.md`.
//!
//! The file is Markdown with an optional YAML frontmatter block carrying the
//! structured fields. The body is kept verbatim.

use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub topic_id: String,
    #[serde(default)]
    pub topic_title: String,
    #[serde(default)]
    pub core_insights: Vec<String>,
    #[serde(default)]
    pub key_arguments: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub unique_perspectives: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    /// Markdown body following the frontmatter.
    #[serde(skip)]
    pub content: String,
}

/// `None` when the topic has no knowledge base yet.
pub fn load(root: &Path, topic_id: &str) -> Result<Option<KnowledgeBase>> {
    paths::validate_id(topic_id)?;
    let path = paths::knowledge_base_path(root, topic_id);
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&path)?;
    Ok(Some(parse(topic_id, &raw)))
}

/// Write the raw Markdown document for `topic_id`.
pub fn save(root: &Path, topic_id: &str, content: &str) -> Result<()> {
    paths::validate_id(topic_id)?;
    crate::io::write_text(&paths::knowledge_base_path(root, topic_id), content)
}

/// Topic ids that have a knowledge base file, sorted.
pub fn list(root: &Path) -> Result<Vec<String>> {
    let stems = crate::io::list_stems(&paths::research_dir(root), &["md"])?;
    let suffix = paths::KNOWLEDGE_BASE_SUFFIX.trim_end_matches(".md");
    Ok(stems
        .into_iter()
        .filter_map(|s| s.strip_suffix(suffix).map(str::to_string))
        .filter(|id| !id.is_empty())
        .collect())
}

pub fn parse(topic_id: &str, raw: &str) -> KnowledgeBase {
    let (meta, body) = match split_frontmatter(raw) {
        Some((fm, body)) if fm.trim().is_empty() => (KnowledgeBase::default(), body),
        Some((fm, body)) => match serde_yaml::from_str::<KnowledgeBase>(fm) {
            Ok(kb) => (kb, body),
            Err(e) => {
                tracing::warn!(topic = topic_id, error = %e, "malformed knowledge base frontmatter");
                (KnowledgeBase::default(), raw)
            }
        },
        None => (KnowledgeBase::default(), raw),
    };
    KnowledgeBase {
        topic_id: topic_id.to_string(),
        content: body.to_string(),
        ..meta
    }
}

/// Split `---\n<yaml>\n---\n<body>` into its two halves.
fn split_frontmatter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("---")?;
    let rest = rest
        .strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))?;
    let (fm, after) = match rest.strip_prefix("---") {
        Some(after) => ("", after),
        None => {
            let end = rest.find("\n---")?;
            (&rest[..end], &rest[end + "\n---".len()..])
        }
    };
    let body = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
        .unwrap_or(after);
    Some((fm, body))
}
