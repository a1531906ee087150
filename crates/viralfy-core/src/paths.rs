use crate::error::{Result, ViralfyError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CONFIG_DIR: &str = ".viralfy";
pub const CONFIG_FILE: &str = "config.json";
pub const PROGRESS_FILE: &str = "newsletter-progress.json";

pub const IDEAS_DIR: &str = "ideas";
pub const RESEARCH_DIR: &str = "research";
pub const NEWSLETTERS_DIR: &str = "newsletters";
pub const DISTRIBUTION_DIR: &str = "distribution";
pub const SWIPE_DIR: &str = "swipe-files";

pub const VALIDATED_TOPICS_FILE: &str = "ideas/validated-topics.json";
pub const PERSONAS_DIR: &str = "swipe-files/personas";
pub const SWIPE_POSTS_DIR: &str = "swipe-files/posts";
pub const DISTRIBUTION_JOBS_DIR: &str = "distribution/jobs";

pub const KNOWLEDGE_BASE_SUFFIX: &str = "-knowledge-base.md";
pub const NEWSLETTER_FILE: &str = "newsletter.md";
pub const SECTIONS_DIR: &str = "sections";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_dir(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    config_dir(root).join(CONFIG_FILE)
}

pub fn progress_path(root: &Path) -> PathBuf {
    config_dir(root).join(PROGRESS_FILE)
}

pub fn validated_topics_path(root: &Path) -> PathBuf {
    root.join(VALIDATED_TOPICS_FILE)
}

pub fn research_dir(root: &Path) -> PathBuf {
    root.join(RESEARCH_DIR)
}

pub fn knowledge_base_path(root: &Path, topic_id: &str) -> PathBuf {
    research_dir(root).join(format!("{topic_id}{KNOWLEDGE_BASE_SUFFIX}"))
}

pub fn newsletter_dir(root: &Path, newsletter_id: &str) -> PathBuf {
    root.join(NEWSLETTERS_DIR).join(newsletter_id)
}

pub fn newsletter_path(root: &Path, newsletter_id: &str) -> PathBuf {
    newsletter_dir(root, newsletter_id).join(NEWSLETTER_FILE)
}

pub fn sections_dir(root: &Path, newsletter_id: &str) -> PathBuf {
    newsletter_dir(root, newsletter_id).join(SECTIONS_DIR)
}

/// `newsletters/<id>/sections/<NN>-section.md`, section number zero-padded to two digits.
pub fn section_path(root: &Path, newsletter_id: &str, number: u32) -> PathBuf {
    sections_dir(root, newsletter_id).join(format!("{number:02}-section.md"))
}

pub fn personas_dir(root: &Path) -> PathBuf {
    root.join(PERSONAS_DIR)
}

pub fn persona_path(root: &Path, persona_id: &str) -> PathBuf {
    personas_dir(root).join(format!("{persona_id}.yaml"))
}

pub fn swipe_posts_dir(root: &Path) -> PathBuf {
    root.join(SWIPE_POSTS_DIR)
}

pub fn swipe_post_path(root: &Path, post_id: &str) -> PathBuf {
    swipe_posts_dir(root).join(format!("{post_id}.json"))
}

pub fn distribution_jobs_dir(root: &Path) -> PathBuf {
    root.join(DISTRIBUTION_JOBS_DIR)
}

pub fn distribution_job_path(root: &Path, job_id: &str) -> PathBuf {
    distribution_jobs_dir(root).join(format!("{job_id}.json"))
}

// ---------------------------------------------------------------------------
// Id validation
// ---------------------------------------------------------------------------

static ID_RE: OnceLock<Regex> = OnceLock::new();

fn id_re() -> &'static Regex {
    ID_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._\-]*$").unwrap())
}

/// Ids end up as file and directory names under the project root.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 128 || id.contains("..") || !id_re().is_match(id) {
        return Err(ViralfyError::InvalidId(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
