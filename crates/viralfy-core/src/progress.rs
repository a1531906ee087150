use crate::error::Result;
use crate::paths;
use crate::types::NewsletterStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The single in-flight newsletter pointer, `.viralfy/newsletter-progress.json`.
///
/// `current_section` is the next section to work on and need not appear in
/// `completed_sections`. Both are maintained by the `write` script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterProgress {
    pub newsletter_id: String,
    pub topic_id: String,
    pub total_sections: u32,
    pub completed_sections: Vec<u32>,
    pub current_section: u32,
    pub status: NewsletterStatus,
    pub word_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewsletterProgress {
    /// Returns `None` when the file is missing or unreadable; a corrupt
    /// progress file means "no progress".
    pub fn load(root: &Path) -> Option<Self> {
        let path = paths::progress_path(root);
        if !path.exists() {
            return None;
        }
        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|data| serde_json::from_str(&data).map_err(|e| e.to_string()));
        match parsed {
            Ok(progress) => Some(progress),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable progress file");
                None
            }
        }
    }

    /// Overwrites the whole record.
    pub fn save(&self, root: &Path) -> Result<()> {
        crate::io::write_json(&paths::progress_path(root), self)
    }

    /// Remove the progress file; a missing file is fine.
    pub fn clear(root: &Path) -> Result<()> {
        crate::io::remove(&paths::progress_path(root))
    }

    /// Completed section numbers that fall inside `1..=total_sections`, sorted and unique.
    pub fn completed_in_range(&self) -> Vec<u32> {
        let mut done: Vec<u32> = self
            .completed_sections
            .iter()
            .copied()
            .filter(|n| (1..=self.total_sections).contains(n))
            .collect();
        done.sort_unstable();
        done.dedup();
        done
    }

    pub fn is_complete(&self) -> bool {
        self.total_sections > 0 && self.completed_in_range().len() as u32 == self.total_sections
    }
}
