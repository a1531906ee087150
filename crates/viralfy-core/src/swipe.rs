//! Collected reference posts, `swipe-files/posts/<id>.json`.

use crate::error::Result;
use crate::paths;
use crate::topics::TopicMetrics;
use crate::types::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipePost {
    pub id: String,
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub metrics: TopicMetrics,
    pub collected_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SwipePost {
    pub fn load(root: &Path, id: &str) -> Result<Option<Self>> {
        paths::validate_id(id)?;
        let path = paths::swipe_post_path(root, id);
        if !path.exists() {
            return Ok(None);
        }
        crate::io::read_json(&path).map(Some)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        paths::validate_id(&self.id)?;
        crate::io::write_json(&paths::swipe_post_path(root, &self.id), self)
    }

    pub fn list(root: &Path) -> Result<Vec<String>> {
        crate::io::list_stems(&paths::swipe_posts_dir(root), &["json"])
    }
}
