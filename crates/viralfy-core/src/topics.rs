use crate::error::Result;
use crate::paths;
use crate::types::{TopicSource, TopicStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweets: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedTopic {
    pub id: String,
    pub title: String,
    pub source: TopicSource,
    /// 0-100.
    pub score: u8,
    #[serde(default)]
    pub metrics: TopicMetrics,
    pub validated_at: DateTime<Utc>,
    pub status: TopicStatus,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TopicsFile {
    #[serde(default)]
    topics: Vec<ValidatedTopic>,
}

/// Topics from `ideas/validated-topics.json`. Missing or unreadable → empty.
pub fn load_validated(root: &Path) -> Vec<ValidatedTopic> {
    let path = paths::validated_topics_path(root);
    if !path.exists() {
        return Vec::new();
    }
    match crate::io::read_json::<TopicsFile>(&path) {
        Ok(file) => file.topics,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable topics file");
            Vec::new()
        }
    }
}

pub fn save_validated(root: &Path, topics: &[ValidatedTopic]) -> Result<()> {
    #[derive(Serialize)]
    struct TopicsOut<'a> {
        topics: &'a [ValidatedTopic],
    }
    crate::io::write_json(&paths::validated_topics_path(root), &TopicsOut { topics })
}

pub fn find_validated(root: &Path, topic_id: &str) -> Option<ValidatedTopic> {
    load_validated(root).into_iter().find(|t| t.id == topic_id)
}
