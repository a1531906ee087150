//! Multi-platform distribution jobs, `distribution/jobs/<id>.json`.

use crate::error::Result;
use crate::paths;
use crate::types::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub word_count: u64,
    pub character_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_performance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_post: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformPost {
    pub post_id: String,
    pub platform: Platform,
    pub variant: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub metadata: PostMetadata,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub platform: Platform,
    #[serde(default)]
    pub posts: Vec<PlatformPost>,
    pub status: ResultStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionJob {
    pub id: String,
    pub newsletter_id: String,
    pub platforms: Vec<Platform>,
    pub status: JobStatus,
    #[serde(default)]
    pub results: Vec<DistributionResult>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl DistributionJob {
    pub fn load(root: &Path, id: &str) -> Result<Option<Self>> {
        paths::validate_id(id)?;
        let path = paths::distribution_job_path(root, id);
        if !path.exists() {
            return Ok(None);
        }
        crate::io::read_json(&path).map(Some)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        paths::validate_id(&self.id)?;
        crate::io::write_json(&paths::distribution_job_path(root, &self.id), self)
    }

    pub fn list(root: &Path) -> Result<Vec<String>> {
        crate::io::list_stems(&paths::distribution_jobs_dir(root), &["json"])
    }

    /// Platforms whose result reported a failure.
    pub fn failed_platforms(&self) -> Vec<Platform> {
        self.results
            .iter()
            .filter(|r| r.status == ResultStatus::Failed)
            .map(|r| r.platform)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn job() -> DistributionJob {
        DistributionJob {
            id: "job-001".into(),
            newsletter_id: "issue-001".into(),
            platforms: vec![Platform::Twitter, Platform::Linkedin],
            status: JobStatus::Completed,
            results: vec![
                DistributionResult {
                    platform: Platform::Twitter,
                    posts: vec![PlatformPost {
                        post_id: "tw-1".into(),
                        platform: Platform::Twitter,
                        variant: 1,
                        title: None,
                        content: "thread 1/5".into(),
                        metadata: PostMetadata {
                            word_count: 2,
                            character_count: 10,
                            ..Default::default()
                        },
                        status: PostStatus::Draft,
                        created_at: Utc::now(),
                    }],
                    status: ResultStatus::Success,
                    error: None,
                },
                DistributionResult {
                    platform: Platform::Linkedin,
                    posts: vec![],
                    status: ResultStatus::Failed,
                    error: Some("rate limited".into()),
                },
            ],
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn job_roundtrip() {
        let dir = TempDir::new().unwrap();
        let job = job();
        job.save(dir.path()).unwrap();
        assert_eq!(DistributionJob::load(dir.path(), "job-001").unwrap(), Some(job));
        assert_eq!(DistributionJob::list(dir.path()).unwrap(), vec!["job-001"]);
    }

    #[test]
    fn failed_platforms_reported() {
        assert_eq!(job().failed_platforms(), vec![Platform::Linkedin]);
    }

    #[test]
    fn missing_jobs_dir_lists_empty() {
        let dir = TempDir::new().unwrap();
        assert!(DistributionJob::list(dir.path()).unwrap().is_empty());
        assert!(DistributionJob::load(dir.path(), "job-001").unwrap().is_none());
    }
}
