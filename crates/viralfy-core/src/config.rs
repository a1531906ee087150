use crate::error::{Result, ViralfyError};
use crate::paths;
use crate::types::{ContentField, Language, Platform};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

/// `.viralfy/config.json`. Its presence marks the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project_name: String,
    pub field: ContentField,
    pub platforms: Vec<Platform>,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_style: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied by [`ProjectConfig::update`]. `None` leaves the
/// stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub project_name: Option<String>,
    pub field: Option<ContentField>,
    pub platforms: Option<Vec<Platform>>,
    pub language: Option<Language>,
    pub default_style: Option<String>,
}

impl ProjectConfig {
    pub fn new(
        project_name: impl Into<String>,
        field: ContentField,
        platforms: Vec<Platform>,
        language: Language,
    ) -> Result<Self> {
        let now = Utc::now();
        let cfg = Self {
            project_name: project_name.into(),
            field,
            platforms: dedup_platforms(platforms),
            language,
            default_style: None,
            created_at: now,
            updated_at: now,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(ViralfyError::InvalidConfig(
                "project_name must not be empty".into(),
            ));
        }
        if self.platforms.is_empty() {
            return Err(ViralfyError::InvalidConfig(
                "at least one platform is required".into(),
            ));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(ViralfyError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: ProjectConfig = serde_json::from_str(&data).map_err(|e| {
            ViralfyError::InvalidConfig(format!("failed to parse {}: {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        crate::io::write_json(&paths::config_path(root), self)
    }

    /// Read, merge `update`, refresh `updated_at`, write back.
    pub fn update(root: &Path, update: ConfigUpdate) -> Result<Self> {
        let mut cfg = Self::load(root)?;
        cfg.apply(update);
        cfg.validate()?;
        cfg.save(root)?;
        Ok(cfg)
    }

    fn apply(&mut self, update: ConfigUpdate) {
        if let Some(name) = update.project_name {
            self.project_name = name;
        }
        if let Some(field) = update.field {
            self.field = field;
        }
        if let Some(platforms) = update.platforms {
            self.platforms = dedup_platforms(platforms);
        }
        if let Some(language) = update.language {
            self.language = language;
        }
        if let Some(style) = update.default_style {
            self.default_style = Some(style);
        }
        let now = Utc::now();
        // Keep updated_at strictly increasing even on a coarse clock.
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::microseconds(1)
        };
    }
}

/// Keeps first occurrence order.
fn dedup_platforms(platforms: Vec<Platform>) -> Vec<Platform> {
    let mut out: Vec<Platform> = Vec::with_capacity(platforms.len());
    for p in platforms {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ProjectConfig {
        ProjectConfig::new(
            "A",
            ContentField::Programming,
            vec![Platform::Wechat, Platform::Twitter],
            Language::ZhCn,
        )
        .unwrap()
    }

    #[test]
    fn config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cfg = sample();
        cfg.save(dir.path()).unwrap();
        let loaded = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn empty_platforms_rejected() {
        let err = ProjectConfig::new("A", ContentField::Other, vec![], Language::EnUs);
        assert!(matches!(err, Err(ViralfyError::InvalidConfig(_))));
    }

    #[test]
    fn duplicate_platforms_collapse_in_order() {
        let cfg = ProjectConfig::new(
            "A",
            ContentField::Other,
            vec![Platform::Zhihu, Platform::Wechat, Platform::Zhihu],
            Language::EnUs,
        )
        .unwrap();
        assert_eq!(cfg.platforms, vec![Platform::Zhihu, Platform::Wechat]);
    }

    #[test]
    fn load_missing_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            ProjectConfig::load(dir.path()),
            Err(ViralfyError::NotInitialized)
        ));
    }

    #[test]
    fn load_malformed_is_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = paths::config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ProjectConfig::load(dir.path()),
            Err(ViralfyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn update_is_partial_merge() {
        let dir = TempDir::new().unwrap();
        let mut original = sample();
        original.updated_at = original.updated_at - chrono::Duration::seconds(5);
        original.save(dir.path()).unwrap();

        let updated = ProjectConfig::update(
            dir.path(),
            ConfigUpdate {
                field: Some(ContentField::Design),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.field, ContentField::Design);
        assert!(updated.updated_at > original.updated_at);
        assert_eq!(
            ProjectConfig {
                field: original.field,
                updated_at: original.updated_at,
                ..updated.clone()
            },
            original
        );
        assert_eq!(ProjectConfig::load(dir.path()).unwrap(), updated);
    }

    #[test]
    fn update_cannot_empty_platforms() {
        let dir = TempDir::new().unwrap();
        sample().save(dir.path()).unwrap();
        let res = ProjectConfig::update(
            dir.path(),
            ConfigUpdate {
                platforms: Some(vec![]),
                ..Default::default()
            },
        );
        assert!(matches!(res, Err(ViralfyError::InvalidConfig(_))));
        assert_eq!(ProjectConfig::load(dir.path()).unwrap().platforms.len(), 2);
    }
}
