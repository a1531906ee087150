//! Writing-style personas, `swipe-files/personas/<id>.yaml`.

use crate::error::{Result, ViralfyError};
use crate::paths;
use crate::types::Platform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: String,
    pub platform: Platform,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub identity: String,
    #[serde(default)]
    pub teaching_philosophy: Vec<String>,
    pub communication_style: String,
    #[serde(default)]
    pub structure_patterns: BTreeMap<String, serde_yaml::Value>,
    #[serde(default)]
    pub signature_elements: BTreeMap<String, serde_yaml::Value>,
    #[serde(default)]
    pub psychological_triggers: BTreeMap<String, serde_yaml::Value>,
    #[serde(default)]
    pub tone: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaExample {
    pub title: String,
    pub structure: String,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageGuide {
    #[serde(default)]
    pub when_to_use: Vec<String>,
    #[serde(default)]
    pub how_to_adapt: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cautions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub author: AuthorInfo,
    pub persona: PersonaProfile,
    #[serde(default)]
    pub examples: Vec<PersonaExample>,
    #[serde(default)]
    pub usage_guide: UsageGuide,
    pub created_at: String,
}

/// `None` when no such persona file exists. A file that fails to parse is
/// reported as `FileNotFound` naming the persona path.
pub fn load(root: &Path, persona_id: &str) -> Result<Option<Persona>> {
    paths::validate_id(persona_id)?;
    let path = paths::persona_path(root, persona_id);
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(&path)?;
    match serde_yaml::from_str::<Persona>(&data) {
        Ok(persona) => Ok(Some(persona)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to parse persona");
            Err(ViralfyError::FileNotFound(path))
        }
    }
}

pub fn save(root: &Path, persona: &Persona) -> Result<()> {
    paths::validate_id(&persona.id)?;
    let data = serde_yaml::to_string(persona)?;
    crate::io::write_text(&paths::persona_path(root, &persona.id), &data)
}

/// Persona ids (`.yaml` or `.yml` stems), sorted. Missing directory → empty.
pub fn list(root: &Path) -> Result<Vec<String>> {
    let mut ids = crate::io::list_stems(&paths::personas_dir(root), &["yaml", "yml"])?;
    ids.dedup();
    Ok(ids)
}
