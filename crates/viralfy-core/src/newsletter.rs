use crate::error::Result;
use crate::paths;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionDraft {
    pub number: u32,
    pub content: String,
    pub word_count: usize,
}

/// A newsletter as laid out on disk: `newsletter.md` plus `sections/NN-section.md`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsletterDraft {
    pub id: String,
    pub content: String,
    pub sections: Vec<SectionDraft>,
}

impl NewsletterDraft {
    pub fn word_count(&self) -> usize {
        self.sections.iter().map(|s| s.word_count).sum()
    }
}

/// `None` when `newsletter.md` does not exist.
pub fn load(root: &Path, newsletter_id: &str) -> Result<Option<NewsletterDraft>> {
    paths::validate_id(newsletter_id)?;
    let path = paths::newsletter_path(root, newsletter_id);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    let sections = load_sections(root, newsletter_id)?;
    Ok(Some(NewsletterDraft {
        id: newsletter_id.to_string(),
        content,
        sections,
    }))
}

pub fn save(root: &Path, newsletter_id: &str, content: &str) -> Result<()> {
    paths::validate_id(newsletter_id)?;
    crate::io::write_text(&paths::newsletter_path(root, newsletter_id), content)
}

pub fn save_section(root: &Path, newsletter_id: &str, number: u32, content: &str) -> Result<()> {
    paths::validate_id(newsletter_id)?;
    crate::io::write_text(&paths::section_path(root, newsletter_id, number), content)
}

/// Sections present on disk, ordered by number. Files not matching
/// `NN-section.md` are skipped.
pub fn load_sections(root: &Path, newsletter_id: &str) -> Result<Vec<SectionDraft>> {
    paths::validate_id(newsletter_id)?;
    let dir = paths::sections_dir(root, newsletter_id);
    let mut sections = Vec::new();
    for stem in crate::io::list_stems(&dir, &["md"])? {
        let Some(number) = stem
            .strip_suffix("-section")
            .and_then(|n| n.parse::<u32>().ok())
        else {
            continue;
        };
        let content = std::fs::read_to_string(dir.join(format!("{stem}.md")))?;
        sections.push(SectionDraft {
            number,
            word_count: word_count(&content),
            content,
        });
    }
    sections.sort_by_key(|s| s.number);
    Ok(sections)
}

/// Each CJK character counts as one word; everything else is split on whitespace.
pub fn word_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;
    for c in text.chars() {
        if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            count += 1;
            in_word = true;
        }
    }
    count
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xF900..=0xFAFF
        | 0x3040..=0x30FF
        | 0xAC00..=0xD7AF
        | 0x20000..=0x2A6DF)
}
