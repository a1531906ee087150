use crate::ui::{Tone, Ui};
use anyhow::{bail, Context};
use std::path::Path;
use viralfy_core::{
    knowledge, newsletter, paths,
    progress::NewsletterProgress,
    project,
    script::{ScriptAction, ScriptRunner},
    topics,
    types::CreationMode,
};

#[derive(Debug, Default, Clone)]
pub struct WriteArgs {
    pub mode: Option<CreationMode>,
    pub topic: Option<String>,
    pub source: Option<String>,
    pub resume: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResumeChoice {
    Continue,
    Review,
    Restart,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportSource {
    Markdown,
    Pdf,
    Url,
}

pub fn run(start: &Path, runner: &ScriptRunner, ui: &Ui, args: WriteArgs) -> anyhow::Result<()> {
    let root = project::ensure_root(start)?;

    ui.title("Newsletter writing");

    if let Some(topic) = &args.topic {
        paths::validate_id(topic)?;
        if topics::find_validated(&root, topic).is_none() {
            ui.warning(&format!(
                "Topic '{topic}' is not in ideas/validated-topics.json"
            ));
        }
    }

    ui.step("Checking writing status...");
    let script_args: Vec<&str> = args.topic.as_deref().into_iter().collect();
    let response = runner
        .clone()
        .with_working_dir(&root)
        .execute("write", &script_args)
        .context("failed to check writing status")?;
    if response.is_error() {
        bail!(
            "failed to check writing status: {}",
            response.message.as_deref().unwrap_or("unknown error")
        );
    }
    ui.success("Status check complete");
    ui.newline();

    if response.action == Some(ScriptAction::Resume) {
        match response.progress() {
            Some(progress) => return resume(&root, ui, &progress, &args),
            None => ui.warning("A newsletter is in progress but its record is unreadable; starting fresh"),
        }
    }
    create(&root, ui, &args)
}

// ---------------------------------------------------------------------------
// Resume
// ---------------------------------------------------------------------------

fn resume(root: &Path, ui: &Ui, progress: &NewsletterProgress, args: &WriteArgs) -> anyhow::Result<()> {
    let done = progress.completed_in_range();
    ui.boxed(
        Some("Unfinished newsletter found"),
        &format!(
            "Newsletter: {}\nTopic:      {}\n\nProgress:   {}/{} sections\nNext:       section {}\nWords:      {}\nStatus:     {}",
            progress.newsletter_id,
            progress.topic_id,
            done.len(),
            progress.total_sections,
            progress.current_section,
            progress.word_count,
            progress.status,
        ),
        Tone::Warning,
    );
    ui.newline();

    let choice = if args.resume {
        ResumeChoice::Continue
    } else {
        let choices = [
            (
                format!("Continue - pick up at section {}", progress.current_section),
                ResumeChoice::Continue,
            ),
            ("Review - list finished sections".to_string(), ResumeChoice::Review),
            ("Restart - discard progress and start over".to_string(), ResumeChoice::Restart),
            ("Cancel".to_string(), ResumeChoice::Cancel),
        ];
        ui.select("What next?", &choices, Some(0), "--resume")?
    };

    match choice {
        ResumeChoice::Continue => {
            ui.info("Run /write in your AI assistant to continue");
            ui.newline();
            ui.subtitle("Tip:");
            ui.info(&format!(
                "The assistant resumes automatically at section {}",
                progress.current_section
            ));
        }
        ResumeChoice::Review => review(root, ui, progress),
        ResumeChoice::Restart => {
            let confirmed = ui.confirm("Discard current progress and start over?", false)?;
            restart(root, ui, confirmed, args)?;
        }
        ResumeChoice::Cancel => ui.info("Writing cancelled"),
    }
    Ok(())
}

fn review(root: &Path, ui: &Ui, progress: &NewsletterProgress) {
    let lines = review_lines(root, progress);
    if lines.is_empty() {
        ui.info("No sections finished yet");
        return;
    }
    ui.subtitle("Finished sections:");
    for line in &lines {
        ui.success(line);
    }
}

/// One line per completed section, with its word count when the draft exists.
fn review_lines(root: &Path, progress: &NewsletterProgress) -> Vec<String> {
    let drafts = newsletter::load_sections(root, &progress.newsletter_id).unwrap_or_default();
    progress
        .completed_in_range()
        .into_iter()
        .map(|number| match drafts.iter().find(|s| s.number == number) {
            Some(section) => format!("Section {number} ({} words)", section.word_count),
            None => format!("Section {number}"),
        })
        .collect()
}

/// Clear progress and start over when `confirmed`; the creation flow keeps
/// the mode and topic given on the command line.
fn restart(root: &Path, ui: &Ui, confirmed: bool, args: &WriteArgs) -> anyhow::Result<()> {
    if !confirmed {
        ui.info("Progress kept");
        return Ok(());
    }
    NewsletterProgress::clear(root).context("failed to clear progress")?;
    ui.success("Progress cleared");
    ui.newline();
    create(
        root,
        ui,
        &WriteArgs {
            resume: false,
            ..args.clone()
        },
    )
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

fn create(root: &Path, ui: &Ui, args: &WriteArgs) -> anyhow::Result<()> {
    let mode = match args.mode {
        Some(m) => m,
        None => {
            let choices: Vec<(String, CreationMode)> = CreationMode::all()
                .iter()
                .map(|m| (m.label().to_string(), *m))
                .collect();
            ui.select("Writing mode", &choices, None, "--mode")?
        }
    };
    ui.newline();

    match mode {
        CreationMode::Create => create_mode(ui),
        CreationMode::Import => import_mode(ui, args.source.as_deref())?,
        CreationMode::Assisted => assisted_mode(root, ui, args.topic.as_deref())?,
    }
    Ok(())
}

fn create_mode(ui: &Ui) {
    ui.subtitle("Write from scratch");
    ui.newline();
    ui.info("In this mode the assistant will:");
    ui.list(&[
        "suggest an outline from your research",
        "guide you section by section",
        "offer writing feedback as you go",
        "save progress so you can stop and resume",
    ]);

    ui.newline();
    ui.subtitle("Next:");
    ui.info("1. Run /write in your AI assistant");
    ui.info("2. Pick a topic from your validated ideas");
    ui.info("3. Load research from the knowledge base");
    ui.info("4. Accept or edit the suggested outline");
    ui.info("5. Write one section at a time");

    ui.newline();
    ui.boxed(
        None,
        "The /write command is defined in .claude/commands/write.md\nand can be used directly from your assistant.",
        Tone::Info,
    );
}

fn import_mode(ui: &Ui, source: Option<&str>) -> anyhow::Result<()> {
    ui.subtitle("Import existing content");
    ui.newline();

    let (kind, location) = match source {
        Some(s) => {
            let kind = classify_source(s);
            validate_source(kind, s)?;
            (kind, s.to_string())
        }
        None => {
            let choices = [
                ("Markdown file".to_string(), ImportSource::Markdown),
                ("PDF document".to_string(), ImportSource::Pdf),
                ("Web page URL".to_string(), ImportSource::Url),
            ];
            let kind = ui.select("Import from", &choices, None, "--source")?;
            let prompt = match kind {
                ImportSource::Markdown => "Markdown file path",
                ImportSource::Pdf => "PDF file path",
                ImportSource::Url => "Page URL",
            };
            let location = ui.input(prompt, None, "--source")?;
            validate_source(kind, &location)?;
            (kind, location)
        }
    };

    let label = match kind {
        ImportSource::Markdown => "Markdown",
        ImportSource::Pdf => "PDF",
        ImportSource::Url => "URL",
    };
    ui.info(&format!("Will import ({label}): {location}"));

    ui.newline();
    ui.subtitle("Next:");
    ui.info("Run /write in your AI assistant and choose import mode");
    ui.info("The assistant parses and converts the content for you");
    Ok(())
}

fn assisted_mode(root: &Path, ui: &Ui, topic: Option<&str>) -> anyhow::Result<()> {
    ui.subtitle("AI-assisted draft");
    ui.newline();
    ui.info("In this mode the assistant will:");
    ui.list(&[
        "draft the whole newsletter from your topic and research",
        "include an outline and every section",
        "let you review and edit section by section",
        "iterate over several rounds",
    ]);

    ui.newline();
    ui.warning("This mode works best with solid research material");

    if !has_research(root, topic)? {
        ui.newline();
        ui.boxed(
            None,
            "Run viralfy research first.\nDrafts are much better with a knowledge base to draw on.",
            Tone::Warning,
        );
    }

    ui.newline();
    ui.subtitle("Next:");
    ui.info("Run /write in your AI assistant and choose assisted mode");
    Ok(())
}

fn has_research(root: &Path, topic: Option<&str>) -> anyhow::Result<bool> {
    Ok(match topic {
        Some(id) => knowledge::load(root, id)?.is_some(),
        None => !knowledge::list(root)?.is_empty(),
    })
}

fn classify_source(source: &str) -> ImportSource {
    if is_web_url(source) {
        return ImportSource::Url;
    }
    let lower = source.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        ImportSource::Pdf
    } else {
        ImportSource::Markdown
    }
}

fn is_web_url(s: &str) -> bool {
    url::Url::parse(s)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

fn validate_source(kind: ImportSource, source: &str) -> anyhow::Result<()> {
    if source.trim().is_empty() {
        bail!("import source must not be empty");
    }
    if kind == ImportSource::Url && !is_web_url(source) {
        bail!("'{source}' is not a valid http(s) URL");
    }
    Ok(())
}
