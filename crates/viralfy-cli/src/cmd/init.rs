use crate::ui::{Tone, Ui};
use anyhow::{bail, Context};
use std::path::Path;
use viralfy_core::{
    config::ProjectConfig,
    project,
    script::ScriptRunner,
    types::{ContentField, Language, Platform},
};

#[derive(Debug, Default)]
pub struct InitArgs {
    pub name: Option<String>,
    pub field: Option<ContentField>,
    pub platforms: Vec<Platform>,
    pub language: Option<Language>,
    pub yes: bool,
}

pub fn run(start: &Path, runner: &ScriptRunner, ui: &Ui, args: InitArgs) -> anyhow::Result<()> {
    ui.title("Viralfy project setup");

    let existing = project::find_root(start);
    if let Some(root) = &existing {
        ui.info(&format!("Found an existing project at {}", root.display()));
        if !args.yes && !ui.confirm("Project is already initialized. Reconfigure it?", false)? {
            ui.info("Initialization cancelled");
            return Ok(());
        }
    }
    let target = existing.clone().unwrap_or_else(|| start.to_path_buf());

    // 1. Project name
    let default_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "newsletter".to_string());
    let project_name = match args.name {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        Some(_) => bail!("project name must not be empty"),
        None => ui.input("Project name", Some(&default_name), "--name")?,
    };

    // 2. Content field
    let field = match args.field {
        Some(f) => f,
        None => {
            let choices: Vec<(String, ContentField)> = ContentField::all()
                .iter()
                .map(|f| (format!("{} ({}) - {}", f.as_str(), f.key(), f.description()), *f))
                .collect();
            ui.select("Content field", &choices, None, "--field")?
        }
    };

    // 3. Target platforms
    let platforms = if args.platforms.is_empty() {
        let choices: Vec<(String, Platform, bool)> = Platform::all()
            .iter()
            .map(|p| {
                let (label, kind) = p.describe();
                (
                    format!("{label} - {kind}"),
                    *p,
                    Platform::default_selection().contains(p),
                )
            })
            .collect();
        ui.multi_select("Target platforms", &choices)?
    } else {
        args.platforms
    };
    if platforms.is_empty() {
        bail!("select at least one platform");
    }

    // 4. Content language
    let language = match args.language {
        Some(l) => l,
        None => {
            let choices: Vec<(String, Language)> = Language::all()
                .iter()
                .map(|l| (format!("{} ({})", l.label(), l.as_str()), *l))
                .collect();
            ui.select("Content language", &choices, Some(0), "--language")?
        }
    };

    let mut config = ProjectConfig::new(&project_name, field, platforms, language)?;
    if existing.is_some() {
        if let Ok(previous) = ProjectConfig::load(&target) {
            config.created_at = previous.created_at;
            config.default_style = previous.default_style;
        }
    }

    // 5. Scaffold via the init script, then persist the config
    ui.newline();
    ui.step("Creating project structure...");
    let response = runner
        .clone()
        .with_working_dir(&target)
        .execute("init", &[])
        .context("failed to create project structure")?;
    if response.is_error() {
        bail!(
            "failed to create project structure: {}",
            response.message.as_deref().unwrap_or("unknown error")
        );
    }
    config
        .save(&target)
        .context("failed to write .viralfy/config.json")?;
    ui.success("Project structure created");

    print_summary(ui, &config);
    Ok(())
}

fn print_summary(ui: &Ui, config: &ProjectConfig) {
    let platforms: Vec<&str> = config.platforms.iter().map(|p| p.as_str()).collect();
    ui.newline();
    ui.boxed(
        Some("Project configuration"),
        &format!(
            "Project:   {}\nField:     {}\nPlatforms: {}\nLanguage:  {}",
            config.project_name,
            config.field,
            platforms.join(", "),
            config.language
        ),
        Tone::Success,
    );

    ui.newline();
    ui.subtitle("Directory layout:");
    ui.list(&[
        ".viralfy/          - configuration",
        "ideas/             - validated topics",
        "research/          - research material",
        "newsletters/       - newsletter sources",
        "distribution/      - per-platform content",
        "swipe-files/       - reference posts and personas",
    ]);

    ui.newline();
    ui.subtitle("Next steps:");
    ui.list(&[
        "viralfy validate   - validate ideas from Twitter/YouTube",
        "viralfy research   - AI-assisted deep research",
        "viralfy write      - write the newsletter",
        "viralfy distribute - adapt for every platform",
    ]);

    ui.newline();
    ui.success("Initialization complete");
}
