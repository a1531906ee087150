use crate::output::print_json;
use crate::ui::Ui;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use viralfy_core::{
    config::ProjectConfig, distribution::DistributionJob, knowledge, persona,
    progress::NewsletterProgress, project, swipe::SwipePost, topics,
};

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
struct Counts {
    validated_topics: usize,
    knowledge_bases: usize,
    personas: usize,
    swipe_posts: usize,
    distribution_jobs: usize,
}

impl Counts {
    fn gather(root: &Path) -> Self {
        Counts {
            validated_topics: topics::load_validated(root).len(),
            knowledge_bases: knowledge::list(root).map(|v| v.len()).unwrap_or(0),
            personas: persona::list(root).map(|v| v.len()).unwrap_or(0),
            swipe_posts: SwipePost::list(root).map(|v| v.len()).unwrap_or(0),
            distribution_jobs: DistributionJob::list(root).map(|v| v.len()).unwrap_or(0),
        }
    }
}

pub fn run(start: &Path, ui: &Ui, json: bool) -> anyhow::Result<()> {
    let Some(root) = project::find_root(start) else {
        if json {
            print_json(&serde_json::json!({ "initialized": false }))?;
        } else {
            ui.error("Project not initialized");
            ui.newline();
            ui.info("Run `viralfy init` to get started");
        }
        return Ok(());
    };

    let config = ProjectConfig::load(&root).context("failed to load project configuration")?;
    let progress = NewsletterProgress::load(&root);
    let counts = Counts::gather(&root);

    if json {
        #[derive(Serialize)]
        struct ProgressSummary<'a> {
            #[serde(flatten)]
            record: &'a NewsletterProgress,
            completed: usize,
        }

        #[derive(Serialize)]
        struct StatusOutput<'a> {
            initialized: bool,
            root: String,
            config: &'a ProjectConfig,
            progress: Option<ProgressSummary<'a>>,
            counts: &'a Counts,
        }

        print_json(&StatusOutput {
            initialized: true,
            root: root.display().to_string(),
            config: &config,
            progress: progress.as_ref().map(|p| ProgressSummary {
                record: p,
                completed: p.completed_in_range().len(),
            }),
            counts: &counts,
        })?;
        return Ok(());
    }

    let platforms: Vec<&str> = config.platforms.iter().map(|p| p.as_str()).collect();

    ui.title("Project status");
    println!("Project:   {}", config.project_name);
    println!("Field:     {}", config.field);
    println!("Platforms: {}", platforms.join(", "));
    println!("Language:  {}", config.language);
    if let Some(style) = &config.default_style {
        println!("Style:     {style}");
    }
    ui.newline();

    match &progress {
        Some(p) => {
            println!("Newsletter: {}", p.newsletter_id);
            println!(
                "Progress:   {}/{} sections",
                p.completed_in_range().len(),
                p.total_sections
            );
            println!("Status:     {}", p.status);
            println!("Words:      {}", p.word_count);
        }
        None => ui.info("No newsletter in progress"),
    }
    ui.newline();

    ui.subtitle("Assets:");
    ui.list(&[
        format!("validated topics:  {}", counts.validated_topics),
        format!("knowledge bases:   {}", counts.knowledge_bases),
        format!("personas:          {}", counts.personas),
        format!("swipe posts:       {}", counts.swipe_posts),
        format!("distribution jobs: {}", counts.distribution_jobs),
    ]);
    ui.newline();
    Ok(())
}
