//! Commands whose work happens inside the AI assistant. They only tell the
//! user which slash command to run there.

use crate::ui::Ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantCommand {
    Validate,
    Research,
    Distribute,
    Analyze,
    Style,
}

impl AssistantCommand {
    pub fn slash(self) -> &'static str {
        match self {
            AssistantCommand::Validate => "/validate",
            AssistantCommand::Research => "/research",
            AssistantCommand::Distribute => "/distribute",
            AssistantCommand::Analyze => "/analyze",
            AssistantCommand::Style => "/style",
        }
    }

    pub fn steps(self) -> [&'static str; 3] {
        match self {
            AssistantCommand::Validate => [
                "run the status script",
                "show the interactive topic picker",
                "validate ideas against Twitter/YouTube signals",
            ],
            AssistantCommand::Research => [
                "run the status script",
                "let you pick a validated topic",
                "run deep research and build its knowledge base",
            ],
            AssistantCommand::Distribute => [
                "run the script that lists newsletters",
                "let you pick target platforms",
                "adapt and distribute to each platform",
            ],
            AssistantCommand::Analyze => [
                "ask for the URL to analyze",
                "break down the content structure",
                "produce a reusable template",
            ],
            AssistantCommand::Style => [
                "collect author information",
                "gather representative writing",
                "generate a persona profile",
            ],
        }
    }
}

pub fn run(ui: &Ui, command: AssistantCommand) -> anyhow::Result<()> {
    ui.info(&format!("Run {} in your AI assistant", command.slash()));
    ui.newline();
    ui.subtitle("The assistant will:");
    for (i, step) in command.steps().iter().enumerate() {
        ui.info(&format!("  {}. {step}", i + 1));
    }
    Ok(())
}
