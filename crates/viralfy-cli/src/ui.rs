//! Console rendering and interactive prompts.
//!
//! One `Ui` is built in `main` and handed to each command. When stdin or
//! stdout is not a terminal, prompts resolve to their defaults; a prompt
//! without a default fails and names the flag that supplies the value.

use std::io::IsTerminal;

use anyhow::bail;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
}

pub struct Ui {
    interactive: bool,
    theme: ColorfulTheme,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal() && std::io::stdout().is_terminal(),
            theme: ColorfulTheme::default(),
        }
    }

    /// A `Ui` that never prompts, whatever the terminal.
    #[cfg(test)]
    pub fn headless() -> Self {
        Self {
            interactive: false,
            theme: ColorfulTheme::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    pub fn title(&self, text: &str) {
        println!();
        println!("{}", text.cyan().bold());
        println!("{}", "─".repeat(50).dimmed());
        println!();
    }

    pub fn subtitle(&self, text: &str) {
        println!("{}", text.bold());
    }

    pub fn info(&self, text: &str) {
        println!("{} {}", "ℹ".blue(), text);
    }

    pub fn step(&self, text: &str) {
        println!("{} {}", "→".blue().bold(), text);
    }

    pub fn success(&self, text: &str) {
        println!("{} {}", "✓".green().bold(), text);
    }

    pub fn warning(&self, text: &str) {
        println!("{} {}", "⚠".yellow().bold(), text.yellow());
    }

    pub fn error(&self, text: &str) {
        eprintln!("{} {}", "✗".red().bold(), text.red());
    }

    pub fn list<S: AsRef<str>>(&self, items: &[S]) {
        for item in items {
            println!("  {} {}", "•".dimmed(), item.as_ref());
        }
    }

    pub fn newline(&self) {
        println!();
    }

    /// Print `body` inside a rounded frame.
    pub fn boxed(&self, title: Option<&str>, body: &str, tone: Tone) {
        let lines: Vec<&str> = body.lines().collect();
        let title_width = title.map(|t| t.chars().count() + 2).unwrap_or(0);
        let width = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(title_width);

        let paint = |s: String| match tone {
            Tone::Info => s.blue(),
            Tone::Success => s.green(),
            Tone::Warning => s.yellow(),
        };

        let top = match title {
            Some(t) => format!(
                "╭─ {} {}╮",
                t,
                "─".repeat(width.saturating_sub(t.chars().count() + 1))
            ),
            None => format!("╭{}╮", "─".repeat(width + 2)),
        };
        println!("{}", paint(top));
        for line in &lines {
            let pad = width - line.chars().count();
            println!("{} {}{} {}", paint("│".into()), line, " ".repeat(pad), paint("│".into()));
        }
        println!("{}", paint(format!("╰{}╯", "─".repeat(width + 2))));
    }

    // -----------------------------------------------------------------------
    // Prompts
    // -----------------------------------------------------------------------

    /// Free-text input. Blank answers are re-asked.
    pub fn input(&self, prompt: &str, default: Option<&str>, flag: &str) -> anyhow::Result<String> {
        if !self.interactive {
            return match default {
                Some(d) => Ok(d.to_string()),
                None => bail!("'{prompt}' needs an interactive terminal; pass {flag}"),
            };
        }
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(d) = default {
            input = input.default(d.to_string());
        }
        let value = input
            .validate_with(|s: &String| -> Result<(), &str> {
                if s.trim().is_empty() {
                    Err("a value is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    /// Pick one of `choices` (label, value).
    pub fn select<T: Copy>(
        &self,
        prompt: &str,
        choices: &[(String, T)],
        default: Option<usize>,
        flag: &str,
    ) -> anyhow::Result<T> {
        if !self.interactive {
            return match default.and_then(|i| choices.get(i)) {
                Some((_, value)) => Ok(*value),
                None => bail!("'{prompt}' needs an interactive terminal; pass {flag}"),
            };
        }
        let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(default.unwrap_or(0))
            .interact()?;
        match choices.get(index) {
            Some((_, value)) => Ok(*value),
            None => bail!("invalid selection"),
        }
    }

    /// Pick any subset of `choices` (label, value, pre-checked).
    pub fn multi_select<T: Copy>(&self, prompt: &str, choices: &[(String, T, bool)]) -> anyhow::Result<Vec<T>> {
        if !self.interactive {
            return Ok(choices
                .iter()
                .filter(|(_, _, checked)| *checked)
                .map(|(_, value, _)| *value)
                .collect());
        }
        let items: Vec<(&str, bool)> = choices
            .iter()
            .map(|(label, _, checked)| (label.as_str(), *checked))
            .collect();
        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(format!("{prompt} (space to toggle, enter to confirm)"))
            .items_checked(&items)
            .interact()?;
        Ok(picked
            .into_iter()
            .filter_map(|i| choices.get(i).map(|(_, value, _)| *value))
            .collect())
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> anyhow::Result<bool> {
        if !self.interactive {
            return Ok(default);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}
