mod cmd;
mod output;
mod root;
mod ui;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::{guide::AssistantCommand, init::InitArgs, write::WriteArgs};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use viralfy_core::{
    script::ScriptRunner,
    types::{ContentField, CreationMode, Language, Platform},
};

#[derive(Parser)]
#[command(
    name = "viralfy",
    about = "AI-driven viral content workflow: from idea validation to multi-platform distribution",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory to start project discovery from (default: current directory)
    #[arg(long, global = true, env = "VIRALFY_ROOT")]
    root: Option<PathBuf>,

    /// Directory holding the bash/ and powershell/ script trees
    #[arg(long, global = true, env = "VIRALFY_SCRIPTS_DIR")]
    scripts_dir: Option<PathBuf>,

    /// Kill external scripts that run longer than this many seconds
    #[arg(long, global = true, env = "VIRALFY_SCRIPT_TIMEOUT")]
    script_timeout: Option<u64>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new content project
    Init {
        /// Project name (default: directory name)
        #[arg(long)]
        name: Option<String>,

        /// Content field, by label or key (e.g. technology)
        #[arg(long)]
        field: Option<ContentField>,

        /// Target platforms, comma separated (e.g. wechat,twitter)
        #[arg(long, value_delimiter = ',')]
        platforms: Vec<Platform>,

        /// Content language: zh-CN, en-US or bilingual
        #[arg(long)]
        language: Option<Language>,

        /// Reconfigure an existing project without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Write newsletter content
    Write {
        /// Creation mode: create, import or assisted
        #[arg(long, short = 'm')]
        mode: Option<CreationMode>,

        /// Validated topic id to write about
        #[arg(long, short = 't')]
        topic: Option<String>,

        /// Continue unfinished work without asking
        #[arg(long, short = 'r')]
        resume: bool,

        /// Import source for import mode: Markdown path, PDF path or URL
        #[arg(long)]
        source: Option<String>,
    },

    /// Show project configuration and progress
    Status,

    /// Validate Twitter/YouTube ideas (runs /validate in the AI assistant)
    Validate,

    /// Deep research on a topic (runs /research in the AI assistant)
    Research,

    /// Distribute a newsletter to several platforms (runs /distribute in the AI assistant)
    Distribute,

    /// Analyze the structure of viral content (runs /analyze in the AI assistant)
    Analyze,

    /// Train a writing persona (runs /style in the AI assistant)
    Style,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        print_welcome();
        // Printing help only fails when stdout is gone.
        let _ = Cli::command().print_help();
        return;
    };

    let start = root::resolve_start(cli.root.as_deref());
    let scripts_dir = root::resolve_scripts_dir(cli.scripts_dir.as_deref());
    let runner = ScriptRunner::new(scripts_dir)
        .with_working_dir(&start)
        .with_timeout(cli.script_timeout.map(Duration::from_secs));
    let ui = ui::Ui::new();

    let result = match command {
        Commands::Init {
            name,
            field,
            platforms,
            language,
            yes,
        } => cmd::init::run(
            &start,
            &runner,
            &ui,
            InitArgs {
                name,
                field,
                platforms,
                language,
                yes,
            },
        ),
        Commands::Write {
            mode,
            topic,
            resume,
            source,
        } => cmd::write::run(
            &start,
            &runner,
            &ui,
            WriteArgs {
                mode,
                topic,
                source,
                resume,
            },
        ),
        Commands::Status => cmd::status::run(&start, &ui, cli.json),
        Commands::Validate => cmd::guide::run(&ui, AssistantCommand::Validate),
        Commands::Research => cmd::guide::run(&ui, AssistantCommand::Research),
        Commands::Distribute => cmd::guide::run(&ui, AssistantCommand::Distribute),
        Commands::Analyze => cmd::guide::run(&ui, AssistantCommand::Analyze),
        Commands::Style => cmd::guide::run(&ui, AssistantCommand::Style),
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", "error:".red());
        std::process::exit(1);
    }
}

fn print_welcome() {
    let bar = "═".repeat(48);
    println!();
    println!("{}", format!("╔{bar}╗").cyan().bold());
    println!("  {}", "Viralfy".white().bold());
    println!("  {}", "AI-driven viral content ecosystem".dimmed());
    println!("{}", format!("╚{bar}╝").cyan().bold());
    println!();
}
