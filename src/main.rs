//! DAP Note Helper
//!
//! A terminal wizard for writing DATA / ASSESSMENT / PLAN case notes.
//! Answers live only in memory; the finished note goes to the clipboard.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

use dapnote::application::{App, Wizard};
use dapnote::domain::AnswerRecord;
use dapnote::infrastructure::{
    ClipboardSink, DEFAULT_CONFIG_PATH, Settings, SystemClipboard, init_file_tracing,
    init_stderr_tracing,
};
use dapnote::presentation::{InputHandler, render_ui, template_listing};

#[derive(Parser)]
#[command(name = "dapnote", version, about = "Write DAP case notes step by step")]
struct Cli {
    /// Settings file (TOML); defaults apply when it does not exist
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render a note from a JSON answer file and print it
    Render {
        /// Template id (see `dapnote templates`)
        #[arg(long)]
        template: String,
        /// JSON object mapping field names to values
        #[arg(long)]
        answers: PathBuf,
        /// Also print quality checks; exit non-zero if any fail
        #[arg(long)]
        checks: bool,
    },
    /// List the available templates
    Templates,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Templates) => {
            println!("{}", template_listing());
            Ok(())
        }
        Some(Command::Render {
            template,
            answers,
            checks,
        }) => {
            init_stderr_tracing();
            render_from_file(&template, &answers, checks)
        }
        None => run_interactive(&cli.config),
    }
}

fn render_from_file(template: &str, answers: &Path, checks: bool) -> anyhow::Result<()> {
    let content = fs::read_to_string(answers)
        .with_context(|| format!("reading {}", answers.display()))?;
    let record: AnswerRecord = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", answers.display()))?;

    let mut wizard = Wizard::default();
    wizard.select_template_named(template)?;
    wizard.load_record(record)?;

    println!("{}", wizard.preview().unwrap_or_default());

    if checks {
        println!();
        for check in wizard.quality_checks() {
            let mark = if check.passed { "PASS" } else { "FAIL" };
            println!("[{mark}] {}", check.description);
        }
        if !wizard.can_copy() {
            bail!("quality checks failed");
        }
    }
    Ok(())
}

/// Sets up the terminal, runs the wizard, and restores the terminal on exit.
fn run_interactive(config_path: &Path) -> anyhow::Result<()> {
    let settings = Settings::load(config_path)
        .with_context(|| format!("loading settings from {}", config_path.display()))?;
    let start_template = settings.start_template()?;
    let _log_guard = init_file_tracing(Path::new(&settings.logging.folder), settings.logging.level)
        .context("setting up log output")?;
    tracing::info!("dapnote v{}", env!("CARGO_PKG_VERSION"));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings.ui.show_preview, start_template);
    let mut clipboard = SystemClipboard::new();
    let res = run_app(&mut terminal, &mut app, &mut clipboard);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        println!("{err:?}");
    }

    Ok(())
}

/// Main event loop; returns once the user quits.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    clipboard: &mut dyn ClipboardSink,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                InputHandler::handle_key_event(app, key.code, key.modifiers, clipboard);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
