mod api;
mod app;
mod config;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::ApiClient;
use app::App;
use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "vernac")]
#[command(version = "0.1.0")]
#[command(about = "A terminal client for the Vernacular Language Translator backend")]
struct Args {
    /// Ask a single question and print the answer (no TUI)
    #[arg(short, long)]
    ask: Option<String>,

    /// Route the question to the local LLM instead of cloud AI
    #[arg(short, long)]
    local: bool,

    /// Override the backend base URL (also settable via VLT_API_URL)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if args.local {
        config.local_llm = true;
    }

    // Handle CLI-only mode
    if let Some(question) = args.ask {
        return ask_once(&config, &question).await;
    }

    // Run TUI
    run_tui(&config).await
}

/// One-shot mode: send the question, print the answer, no terminal takeover.
async fn ask_once(config: &AppConfig, question: &str) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("{}", app::EMPTY_QUESTION_MSG);
    }

    let client = ApiClient::new(&config.base_url);
    let response = client.generate(question, config.local_llm).await?;

    println!("{}: {}", response.status, response.message);
    println!();
    println!("{}", response.data);
    Ok(())
}

async fn run_tui(config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        // Every printable key belongs to the question field,
                        // so quitting is Ctrl-only.
                        KeyCode::Char('c') | KeyCode::Char('q')
                            if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                        {
                            return Ok(())
                        }
                        _ => app.handle_key(key),
                    }
                }
            }
        }

        // Drain the in-flight request, advance the spinner
        app.tick();
    }
}
