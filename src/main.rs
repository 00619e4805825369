//! LazyForum - A terminal-based user interface for browsing
//! Discourse-style forums by tag.
//!
//! Provides a tag selection dropdown backed by the forum's tag search
//! endpoint and an editor for the watched tags list, with selections
//! opening in the system browser.

mod api;
mod app;
mod config;
mod error;
mod events;
mod logging;
mod routing;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use api::ForumClient;
use app::{App, AppCommand};
use config::Config;
use error::AppError;
use events::{Event, EventHandler};
use routing::BrowserNavigator;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "lazyforum", version, about = "Browse Discourse-style forums by tag")]
struct Args {
    /// Forum base URL, overriding any configured profile
    #[arg(long)]
    url: Option<String>,

    /// Named profile from the config file
    #[arg(long)]
    profile: Option<String>,

    /// Start with the given tag selected
    #[arg(long)]
    tag: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;

    let args = Args::parse();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using default: {}", e);
        Config::default()
    });

    let base_url = resolve_base_url(&args, &config)?;
    info!(%base_url, "Connecting to forum");

    let client = ForumClient::new(&base_url)?;

    let mut app = App::new(&config, Box::new(BrowserNavigator::new(&base_url)));
    if let Some(tag) = args.tag {
        app.tag_drop_mut().set_tag_id(Some(tag));
    }

    // Startup validation doubles as the ranked-tag fetch; a forum we
    // cannot reach is not browsable, so failures abort with guidance.
    let site = match client.validate_connection().await {
        Ok(site) => site,
        Err(e) => {
            print_log_hint();
            anyhow::bail!(AppError::Api(e).user_message());
        }
    };
    app.set_site(&site);

    let event_handler = EventHandler::from_settings(&config.settings);

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, client, event_handler).await;
    restore_terminal(&mut terminal)?;

    persist_watched_tags(config, &app);

    logging::shutdown();

    if result.is_err() {
        print_log_hint();
    }
    result
}

/// Point the user at the log files after a failure.
fn print_log_hint() {
    if let Some(dir) = logging::log_directory() {
        eprintln!("Details may be in the logs under {}", dir.display());
    }
}

/// Pick the forum base URL from arguments and configuration.
fn resolve_base_url(args: &Args, config: &Config) -> anyhow::Result<String> {
    if let Some(url) = &args.url {
        return Ok(url.clone());
    }

    if let Some(name) = &args.profile {
        let profile = config
            .profile(name)
            .with_context(|| format!("Profile '{}' not found in config", name))?;
        return Ok(profile.url.clone());
    }

    if let Some(profile) = config.profiles.first() {
        return Ok(profile.url.clone());
    }

    anyhow::bail!(
        "No forum configured. Pass --url or add a profile to {}",
        Config::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "the config file".to_string())
    )
}

/// The main event loop.
///
/// Terminal events are read on a dedicated thread; search commands are
/// executed on spawned tasks, and both feed the same event channel.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: ForumClient,
    event_handler: EventHandler,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let term_tx = tx.clone();
    std::thread::spawn(move || {
        loop {
            match event_handler.next() {
                Ok(event) => {
                    if term_tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Terminal event error: {}", e);
                    break;
                }
            }
        }
    });

    let client = Arc::new(client);

    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;

        let Some(event) = rx.recv().await else {
            break;
        };

        if let Some(command) = app.update(event) {
            match command {
                AppCommand::Search { query, limit, seq } => {
                    let client = Arc::clone(&client);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        match client.search_tags(&query, limit).await {
                            Ok(results) => {
                                let _ = tx.send(Event::SearchResults { seq, results });
                            }
                            Err(e) => {
                                let err = AppError::Api(e);
                                if err.is_recoverable() {
                                    warn!(%query, "Tag search failed: {}", err);
                                } else {
                                    error!(%query, "Tag search failed: {}", err);
                                }
                                let _ = tx.send(Event::SearchFailed {
                                    seq,
                                    message: err.user_message(),
                                });
                            }
                        }
                    });
                }
            }
        }
    }

    Ok(())
}

/// Write the watched tags back to the config file when they changed.
fn persist_watched_tags(mut config: Config, app: &App) {
    let raw = app.watched_tags_raw();
    if config.settings.watched_tags == raw {
        return;
    }

    config.settings.watched_tags = raw;
    if let Err(e) = config.save() {
        warn!("Could not persist watched tags: {}", AppError::from(e).user_message());
    }
}

/// Put the terminal into raw mode on the alternate screen.
fn setup_terminal() -> error::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| AppError::terminal(format!("Failed to enter alternate screen: {}", e)))?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore the terminal to its normal state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> error::Result<()> {
    disable_raw_mode()
        .map_err(|e| AppError::terminal(format!("Failed to disable raw mode: {}", e)))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| AppError::terminal(format!("Failed to leave alternate screen: {}", e)))?;
    terminal.show_cursor()?;
    Ok(())
}
