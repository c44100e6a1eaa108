use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use howl::config::{Cli, Command, Config};
use howl::controller::AppController;
use howl::engine::{build_engine, SilentEngine};
use howl::library::{LocalRepository, SongsRepository};
use howl::logging;
use howl::model::AppModel;
use howl::source::{MusicSource, MISSING_FIELD};
use howl::view::{format_duration, AppView};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    let _log_guard = match logging::init_logging(&config.log_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!(
        music_dir = %config.music_dir.display(),
        data_dir = %config.data_dir.display(),
        audio = config.audio_enabled,
        "=== howl starting ==="
    );

    let repository: Arc<dyn SongsRepository> = Arc::new(
        LocalRepository::open(config.store_path(), &config.music_dir)
            .with_context(|| format!("opening song store {}", config.store_path().display()))?,
    );

    match cli.command {
        Some(Command::Scan) => scan(&config, repository).await,
        Some(Command::List) => list(repository).await,
        None => run_tui(&config, repository).await,
    }
}

/// `howl scan`: bring the stored library in step with the music folder
async fn scan(config: &Config, repository: Arc<dyn SongsRepository>) -> Result<()> {
    let model = Arc::new(Mutex::new(AppModel::new()));
    let controller = AppController::new(model, Box::new(SilentEngine::new()), repository);

    let summary = controller.sync_repository().await?;
    if summary.found_media {
        println!("{} songs in library ({})", summary.songs, config.music_dir.display());
    } else {
        println!("No audio files found in {}", config.music_dir.display());
    }
    Ok(())
}

/// `howl list`: print what a music source would serve
async fn list(repository: Arc<dyn SongsRepository>) -> Result<()> {
    let source = MusicSource::new(repository);
    source.load().await;

    if !source.ready().await {
        anyhow::bail!(
            "library could not be loaded: {}",
            source.last_error().unwrap_or_else(|| "unknown error".to_string())
        );
    }

    let durations: Vec<u64> = source.songs().iter().map(|s| s.duration_ms).collect();
    for (item, duration_ms) in source.as_browsable_items().iter().zip(durations) {
        let id = if item.media_id == MISSING_FIELD { "-" } else { item.media_id.as_str() };
        println!("{}  {:>6}  {} - {}", id, format_duration(duration_ms), item.subtitle, item.title);
    }
    println!("{} songs", source.len());
    Ok(())
}

async fn run_tui(config: &Config, repository: Arc<dyn SongsRepository>) -> Result<()> {
    let engine = build_engine(config.audio_enabled);
    tracing::info!(engine = engine.name(), "Playback engine ready");

    let model = Arc::new(Mutex::new(AppModel::new()));
    let controller = AppController::new(model.clone(), engine, repository);

    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.start_library().await;
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("howl shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        controller.update_progress().await;

        let (player, ui_state, content_state, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_player_view().await,
                model_guard.get_ui_state().await,
                model_guard.get_content_state().await,
                model_guard.should_quit().await,
            )
        };

        if should_quit {
            break;
        }

        terminal.draw(|f| {
            AppView::render(f, &player, &ui_state, &content_state);
        })?;

        // Short poll keeps the progress bar and clock moving
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
