use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::path::PathBuf;

use mapsearch::config::{self, Config, ConfigResult};
use mapsearch::history::{FileStore, HistoryStore, MemoryStore};
use mapsearch::location::{ConfiguredLocation, LocationProvider, NoLocation, resolve_bias};
use mapsearch::places::worker::spawn_worker;
use mapsearch::{App, MapSearchError};

/// Search places with autocomplete and show them on a map
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Search places with autocomplete, recent searches and a terminal map"
)]
struct Args {
    /// Config file (default: ~/.config/mapsearch/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep recent searches in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Don't use the configured location to bias results
    #[arg(long)]
    no_location: bool,
}

fn main() -> Result<()> {
    // Writes to /tmp/mapsearch-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    init_debug_log();

    color_eyre::install()?;

    let args = Args::parse();

    if let Some(path) = &args.config
        && !path.exists()
    {
        return Err(MapSearchError::ConfigNotFound(path.clone()).into());
    }
    let config_result = config::load_config(args.config.as_deref());

    let (history, history_warning) = open_history(args.ephemeral);

    let mut location: Box<dyn LocationProvider> = if args.no_location {
        Box::new(NoLocation)
    } else {
        Box::new(ConfiguredLocation::new(config_result.config.location.clone()))
    };
    let device_location = resolve_bias(location.as_mut());

    let terminal = init_terminal()?;

    let mut app = App::new(history, &config_result.config, device_location);
    if let Some(warning) = history_warning {
        app.notification.show_warning(&warning);
    }

    let result = run(terminal, app, config_result);

    restore_terminal()?;
    result?;

    #[cfg(debug_assertions)]
    log::debug!("=== MAPSEARCH DEBUG SESSION ENDED ===");

    Ok(())
}

#[cfg(debug_assertions)]
fn init_debug_log() {
    use std::io::Write;

    let log_file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/mapsearch-debug.log")
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open /tmp/mapsearch-debug.log: {}", e);
            return;
        }
    };

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    log::debug!("=== MAPSEARCH DEBUG SESSION STARTED ===");
}

/// Open the persistent history store, falling back to memory when there is
/// nowhere to put it. The second value is a warning for the user.
fn open_history(ephemeral: bool) -> (HistoryStore, Option<String>) {
    if ephemeral {
        return (HistoryStore::new(Box::new(MemoryStore::new())), None);
    }

    match FileStore::default_location().map_err(MapSearchError::from) {
        Ok(store) => (HistoryStore::new(Box::new(store)), None),
        Err(e) => {
            log::warn!("{}", e);
            (
                HistoryStore::new(Box::new(MemoryStore::new())),
                Some(format!("{}; not saving them", e)),
            )
        }
    }
}

/// Initialize terminal with raw mode, alternate screen, and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App, config_result: ConfigResult) -> Result<()> {
    if let Some(warning) = config_result.warning {
        app.notification.show_warning(&warning);
    }

    setup_places_worker(&mut app, &config_result.config);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Set up the places worker thread and channels
fn setup_places_worker(app: &mut App, config: &Config) {
    if !config.places.is_configured() && app.notification.current().is_none() {
        app.notification
            .show_warning("Places API key not configured. Add [places] api_key to config.");
    }

    // An unconfigured worker answers every request with NotConfigured
    let (request_tx, request_rx) = tokio::sync::mpsc::unbounded_channel();
    let (response_tx, response_rx) = std::sync::mpsc::channel();
    app.set_places_channels(request_tx, response_rx);

    spawn_worker(&config.places, request_rx, response_tx);
}
