use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use tracing::info;

use luxwatch::config::{Overrides, Settings, DEFAULT_SECRETS_PATH};
use luxwatch::data::{export, Readings};
use luxwatch::ui::{self, Theme};
use luxwatch::{events, App, AppOptions, DataSource, FileSource, HttpSource, View};

#[derive(Parser, Debug)]
#[command(name = "luxwatch")]
#[command(about = "Terminal dashboard for light-sensor readings in a Firebase Realtime Database")]
struct Args {
    /// Database URL (overrides the secrets file and settings)
    #[arg(short, long)]
    url: Option<String>,

    /// Secrets file holding `[firebase] database_url`
    #[arg(long, default_value = DEFAULT_SECRETS_PATH)]
    secrets: PathBuf,

    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database path holding the readings
    #[arg(long)]
    path: Option<String>,

    /// Refresh interval in seconds (1-60)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Number of most recent readings to keep (10-500)
    #[arg(short, long)]
    max_points: Option<usize>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Start with auto refresh off (press r to poll, a to resume)
    #[arg(long)]
    no_auto_refresh: bool,

    /// Show the skipped-entry list and write debug logs to the log file
    #[arg(long)]
    debug: bool,

    /// Log file used with --debug
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Replay a JSON export of the database instead of polling the network
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Poll once, print the summary and exit
    #[arg(long, conflicts_with = "export")]
    once: bool,

    /// Poll once, write readings to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            database_url: self.url.clone(),
            data_path: self.path.clone(),
            refresh_interval_secs: self.refresh,
            max_data_points: self.max_points,
            timeout_secs: self.timeout,
            no_auto_refresh: self.no_auto_refresh,
            debug: self.debug,
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(&args.secrets, args.config.as_deref())?.apply(args.overrides());
    settings.validate()?;

    if settings.debug {
        init_logging(&settings.log_file)?;
    }

    let source = build_source(args.file.as_deref(), &settings)?;
    info!(source = source.description(), "starting");

    // Handle headless modes (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(source, &settings, export_path);
    }
    if args.once {
        return print_once(source, &settings);
    }

    run_tui(source, &settings)
}

/// Send tracing output to a file; the terminal belongs to the TUI.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();
    info!("luxwatch debug log started, tail -f {}", path.display());
    Ok(())
}

fn build_source(file: Option<&Path>, settings: &Settings) -> Result<Box<dyn DataSource>> {
    match file {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(HttpSource::firebase(
            &settings.database_url,
            &settings.data_path,
            settings.timeout(),
        )?)),
    }
}

fn poll_once(mut source: Box<dyn DataSource>, settings: &Settings) -> Readings {
    let outcome = source.fetch();
    Readings::from_outcome(&outcome, settings.max_data_points)
}

/// Print one summary to stdout
fn print_once(source: Box<dyn DataSource>, settings: &Settings) -> Result<()> {
    let readings = poll_once(source, settings);
    print!("{}", export::summary_text(&readings));
    Ok(())
}

/// Export one poll cycle to a JSON file
fn export_to_file(source: Box<dyn DataSource>, settings: &Settings, path: &Path) -> Result<()> {
    let readings = poll_once(source, settings);
    export::write_json(&readings, path)?;
    println!("Exported readings to: {}", path.display());
    Ok(())
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, settings: &Settings) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let options = AppOptions::from_settings(settings, Theme::auto_detect());
    let mut app = App::new(source, options);

    let result = run_app(&mut terminal, &mut app);

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

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = Paragraph::new(msg)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                    .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Dashboard => ui::dashboard::render(frame, app, chunks[2]),
                View::Table => ui::table::render(frame, app, chunks[2]),
                View::Diagnostics => ui::diagnostics::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // The fetch blocks for at most the request timeout; the next poll
        // is scheduled from when this one finished.
        if app.poll_due(Instant::now()) {
            app.reload_data();
            continue;
        }

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}
