//! rfview: Terminal Rfam alignment report viewer.
//!
//! Interactively filter a family alignment by bit score against the
//! gathering threshold, collapse gap-only columns, and color conserved
//! nucleotide positions.

mod app;
mod color;
mod config;
mod engine;
mod input;
mod report;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind,
        },
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};

use app::{App, TerminalTheme};
use config::Config;

/// Terminal Rfam alignment report viewer.
#[derive(Parser, Debug)]
#[command(name = "rfview")]
#[command(author, version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Args {
    /// Alignment file in Stockholm format (.gz supported).
    #[arg(value_name = "ALIGN")]
    align: Option<PathBuf>,

    /// Outlist file mapping sequence names to bit scores.
    #[arg(short, long, value_name = "FILE")]
    outlist: Option<PathBuf>,

    /// Initial bit-score threshold (default from config, then 25).
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Start with conservation coloring enabled.
    #[arg(long)]
    conservation: bool,

    /// Start with nucleotide highlighting enabled.
    #[arg(long)]
    highlight: bool,
}

const AFTER_HELP: &str = "\
INTERACTIVE COMMANDS:
  Press ':' to enter command mode, then type a command and press Enter.
  Press '?' for the interactive help overlay.

FILTERING:
  + / -           Raise / lower the threshold by one bit
  r / :reset      Reset to the default gathering threshold
  :threshold N    Set the threshold to N bits
  Mouse click     Clicking a bit score refilters at that score

COLORING:
  :conservation   Color positions by nucleotide conservation (80/60/40%)
  :plain          Clear conservation coloring
  :highlight      Toggle per-nucleotide foreground colors
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let (config, _config_loaded) = Config::load();

    let threshold = args.threshold.unwrap_or(config.threshold);
    let mut app = App::new(threshold, config.theme);

    // An invalid alignment (ragged rows, bad header) is fatal before the
    // terminal is touched; no partial matrix is ever displayed.
    if let Some(path) = &args.align {
        app.load_report(path, args.outlist.as_deref())
            .map_err(|e| format!("{}: {e}", path.display()))?;
        if args.conservation {
            app.show_conservation(threshold);
        }
        if args.highlight {
            app.toggle_nucleotide_highlight();
        }
        app.clear_status();
    }

    // Detect terminal theme before entering raw mode
    app.terminal_theme = detect_terminal_theme();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        let area = ratatui::layout::Rect::new(0, 0, size.width, size.height);
        let page_size = ui::page_size(area);

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key, page_size),
                // Clicking a row's bit score refilters at that score,
                // like clicking a score cell in the HTML report.
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                        && let Some(score) = ui::score_at(app, area, mouse.column, mouse.row)
                    {
                        app.apply_threshold(score);
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Detect terminal background theme using termbg.
fn detect_terminal_theme() -> TerminalTheme {
    // termbg needs a timeout for terminals that don't respond
    let timeout = std::time::Duration::from_millis(100);

    match termbg::theme(timeout) {
        Ok(termbg::Theme::Light) => TerminalTheme::Light,
        Ok(termbg::Theme::Dark) => TerminalTheme::Dark,
        Err(_) => TerminalTheme::Dark, // Default to dark on detection failure
    }
}
