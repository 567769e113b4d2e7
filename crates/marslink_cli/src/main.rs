//! Terminal host for the Marslink feed.
//!
//! # Responsibility
//! - Render feed rows as text so the core can be exercised without a UI.
//! - Drive the rover link either on the wall clock or instantly.

use clap::Parser;
use marslink_core::{
    default_log_level, init_logging, FeedConfig, FeedDiff, FeedRow, FeedSession, JournalLoader,
    Pathfinder, RenderedCell, WeatherScanner,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "marslink")]
#[command(about = "Render the Marslink feed in the terminal")]
struct Cli {
    /// Container width used for cell sizing
    #[arg(short, long, default_value_t = marslink_core::config::DEFAULT_CONTAINER_WIDTH)]
    width: f64,

    /// JSON journal file (array of {"date": <epoch ms>, "text": ...})
    #[arg(short, long)]
    journal: Option<PathBuf>,

    /// Play the transmission on the wall clock instead of instantly
    #[arg(long)]
    realtime: bool,

    /// Do not connect to the rover link
    #[arg(long)]
    offline: bool,

    /// Expand the weather section before rendering
    #[arg(long)]
    expand_weather: bool,

    /// Show cell sizes next to each row
    #[arg(long)]
    sizes: bool,

    /// Emit one JSON document per render instead of text
    #[arg(long)]
    json: bool,

    /// Absolute directory for rolling log files
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("marslink: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let config = FeedConfig::default().with_container_width(cli.width);
    let start = config.session_start_ms;
    let mut journal = JournalLoader::new();
    match cli.journal.as_deref() {
        Some(path) => {
            journal.load_file(path).map_err(|err| err.to_string())?;
        }
        None => journal.load_latest(start),
    }
    let mut session = FeedSession::with_sources(
        config,
        journal,
        WeatherScanner::new(start),
        Pathfinder::new(start),
    )
    .map_err(|err| err.to_string())?;

    if cli.expand_weather {
        expand_weather(&mut session);
    }
    render(cli, &session, None)?;

    if cli.offline || !session.connect() {
        return Ok(());
    }
    if !cli.json {
        println!("-- connecting to Pathfinder --");
    }
    while let Some(wait) = session.next_due_in() {
        if cli.realtime {
            std::thread::sleep(Duration::from_millis(wait));
        }
        if let Some(diff) = session.advance(wait) {
            render(cli, &session, Some(&diff))?;
        }
    }
    Ok(())
}

fn render(cli: &Cli, session: &FeedSession, diff: Option<&FeedDiff>) -> Result<(), String> {
    if cli.json {
        let document = serde_json::json!({
            "diff": diff,
            "rows": session.rows(),
        });
        let line = serde_json::to_string(&document).map_err(|err| err.to_string())?;
        println!("{line}");
        return Ok(());
    }
    if let Some(diff) = diff {
        println!("-- {} new transmission(s) --", diff.inserted.len());
    }
    print_feed(session, cli.sizes);
    Ok(())
}

fn expand_weather(session: &mut FeedSession) {
    let weather = session
        .sections()
        .iter()
        .position(|section| section.key().kind == marslink_core::ItemKind::Weather);
    if let Some(section) = weather {
        session.select(section, 0);
    }
}

fn print_feed(session: &FeedSession, sizes: bool) {
    let rows = session.rows();
    for (position, row) in rows.iter().enumerate() {
        let line = format_row(row);
        if sizes {
            println!("{line:<60} [{}x{}]", row.size.width, row.size.height);
        } else {
            println!("{line}");
        }
        let last_in_section = rows
            .get(position + 1)
            .is_none_or(|next| next.section != row.section);
        if last_in_section && row.section_insets.bottom > 0.0 {
            println!();
        }
    }
}

fn format_row(row: &FeedRow) -> String {
    match &row.cell {
        RenderedCell::JournalDate { text } => format!("== {text} =="),
        RenderedCell::JournalText { text } => format!("   {text}"),
        RenderedCell::WeatherSummary { expanded } => {
            let marker = if *expanded { "[-]" } else { "[+]" };
            format!("{} {marker}", row.cell.primary_text())
        }
        RenderedCell::WeatherDetail { title, detail } => format!("   {title:<8} {detail}"),
        RenderedCell::Message { text, author } => format!("<{author}> {text}"),
        RenderedCell::Empty => String::new(),
    }
}
