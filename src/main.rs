use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use freddiebear::export::{self, Exporter};
use freddiebear::{
    Config, ConfigError, Database, ExportError, JournalError, JournalTag, alfred, dates, graph,
    journal, transcript,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// freddiebear - search, link, and export notes from a launcher
#[derive(Parser)]
#[command(name = "freddiebear")]
#[command(about = "A CLI for a launcher and note-taking app integration")]
#[command(version)]
struct Cli {
    /// Path to the note database (overrides FREDDIEBEAR_DB)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Search for a note
    Search(SearchCommand),
    /// Daily journal helper: print today's note id, or <title>,<tag>
    Journal(JournalCommand),
    /// Export notes to Markdown files
    Export(ExportCommand),
    /// List exported files whose note no longer exists
    Cleanup(CleanupCommand),
    /// Show backlinks for notes matching a search term
    Backlinks(LinkCommand),
    /// Show forward links for notes matching a search term
    Forwardlinks(LinkCommand),
    /// Generate a DOT graph of the links between notes
    Graph(GraphCommand),
    /// List all tags in the launcher's JSON format
    Tags,
    /// List all titles in the launcher's JSON format
    Titles(TitlesCommand),
    /// Create a date-based transcript for a tag
    Transcript(TranscriptCommand),
    /// Print the version number
    Version,
}

#[derive(Args)]
struct SearchCommand {
    /// Text to look for
    #[arg(value_name = "TERM")]
    term: String,

    /// Search note bodies too (default: titles only)
    #[arg(long)]
    all: bool,

    /// Show tags instead of "Open note" as the subtitle
    #[arg(long)]
    tags: bool,
}

#[derive(Args)]
struct JournalCommand {
    /// Tag to add to a new journal entry
    #[arg(long, value_name = "TAG")]
    tag: Option<String>,

    /// Append the date (/yyyy/mm) to the tag
    #[arg(long)]
    date: bool,
}

#[derive(Args)]
struct ExportCommand {
    /// Directory to export into
    #[arg(value_name = "DESTINATION")]
    destination: PathBuf,

    /// List files to export, but don't create them
    #[arg(long)]
    list: bool,

    /// Move exports of deleted notes into this directory
    #[arg(long, value_name = "DIR")]
    trash: Option<PathBuf>,
}

#[derive(Args)]
struct CleanupCommand {
    /// Directory holding a previous export
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Move the files into this directory instead of listing them
    #[arg(long, value_name = "DIR")]
    trash: Option<PathBuf>,
}

#[derive(Args)]
struct LinkCommand {
    /// Text the note title must contain
    #[arg(value_name = "TERM")]
    term: String,
}

#[derive(Args)]
struct GraphCommand {
    /// Only draw links where either title contains this text
    #[arg(value_name = "TERM")]
    term: Option<String>,
}

#[derive(Args)]
struct TitlesCommand {
    /// Pass the export filename as the arg (default: note id)
    #[arg(long)]
    filename_as_arg: bool,

    /// Skip notes with a tag containing this text (repeatable)
    #[arg(long, value_name = "TAG")]
    exclude_tag: Vec<String>,
}

#[derive(Args)]
struct TranscriptCommand {
    /// Tag to collect, with or without the leading #
    #[arg(value_name = "TAG")]
    tag: String,
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Routes diagnostics to stderr; stdout belongs to the launcher.
fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "freddiebear=warn",
        1 => "freddiebear=info",
        _ => "freddiebear=debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors are a missing database, a bad export directory, or an
/// ambiguous journal. Everything else is reported as internal.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause.is::<ConfigError>() || cause.is::<ExportError>() || cause.is::<JournalError>()
    })
}

fn run(cli: &Cli) -> Result<()> {
    if let Commands::Version = cli.command {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let db = open_database(cli.db.clone())?;

    match &cli.command {
        Commands::Search(cmd) => handle_search(&db, cmd),
        Commands::Journal(cmd) => handle_journal(&db, cmd),
        Commands::Export(cmd) => handle_export(&db, cmd),
        Commands::Cleanup(cmd) => handle_cleanup(&db, cmd),
        Commands::Backlinks(cmd) => handle_backlinks(&db, cmd),
        Commands::Forwardlinks(cmd) => handle_forwardlinks(&db, cmd),
        Commands::Graph(cmd) => handle_graph(&db, cmd),
        Commands::Tags => handle_tags(&db),
        Commands::Titles(cmd) => handle_titles(&db, cmd),
        Commands::Transcript(cmd) => handle_transcript(&db, cmd),
        Commands::Version => Ok(()),
    }
}

fn open_database(db_override: Option<PathBuf>) -> Result<Database> {
    let config = Config::resolve(db_override)?;
    let path = config.ensure_database_exists()?;
    Database::open(path).context("Failed to open note database")
}

fn handle_search(db: &Database, cmd: &SearchCommand) -> Result<()> {
    let results = if cmd.all {
        db.query_text(&cmd.term)?
    } else {
        db.query_titles(&cmd.term, false)?
    };

    if results.is_empty() {
        print!("{}", alfred::create_item(&cmd.term));
    } else {
        print!("{}", alfred::open_items(&results, cmd.tags));
    }
    Ok(())
}

fn handle_journal(db: &Database, cmd: &JournalCommand) -> Result<()> {
    let tag = JournalTag {
        name: cmd.tag.clone(),
        append_date: cmd.date,
    };
    let entry = journal::journal_entry(db, &tag, dates::now_local())?;
    print!("{entry}");
    Ok(())
}

fn handle_export(db: &Database, cmd: &ExportCommand) -> Result<()> {
    if cmd.list {
        for path in export_targets(db, &cmd.destination)? {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let mut exporter = Exporter::new(&cmd.destination)?;
    let mut live = HashSet::new();

    db.export(|record| {
        live.insert(record.short_id.clone());
        exporter.write(record).map(|_| ())
    })?;

    if let Some(trash) = &cmd.trash {
        exporter.archive(&live, trash)?;
    }

    let summary = exporter.summary();
    info!(
        directory = %exporter.directory().display(),
        written = summary.written,
        renamed = summary.renamed,
        unchanged = summary.unchanged,
        archived = summary.archived,
        "export finished"
    );
    Ok(())
}

/// The path each live note would be exported to; nothing is written.
fn export_targets(db: &Database, destination: &Path) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::new();
    db.export(|record| {
        targets.push(destination.join(export::build_filename(record)));
        Ok(())
    })?;
    Ok(targets)
}

fn handle_cleanup(db: &Database, cmd: &CleanupCommand) -> Result<()> {
    let mut exporter = Exporter::new(&cmd.directory)?;
    let live: HashSet<_> = db.records()?.into_iter().map(|r| r.short_id).collect();

    match &cmd.trash {
        Some(trash) => {
            let moved = exporter.archive(&live, trash)?;
            info!(archived = moved.len(), "cleanup finished");
        }
        None => {
            for path in exporter.stale_files(&live) {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn handle_backlinks(db: &Database, cmd: &LinkCommand) -> Result<()> {
    let links = db.query_graph()?;
    let pairs = graph::backlinks(&links, &cmd.term);
    print!("{}", alfred::link_items(&pairs, "No backlinks found"));
    Ok(())
}

fn handle_forwardlinks(db: &Database, cmd: &LinkCommand) -> Result<()> {
    let links = db.query_graph()?;
    let pairs = graph::forward_links(&links, &cmd.term);
    print!("{}", alfred::link_items(&pairs, "No forward links found"));
    Ok(())
}

fn handle_graph(db: &Database, cmd: &GraphCommand) -> Result<()> {
    let links = db.query_graph()?;
    print!("{}", graph::render_dot(&links, cmd.term.as_deref()));
    Ok(())
}

fn handle_tags(db: &Database) -> Result<()> {
    let tags = db.query_tags()?;
    print!("{}", alfred::tag_items(&tags)?);
    Ok(())
}

fn handle_titles(db: &Database, cmd: &TitlesCommand) -> Result<()> {
    print!("{}", titles_json(db, cmd)?);
    Ok(())
}

fn titles_json(db: &Database, cmd: &TitlesCommand) -> Result<String> {
    let notes: Vec<_> = db
        .query_all_titles()?
        .into_iter()
        .filter(|note| !cmd.exclude_tag.iter().any(|t| note.has_tag_containing(t)))
        .collect();

    alfred::title_items(&notes, |note| {
        if cmd.filename_as_arg {
            export::filename_for(&note.title, &note.short_id())
        } else {
            note.id.clone()
        }
    })
}

fn handle_transcript(db: &Database, cmd: &TranscriptCommand) -> Result<()> {
    let (name, hashtag) = transcript::normalize_tag(&cmd.tag);
    let records = db.query_tag(&name)?;
    print!("{}", transcript::render_transcript(&records, &hashtag));
    Ok(())
}
