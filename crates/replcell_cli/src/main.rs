//! Command-line front end: resolve a cell in a file and send it to a REPL.

mod host;
mod transport;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use host::FileHost;
use replcell_core::{
    BoundarySource, CellConfig, CellError, CellRange, CellSession, Clipboard, Cursor,
    DeliveryMode, Host, Outcome, ProgramClipboard, Transport,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transport::{StreamTransport, TmuxTransport};

#[derive(Parser)]
#[command(name = "rcell", about = "Send code cells from a file to a running REPL", version)]
struct Cli {
    /// Source file holding the cells
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Cursor row (1-based)
    #[arg(short, long, global = true, default_value = "1")]
    row: usize,

    /// Cursor column (0-based)
    #[arg(long, global = true, default_value = "0")]
    col: usize,

    /// Mark position as ID=ROW (repeatable)
    #[arg(short, long = "mark", global = true, value_parser = parse_mark)]
    marks: Vec<(char, usize)>,

    /// How text reaches the interpreter
    #[arg(long, value_enum, env = "REPLCELL_TRANSPORT", default_value = "tmux", global = true)]
    transport: TransportKind,

    /// tmux pane receiving the text
    #[arg(long, env = "REPLCELL_TMUX_TARGET", default_value = "{last}", global = true)]
    target: String,

    /// Boundary source override (marks or tags)
    #[arg(long, global = true, value_parser = parse_boundary_source)]
    delimit_by: Option<BoundarySource>,

    /// Cell tag (repeatable; replaces configured tags)
    #[arg(long = "tag", global = true)]
    tags: Vec<String>,

    /// Treat tags as regular expressions
    #[arg(long, global = true)]
    regex: bool,

    /// Delivery override (clipboard or direct)
    #[arg(long, global = true, value_parser = parse_delivery)]
    delivery: Option<DeliveryMode>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransportKind {
    /// `tmux send-keys` into a pane
    Tmux,
    /// Raw text on stdout
    Stdout,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Send the cell under the cursor
    Execute,
    /// Send the cell under the cursor, then jump to the next cell
    ExecuteJump,
    /// Jump to the start of the next cell
    Next,
    /// Jump to the start of the previous cell
    Prev,
    /// Run the whole file
    Run {
        /// Options passed to the run command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Clear the interpreter screen
    Clear,
    /// Close all figure windows
    Close,
    /// Re-run the interpreter's previous command
    PrevCommand,
    /// Restart the interpreter
    Restart,
    /// Insert a cell header above the current cell
    InsertAbove,
    /// Insert a cell header below the current cell
    InsertBelow,
    /// List every cell of the file
    Cells,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_mark(value: &str) -> Result<(char, usize), String> {
    let (id, row) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=ROW, got '{}'", value))?;
    let mut chars = id.chars();
    let (Some(id), None) = (chars.next(), chars.next()) else {
        return Err(format!("mark id must be a single character, got '{}'", id));
    };
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("mark row must be a number, got '{}'", row))?;
    Ok((id, row))
}

fn parse_boundary_source(value: &str) -> Result<BoundarySource, String> {
    value.parse().map_err(|err: CellError| err.to_string())
}

fn parse_delivery(value: &str) -> Result<DeliveryMode, String> {
    value.parse().map_err(|err: CellError| err.to_string())
}

fn build_config(cli: &Cli) -> Result<CellConfig, CellError> {
    CellConfig::from_env_with(|config| {
        if let Some(source) = cli.delimit_by {
            config.delimit_cells_by = source;
        }
        if !cli.tags.is_empty() {
            config.tags = cli.tags.clone();
        }
        if cli.regex {
            config.regex = true;
        }
        if let Some(delivery) = cli.delivery {
            config.delivery = delivery;
        }
    })
}

fn dispatch(session: &mut CellSession<'_>, command: &Commands) -> Result<Outcome, CellError> {
    match command {
        Commands::Execute => session.execute_cell(),
        Commands::ExecuteJump => session.execute_cell_and_jump(),
        Commands::Next => session.jump_next_cell(),
        Commands::Prev => session.jump_prev_cell(),
        Commands::Run { args } => session.run(args),
        Commands::Clear => session.clear(),
        Commands::Close => session.close_all(),
        Commands::PrevCommand => session.previous_command(),
        Commands::Restart => session.restart(),
        Commands::InsertAbove => session.insert_cell_above(),
        Commands::InsertBelow => session.insert_cell_below(),
        Commands::Cells => session.list_cells(),
        Commands::Completions { .. } => unreachable!("completions handled before dispatch"),
    }
}

/// What one invocation did, for printing.
#[derive(Debug)]
struct Report {
    outcome: Outcome,
    cursor: Option<Cursor>,
}

/// Run `command` against a file host, writing inserted lines back even when
/// a later step of the command failed.
fn run_invocation(
    command: &Commands,
    config: &CellConfig,
    host: &mut FileHost,
    transport: &mut dyn Transport,
    clipboard: &dyn Clipboard,
) -> Result<Report, CellError> {
    let before = host.cursor();
    let result = {
        let mut session = CellSession::new(host, transport, clipboard, config);
        dispatch(&mut session, command)
    };
    if host.is_dirty() {
        host.persist()?;
    }
    let outcome = result?;
    let after = host.cursor();
    Ok(Report {
        outcome,
        cursor: (after != before).then_some(after),
    })
}

fn format_cells(cells: &[CellRange]) -> String {
    cells
        .iter()
        .map(|cell| match cell.end {
            Some(end) => format!("{}\t{}", cell.start, end),
            None => format!("{}\t$", cell.start),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text for stdout: a listing, a new cursor position, or a JSON report.
fn format_report(report: &Report, json: bool) -> Result<Option<String>, serde_json::Error> {
    if json {
        let mut value = serde_json::json!({ "message": report.outcome.to_string() });
        if let Some(cursor) = report.cursor {
            value["cursor"] = serde_json::json!({ "row": cursor.row, "col": cursor.col });
        }
        if let Outcome::Cells(cells) = &report.outcome {
            value["cells"] = serde_json::to_value(cells)?;
        }
        return serde_json::to_string_pretty(&value).map(Some);
    }

    if let Outcome::Cells(cells) = &report.outcome {
        return Ok(Some(format_cells(cells)));
    }
    Ok(report
        .cursor
        .map(|cursor| format!("{}:{}", cursor.row, cursor.col)))
}

/// Print the outcome message and report.
///
/// With the stdout transport, stdout carries only the payload and the report
/// goes to `err` instead.
fn emit_report(
    report: &Report,
    json: bool,
    transport: TransportKind,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> anyhow::Result<()> {
    if !json && !matches!(report.outcome, Outcome::Cells(_)) {
        writeln!(err, "{}", report.outcome)?;
    }
    if let Some(output) = format_report(report, json)? {
        match transport {
            TransportKind::Stdout => writeln!(err, "{}", output)?,
            TransportKind::Tmux => writeln!(out, "{}", output)?,
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "replcell_core=warn,rcell=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config = build_config(&cli)?;
    let path = cli
        .file
        .as_deref()
        .context("--file is required for this command")?;
    let mut host = FileHost::open(path, Cursor::new(cli.row, cli.col))
        .with_context(|| format!("failed to open {}", path.display()))?
        .with_marks(&cli.marks);
    let clipboard = ProgramClipboard::from_config(&config);
    let mut transport: Box<dyn Transport> = match cli.transport {
        TransportKind::Tmux => Box::new(TmuxTransport::new(cli.target.clone())),
        TransportKind::Stdout => Box::new(StreamTransport::new(io::stdout())),
    };

    let report = run_invocation(
        &cli.command,
        &config,
        &mut host,
        transport.as_mut(),
        &clipboard,
    )?;
    tracing::info!(outcome = %report.outcome, "command finished");

    emit_report(
        &report,
        cli.json,
        cli.transport,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}
