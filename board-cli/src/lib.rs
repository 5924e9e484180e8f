//! # Board Layout CLI
//!
//! Command-line front end for `board-core`. Loads a board document, runs a
//! layout operation on a selection and writes the result.
//!
//! ## Usage
//!
//! ```bash
//! board-layout gaps --input board.json
//! board-layout set-gap --axis x --value 20 --input board.json --output out.json
//! board-layout align --axis y --mode center --select symbol_0,symbol_3 < board.json
//! board-layout duplicate --select symbol_2 --input board.json
//! board-layout pages --input board.json
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Resolved input/output, selection and board configuration
//! - `execute` - Runs one command against a document held in memory

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use board_core::layout::DEFAULT_MERGE_THRESHOLD;
use board_core::{
    AlignMode, Axis, Board, BoardConfig, BoardDocument, ElementId, GapChange, LayoutConfig,
    ReflowScope,
};
use clap::{Parser, Subcommand};

/// Command-line arguments for board-layout.
#[derive(Debug, Clone, Parser)]
#[command(name = "board-layout")]
#[command(about = "Grid-aware spacing and alignment for communication boards")]
#[command(version)]
pub struct CliArgs {
    /// Board document to read (stdin when omitted)
    #[arg(long, short, global = true)]
    pub input: Option<PathBuf>,

    /// Where to write the result (stdout when omitted)
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,

    /// Element ids to operate on (all elements when omitted)
    #[arg(long = "select", value_name = "ID", value_delimiter = ',', global = true)]
    pub select: Vec<String>,

    /// Positions closer than this belong to the same grid line
    #[arg(long, env = "BOARD_MERGE_THRESHOLD", default_value_t = DEFAULT_MERGE_THRESHOLD, global = true)]
    pub merge_threshold: f64,

    /// Let a gap change also snap the other axis to the grid
    #[arg(long, global = true)]
    pub reflow_both_axes: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Layout operations.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the row and column gap of the selection as JSON
    Gaps,
    /// Re-flow the selection to a new gap along one axis
    SetGap {
        /// Axis whose gap changes (x or y)
        #[arg(long)]
        axis: Axis,
        /// New gap in document units
        #[arg(long, allow_negative_numbers = true)]
        value: f64,
    },
    /// Align the selection along one axis
    Align {
        /// Axis to align on (x or y)
        #[arg(long)]
        axis: Axis,
        /// start, center or end
        #[arg(long)]
        mode: AlignMode,
    },
    /// Copy the selection next to itself
    Duplicate,
    /// Print the page count, orientation and page size as JSON
    Pages,
    /// Append a page at the end of the board
    AddPage,
    /// Remove the last page, keeping every element
    RemovePage,
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Input document path; stdin when `None`.
    pub input: Option<PathBuf>,
    /// Output path; stdout when `None`.
    pub output: Option<PathBuf>,
    /// Explicit selection; every element when empty.
    pub selection: Vec<ElementId>,
    /// Board and layout settings.
    pub board: BoardConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CliConfig {
    /// Create a configuration reading stdin and writing stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: None,
            output: None,
            selection: Vec::new(),
            board: BoardConfig::default(),
        }
    }
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        let reflow_scope = if args.reflow_both_axes {
            ReflowScope::BothAxes
        } else {
            ReflowScope::RequestedAxis
        };
        Self {
            input: args.input,
            output: args.output,
            selection: args.select.into_iter().map(ElementId::new).collect(),
            board: BoardConfig {
                layout: LayoutConfig::default()
                    .with_merge_threshold(args.merge_threshold)
                    .with_reflow_scope(reflow_scope),
                ..BoardConfig::default()
            },
        }
    }
}

/// Run `command` against the board document in `input`.
///
/// Returns the text to emit: JSON for the read-only commands
/// [`Command::Gaps`] and [`Command::Pages`], the updated document otherwise.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed or opened, if the
/// selection names an unknown element, if a numeric setting is not a finite
/// number, or if the last page would be removed.
pub fn execute(config: &CliConfig, command: &Command, input: &str) -> anyhow::Result<String> {
    let threshold = config.board.layout.merge_threshold;
    ensure!(
        threshold.is_finite() && threshold > 0.0,
        "merge threshold must be a positive number, got {threshold}"
    );

    let document = BoardDocument::from_json(input).context("Failed to parse board document")?;
    let mut board =
        Board::from_document(document, config.board.clone()).context("Failed to open board")?;

    if config.selection.is_empty() {
        board.select_all();
    } else {
        board
            .set_selection(&config.selection)
            .context("Failed to select elements")?;
    }
    tracing::debug!(
        selected = board.selected_ids().len(),
        elements = board.elements().len(),
        ?command,
        "running command"
    );

    match command {
        Command::Gaps => {
            let gaps = board.gaps();
            tracing::info!(row_gap = ?gaps.row_gap, column_gap = ?gaps.column_gap, "determined gaps");
            Ok(serde_json::to_string_pretty(&gaps)?)
        }
        Command::SetGap { axis, value } => {
            ensure!(value.is_finite(), "gap must be a finite number, got {value}");
            board.handle_gap_change(GapChange::along(*axis, *value));
            Ok(board.to_document().to_json_pretty()?)
        }
        Command::Align { axis, mode } => {
            board.align_selected(*axis, *mode);
            Ok(board.to_document().to_json_pretty()?)
        }
        Command::Duplicate => {
            let copies = board.duplicate();
            tracing::info!(count = copies.len(), "duplicated selection");
            Ok(board.to_document().to_json_pretty()?)
        }
        Command::Pages => {
            let page = board.page_dimension();
            let summary = serde_json::json!({
                "numberOfPages": board.number_of_pages(),
                "isLandscape": board.is_landscape(),
                "width": page.width,
                "height": page.height,
            });
            Ok(serde_json::to_string_pretty(&summary)?)
        }
        Command::AddPage => {
            board.add_page();
            Ok(board.to_document().to_json_pretty()?)
        }
        Command::RemovePage => {
            ensure!(board.remove_page(), "cannot remove the only page of a board");
            Ok(board.to_document().to_json_pretty()?)
        }
    }
}

/// Read the whole input document from `path`, or stdin when `None`.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Write `contents` to `path`, or stdout when `None`.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
pub fn write_output(path: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{contents}\n"))
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{contents}").context("Failed to write stdout")?;
            Ok(())
        }
    }
}

/// Parse-independent entry point used by the binary.
///
/// # Errors
///
/// Returns an error if reading, executing or writing fails.
pub fn run(args: CliArgs) -> anyhow::Result<()> {
    let command = args.command.clone();
    let config = CliConfig::from(args);

    let input = read_input(config.input.as_deref())?;
    let output = execute(&config, &command, &input)?;
    write_output(config.output.as_deref(), &output)
}
