//! listscope - Command Line Entry Point
//!
//! Loads a markdown file, applies one list command to a range of blocks and
//! prints the resulting HTML.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use listscope::config::{load_config, load_config_from, save_config_silent, Settings};
use listscope::dom::html::{generate_html_document, to_html};
use listscope::dom::{Document, NodeId, Position, SelectionRange};
use listscope::list::Indentation;
use listscope::markdown::parse_markdown_with_options;
use listscope::{set_indentation, toggle_bullet, toggle_numbering, Error, Result};
use log::{debug, error, info};

/// List command to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Command {
    /// Toggle a bulleted list
    Bullet,
    /// Toggle a numbered list
    Numbering,
    /// Indent list items or quote plain blocks
    Indent,
    /// Outdent list items or unquote plain blocks
    Outdent,
}

#[derive(Parser)]
#[command(name = "listscope")]
#[command(about = "Apply list editing commands to a markdown document")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Command to apply to the selection
    #[arg(value_enum)]
    command: Command,

    /// First selected block (0-based, table cells count as blocks)
    #[arg(long, default_value_t = 0)]
    from: usize,

    /// Last selected block (defaults to the last block of the document)
    #[arg(long)]
    to: Option<usize>,

    /// Settings file to use instead of the user configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a standalone HTML page instead of a fragment
    #[arg(long)]
    document: bool,

    /// Save the effective settings to the user configuration
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(html) => println!("{}", html),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let settings = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    if cli.write_config && save_config_silent(&settings) {
        info!("Saved settings to the user configuration");
    }

    let markdown = fs::read_to_string(&cli.input).map_err(|e| Error::FileRead {
        path: cli.input.clone(),
        source: e,
    })?;
    let mut doc = parse_markdown_with_options(&markdown, &settings.markdown)?;
    info!("Loaded {}", cli.input.display());

    let range = block_range(&doc, cli.from, cli.to)?;
    let root = doc.root();
    let edited = apply(&mut doc, root, &range, cli.command, &settings)?;
    debug!("{:?} edited {} region(s)", cli.command, edited);

    let title = cli.input.file_stem().and_then(|s| s.to_str());
    Ok(if cli.document {
        generate_html_document(&doc, title)
    } else {
        to_html(&doc, root)
    })
}

fn apply(
    doc: &mut Document,
    root: NodeId,
    range: &SelectionRange,
    command: Command,
    settings: &Settings,
) -> Result<usize> {
    match command {
        Command::Bullet => toggle_bullet(doc, root, range, settings),
        Command::Numbering => toggle_numbering(doc, root, range, settings),
        Command::Indent => set_indentation(doc, root, range, Indentation::Increase, settings),
        Command::Outdent => set_indentation(doc, root, range, Indentation::Decrease, settings),
    }
}

/// Selection from the start of block `from` to the end of block `to`.
fn block_range(doc: &Document, from: usize, to: Option<usize>) -> Result<SelectionRange> {
    let blocks = doc.block_elements(doc.root(), false);
    if blocks.is_empty() {
        return Err(Error::InvalidSelection("document has no blocks".to_string()));
    }

    let to = to.unwrap_or(blocks.len() - 1);
    let (Some(first), Some(last)) = (blocks.get(from), blocks.get(to)) else {
        return Err(Error::InvalidSelection(format!(
            "blocks {}..={} out of range (document has {})",
            from,
            to,
            blocks.len()
        )));
    };
    if from > to {
        return Err(Error::InvalidSelection(format!(
            "start block {} is after end block {}",
            from, to
        )));
    }

    Ok(SelectionRange::new(
        doc,
        Position::begin(first.start_node()),
        Position::end(doc, last.end_node()),
    ))
}
