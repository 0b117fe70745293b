use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blockdown")]
#[command(author, version)]
#[command(about = "A block-level parser for Markdown with Mmark extensions")]
#[command(
    long_about = "Blockdown splits Markdown documents into their block structure (headings, \
    lists, quotes, code, tables, figures) and prints the resulting tree. It understands the \
    Mmark extensions: attributes, includes, asides, figure blocks and captions."
)]
#[command(after_help = "\
EXAMPLES:

    # Print the block outline of a file
    blockdown parse document.md

    # Parse from stdin
    cat document.md | blockdown parse

    # Emit the tree as JSON
    blockdown parse --json document.md

CONFIGURATION:

Blockdown looks for configuration files in this order:
  1. Explicit --config path
  2. blockdown.toml or .blockdown.toml in current/parent directories
  3. ~/.config/blockdown/config.toml (XDG)
  4. Built-in defaults

Example .blockdown.toml:

    flavor = \"mmark\"
    max_nesting = 16

    [extensions]
    tables = true
    fenced_code = true")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, blockdown will \
        search for .blockdown.toml or blockdown.toml in the input's directory and its parents, \
        then fall back to ~/.config/blockdown/config.toml."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a document and display its block tree
    #[command(
        long_about = "Parse a document and display its block tree. Includes are resolved \
        relative to the input file's directory (or the current directory for stdin)."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Outline of a file
    blockdown parse document.md

    # JSON tree from stdin
    echo '# Heading' | blockdown parse --json")]
    Parse {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        /// Print the tree as JSON instead of an outline
        #[arg(long)]
        json: bool,
    },
}
