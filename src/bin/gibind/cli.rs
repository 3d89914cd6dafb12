//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// gibind - Go bindings and C shims from GObject introspection metadata
#[derive(Parser)]
#[command(name = "gibind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate bindings for one or more namespaces
    Generate(GenerateArgs),

    /// Print the dependency order of a namespace
    Deps(DepsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where metadata is read from.
#[derive(Args, Clone)]
pub struct MetadataArgs {
    /// Directory containing <Namespace>.json metadata (repeatable)
    #[arg(short = 'I', long = "metadata-dir", env = "GIBIND_METADATA_DIR")]
    pub metadata_dirs: Vec<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Namespaces to generate (e.g. Gtk)
    #[arg(required = true)]
    pub namespaces: Vec<String>,

    #[command(flatten)]
    pub metadata: MetadataArgs,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Directory holding per-namespace denylist files
    #[arg(long)]
    pub denylist_dir: Option<PathBuf>,

    /// Also generate every namespace the given ones depend on
    #[arg(long)]
    pub with_deps: bool,

    /// Number of worker threads
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Go import path under which namespace packages live
    #[arg(long)]
    pub import_root: Option<String>,
}

#[derive(Args)]
pub struct DepsArgs {
    /// Namespace to inspect
    pub namespace: String,

    #[command(flatten)]
    pub metadata: MetadataArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
