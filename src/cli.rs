//! Command-line interface for codedoc.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::prelude::*;

use crate::config::{self, Config, DEFAULT_CONFIG_NAMES};
use crate::pipeline::{analyze_async, Analyzer};
use crate::report::{self, DocumentSummary, GraphSummary};
use crate::structure::ProjectDocument;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Commented configuration written by `codedoc init`.
const CONFIG_TEMPLATE: &str = include_str!("templates/codedoc.yaml");

/// Document a TypeScript/JavaScript project.
///
/// codedoc walks a project, records each source file's description,
/// imports and documented functions in a YAML document, and can turn that
/// document into a node/link graph of directories, files and the imports
/// between them.
#[derive(Parser)]
#[command(name = "codedoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a project and write its code document
    Analyze(AnalyzeArgs),
    /// Build the file/dependency graph as JSON
    Graph(GraphArgs),
    /// Create a codedoc.yaml configuration from a template
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Project root directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover at the root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Document path (default: the config's output, under the root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

/// Arguments for the graph command.
#[derive(Parser)]
pub struct GraphArgs {
    /// Project root directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover at the root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Build from a previously written document instead of re-analyzing
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "codedoc.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` selects the level unless `verbose` is set; the default is
/// `warn`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

/// Resolve the root directory given on the command line.
fn resolve_root(path: &Path) -> anyhow::Result<PathBuf> {
    path.canonicalize()
        .map_err(|e| anyhow::anyhow!("cannot access path {:?}: {}", path, e))
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let root = resolve_root(&args.path)?;

    let config = match Config::load(&root, args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let output = if args.stdout {
        None
    } else {
        Some(
            args.output
                .clone()
                .unwrap_or_else(|| root.join(&config.output)),
        )
    };

    let document = runtime()?.block_on(analyze_async(root.clone(), config))?;

    report::write_document(&document, output.as_deref())?;

    let summary = DocumentSummary::of(&document);
    eprintln!(
        "{}",
        report::render_document_summary(&root.display().to_string(), output.as_deref(), &summary)
    );

    Ok(EXIT_SUCCESS)
}

/// Run the graph command.
pub fn run_graph(args: &GraphArgs) -> anyhow::Result<i32> {
    let (document, root) = match &args.from {
        Some(from) => {
            let document = ProjectDocument::load(from)?;
            // Prefer the root the document was produced from so imports are
            // probed against the right tree.
            let recorded = document
                .root
                .path
                .as_deref()
                .map(PathBuf::from)
                .filter(|p| p.is_dir());
            let root = match recorded {
                Some(root) => root,
                None => resolve_root(&args.path)?,
            };
            (Some(document), root)
        }
        None => (None, resolve_root(&args.path)?),
    };

    let config = Config::load(&root, args.config.as_deref())?;
    let analyzer = Analyzer::new(&root, config)?;
    let document = match document {
        Some(document) => document,
        None => runtime()?.block_on(analyze_async(root.clone(), analyzer.config().clone()))?,
    };
    let graph = analyzer.graph(&document);

    report::write_graph(&graph, args.output.as_deref(), args.pretty)?;
    eprintln!(
        "{}",
        report::render_graph_summary(args.output.as_deref(), &GraphSummary::of(&graph))
    );

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite it");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Refuse to write a template that would not load.
    let template: Config = serde_yaml::from_str(CONFIG_TEMPLATE)?;
    config::validate(&template)?;

    std::fs::write(&args.output, CONFIG_TEMPLATE)?;

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to match your project layout", args.output.display());
    if !DEFAULT_CONFIG_NAMES
        .iter()
        .any(|name| args.output.file_name() == Some(std::ffi::OsStr::new(name)))
    {
        println!("  2. Run: codedoc analyze --config {}", args.output.display());
    } else {
        println!("  2. Run: codedoc analyze");
    }

    Ok(EXIT_SUCCESS)
}
