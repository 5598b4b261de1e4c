//! `normalize-yang`: emit a JSON statement tree as canonical YANG.

use anyhow::{Context, Result};
use clap::Parser;
use normalize_yang::{Statement, YangConfig, YangWriter};
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Emit a YANG statement tree (JSON) as YANG source.
#[derive(Parser, Debug)]
#[command(name = "normalize-yang", version, about)]
struct Cli {
    /// Statement tree as JSON, use - for stdin
    input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print substatements in canonical order
    #[arg(long)]
    canonical: bool,

    /// Drop imports whose prefix is never used
    #[arg(long)]
    remove_unused_imports: bool,

    /// Maximum line length
    #[arg(long, value_name = "N")]
    line_length: Option<usize>,

    /// Spaces per indent step
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Config file (default: global and .normalize/yang.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => YangConfig::load_file(path)?,
        None => YangConfig::load(&std::env::current_dir().context("no working directory")?),
    };
    let mut options = config.options();
    options.canonical_order |= cli.canonical;
    options.remove_unused_imports |= cli.remove_unused_imports;
    if cli.line_length.is_some() {
        options.max_line_length = cli.line_length;
    }
    if let Some(indent) = cli.indent {
        options.indent = indent;
    }
    tracing::debug!(?options, "formatting options");

    let content = if cli.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(&cli.input)
            .with_context(|| format!("failed to read {}", cli.input.display()))?
    };
    let tree: Statement = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a statement tree", cli.input.display()))?;

    let writer = YangWriter::new(&options);
    match &cli.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            writer.write(&tree, &mut out)?;
            out.flush()?;
        }
        None => {
            let mut out = BufWriter::new(std::io::stdout().lock());
            writer.write(&tree, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
