//! CLI binary for docs2docx.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AssembleConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use docs2docx::{
    assemble, assemble_to_file, write_docx, AssembleConfig, AssemblyProgressCallback, Margins,
    Orientation, ProgressCallback,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback ────────────────────────────────────────────────────

/// Terminal progress callback: one line per document as it completes, in
/// table-of-contents order.
struct CliProgressCallback;

impl AssemblyProgressCallback for CliProgressCallback {
    fn on_assembly_start(&self, total_documents: usize) {
        eprintln!("{}", bold(&format!("Assembling {total_documents} documents…")));
    }

    fn on_document_complete(&self, index: usize, _total: usize, path: &Path, html_len: usize) {
        eprintln!(
            "  {} [{}] {}  {}",
            green("✓"),
            index,
            path.display(),
            dim(&format!("{html_len} bytes")),
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Assemble ./docs guided by docs/_sidebar.md into ./README.docx
  docs2docx --contents docs/_sidebar.md --root ./docs

  # Landscape manual with a cover heading and wider images allowed
  docs2docx --contents _sidebar.md --orientation landscape \
            --cover-title '<h1 style="text-align: center;">User Manual</h1>' \
            --img-max-width 600 -o manual.docx

  # Keep headings at their original levels
  docs2docx --no-title-downgrade

  # Custom page margins (twentieths of a point; 1440 = 1 inch)
  docs2docx --margin-top 720 --margin-bottom 720

  # Machine-readable run statistics
  docs2docx --json > stats.json

INPUT FORMAT:
  The contents file is a docsify-style sidebar: its Markdown link targets
  ([label](path.md)) enumerate, in order, the documents to assemble. Each
  referenced path is read relative to the working directory; image paths
  inside documents resolve against --root.
"#;

/// Assemble a Markdown documentation site into a single Word-compatible .docx.
#[derive(Parser, Debug)]
#[command(
    name = "docs2docx",
    version,
    about = "Assemble a Markdown documentation site into a single Word-compatible .docx",
    long_about = "Resolve a docsify-style sidebar into an ordered list of Markdown documents, \
render each to HTML with images embedded inline, and package the result as one .docx file.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Table-of-contents file whose links enumerate the documents.
    #[arg(long, env = "DOCS2DOCX_CONTENTS", default_value = "_sidebar.md")]
    contents: PathBuf,

    /// Base directory for resolving image references.
    #[arg(long = "root", env = "DOCS2DOCX_ROOT", default_value = "./docs")]
    root_path: PathBuf,

    /// Write the docx to this path (overwritten without confirmation).
    #[arg(short, long, env = "DOCS2DOCX_OUTPUT", default_value = "./README.docx")]
    output: PathBuf,

    /// Keep headings at their original levels instead of demoting `# ` one level.
    #[arg(long, env = "DOCS2DOCX_NO_TITLE_DOWNGRADE")]
    no_title_downgrade: bool,

    /// Maximum rendered image width; wider images are downscaled proportionally.
    #[arg(long, env = "DOCS2DOCX_IMG_MAX_WIDTH", default_value_t = 468)]
    img_max_width: u32,

    /// Literal HTML prepended once as a cover fragment.
    #[arg(long, env = "DOCS2DOCX_COVER_TITLE")]
    cover_title: Option<String>,

    /// Inline CSS applied to the body element of the assembled HTML.
    #[arg(long, env = "DOCS2DOCX_BODY_STYLES")]
    body_styles: Option<String>,

    /// Page orientation.
    #[arg(long, env = "DOCS2DOCX_ORIENTATION", value_enum, default_value = "portrait")]
    orientation: OrientationArg,

    /// Top page margin in twentieths of a point.
    #[arg(long)]
    margin_top: Option<u32>,

    /// Right page margin in twentieths of a point.
    #[arg(long)]
    margin_right: Option<u32>,

    /// Bottom page margin in twentieths of a point.
    #[arg(long)]
    margin_bottom: Option<u32>,

    /// Left page margin in twentieths of a point.
    #[arg(long)]
    margin_left: Option<u32>,

    /// Print run statistics as JSON to stdout instead of writing a file summary.
    #[arg(long, env = "DOCS2DOCX_JSON")]
    json: bool,

    /// Disable per-document progress lines.
    #[arg(long, env = "DOCS2DOCX_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOCS2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DOCS2DOCX_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(v: OrientationArg) -> Self {
        match v {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Per-document feedback comes from the progress callback; library INFO
    // logs would duplicate it, so they stay off unless asked for.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config and run ─────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress;
    let config = build_config(&cli, show_progress);

    if cli.json {
        let output = assemble(&config).await.context("Assembly failed")?;
        write_docx(&config.path_to_public, &output.docx)
            .await
            .with_context(|| format!("Failed to write {}", config.path_to_public.display()))?;

        let report = serde_json::json!({
            "output": config.path_to_public,
            "documents": output.documents,
            "stats": output.stats,
        });
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &report).context("Failed to serialise stats")?;
        stdout.write_all(b"\n").ok();
        return Ok(());
    }

    match assemble_to_file(&config).await {
        Ok(stats) => {
            if !cli.quiet {
                eprintln!(
                    "\n{} {}  {}",
                    green("😄 Assembled"),
                    bold(&config.path_to_public.display().to_string()),
                    dim(&format!(
                        "{} documents, {} images, {}ms",
                        stats.documents, stats.images_inlined, stats.total_duration_ms
                    )),
                );
            }
            Ok(())
        }
        Err(e) => {
            // One catch-all report with the raw error, then a non-zero exit.
            eprintln!("\n{} {e}", red("✗ Assembly failed:"));
            Err(e.into())
        }
    }
}

/// Map CLI args to `AssembleConfig`.
fn build_config(cli: &Cli, show_progress: bool) -> AssembleConfig {
    let defaults = Margins::default();
    let mut builder = AssembleConfig::builder()
        .contents(&cli.contents)
        .root_path(&cli.root_path)
        .path_to_public(&cli.output)
        .title_downgrade(!cli.no_title_downgrade)
        .img_max_width(cli.img_max_width)
        .orientation(cli.orientation.into())
        .margins(Margins {
            top: cli.margin_top.unwrap_or(defaults.top),
            right: cli.margin_right.unwrap_or(defaults.right),
            bottom: cli.margin_bottom.unwrap_or(defaults.bottom),
            left: cli.margin_left.unwrap_or(defaults.left),
            ..defaults
        });

    if let Some(ref cover) = cli.cover_title {
        builder = builder.cover_title(cover.clone());
    }
    if let Some(ref styles) = cli.body_styles {
        builder = builder.body_styles(styles.clone());
    }
    if show_progress {
        let cb: ProgressCallback = Arc::new(CliProgressCallback);
        builder = builder.progress_callback(cb);
    }

    builder.build()
}
