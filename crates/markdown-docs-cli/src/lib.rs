use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use markdown_docs_config::{Config, LoadOptions};
use markdown_docs_core::MarkdownDocs;
use markdown_docs_format::CatalogFormat;
use markdown_docs_ops::{parse_slug, CatalogReport, Operations};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit code for a slug that does not resolve to a document.
pub const EXIT_NOT_FOUND: i32 = 1;
/// Exit code for configuration that fails to load or validate.
pub const EXIT_CONFIG: i32 = 2;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose || matches!(cli.command, Command::Serve(_)));

    let mut options = LoadOptions::default();
    if let Some(path) = &cli.config {
        options = options.with_override_path(path);
    }
    let mut config = match Config::load(options) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return Ok(EXIT_CONFIG);
        }
    };
    if let Some(root) = &cli.root {
        config = config.with_docs_root(root);
    }
    debug!(root = %config.docs.root.display(), "configuration loaded");

    match cli.command {
        Command::Serve(args) => handle_serve(config, args),
        Command::Catalog(args) => handle_catalog(MarkdownDocs::bootstrap(config).operations(), args),
        Command::Render(args) => handle_render(MarkdownDocs::bootstrap(config).operations(), args),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // stdout carries command output, so logs go to stderr.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn handle_serve(config: Config, args: ServeArgs) -> Result<i32> {
    let config = match args.bind {
        Some(bind) => config.with_bind(bind),
        None => config,
    };
    let engine = MarkdownDocs::bootstrap(config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(markdown_docs_server::serve(engine))?;
    Ok(0)
}

fn handle_catalog(ops: &Operations, args: CatalogArgs) -> Result<i32> {
    let format = match args.format.unwrap_or(CatalogFormatValue::Plain) {
        CatalogFormatValue::Plain => CatalogFormat::Plain,
        CatalogFormatValue::Json => CatalogFormat::Json,
        CatalogFormatValue::Html => CatalogFormat::Html,
    };

    let CatalogReport { rendered, .. } = ops.catalog_report(format)?;
    emit(&rendered)?;
    Ok(0)
}

fn handle_render(ops: &Operations, args: RenderArgs) -> Result<i32> {
    let RenderArgs { slug, page } = args;

    let segments = match parse_slug(&slug) {
        Ok(segments) => segments,
        Err(err) => {
            eprintln!("document not found: {slug} ({err})");
            return Ok(EXIT_NOT_FOUND);
        }
    };

    let rendered = if page {
        ops.document_page(&segments)
    } else {
        ops.render(&segments).map(|document| document.html)
    };

    match rendered {
        Ok(html) => {
            emit(&html)?;
            Ok(0)
        }
        Err(_) => {
            eprintln!("document not found: {slug}");
            Ok(EXIT_NOT_FOUND)
        }
    }
}

fn emit(content: &str) -> Result<()> {
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Browse a tree of markdown documents as a website",
    propagate_version = true
)]
struct Cli {
    /// Explicit configuration file, applied on top of discovered ones
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Document root, overriding `docs.root`
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Log at info level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the listing and document pages over HTTP
    Serve(ServeArgs),
    /// Print the document catalog
    Catalog(CatalogArgs),
    /// Render one document to HTML
    Render(RenderArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on, overriding `server.bind`
    #[arg(long, value_name = "ADDR")]
    bind: Option<SocketAddr>,
}

#[derive(Args)]
struct CatalogArgs {
    /// Output format (plain, json or html)
    #[arg(long, value_enum)]
    format: Option<CatalogFormatValue>,
}

#[derive(Args)]
struct RenderArgs {
    /// Document slug, e.g. `dart/data-types`
    #[arg(value_name = "SLUG")]
    slug: String,
    /// Wrap the document in the full detail page
    #[arg(long)]
    page: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogFormatValue {
    Plain,
    Json,
    Html,
}
