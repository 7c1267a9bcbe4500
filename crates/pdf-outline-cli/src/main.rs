use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use pdf_outline_core::config_file::{self, ConfigFile};
use pdf_outline_ingest::BatchProcessor;
use pdf_outline_parsing::{OutlineConfig, OutlineConfigBuilder, OutlineExtractor};
use tokio_util::sync::CancellationToken;

mod output;

use output::ColorMode;

const DEFAULT_INPUT_DIR: &str = "/app/input";
const DEFAULT_OUTPUT_DIR: &str = "/app/output";

const INPUT_DIR_ENV: &str = "PDF_OUTLINE_INPUT_DIR";
const OUTPUT_DIR_ENV: &str = "PDF_OUTLINE_OUTPUT_DIR";
const MAX_PAGES_ENV: &str = "PDF_OUTLINE_MAX_PAGES";

/// PDF Outline Extractor - Detect the title and H1-H4 headings of PDFs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (default: .pdf-outline.toml over the platform config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a `<name>_outline.json` for every PDF in the input directory
    Process {
        /// Directory scanned for *.pdf files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory the outlines are written to (created if missing)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a `<name>_outline.md` per PDF
        #[arg(long)]
        markdown: bool,

        /// Only inspect the first N pages of each PDF
        #[arg(long)]
        max_pages: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the outline of a single PDF
    Extract {
        /// Path to the PDF
        file_path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Only inspect the first N pages
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let file_config = match cli.config {
        Some(ref path) => config_file::load_from_path(path).ok_or_else(|| {
            anyhow::anyhow!("Could not read config file: {}", path.display())
        })?,
        None => config_file::load_config(),
    };

    match cli.command {
        Command::Process {
            input,
            output,
            markdown,
            max_pages,
            no_color,
        } => process(input, output, markdown, max_pages, no_color, &file_config).await,
        Command::Extract {
            file_path,
            format,
            max_pages,
        } => extract(&file_path, format, max_pages, &file_config),
    }
}

/// Logs go to stderr so stdout only carries progress lines and outlines.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Page limit from the `--max-pages` flag, else from `env_var`.
///
/// A set but non-numeric variable is an error rather than being ignored.
fn max_pages_setting(flag: Option<usize>, env_var: &str) -> anyhow::Result<Option<usize>> {
    if flag.is_some() {
        return Ok(flag);
    }
    match std::env::var(env_var) {
        Ok(v) => match v.trim().parse() {
            Ok(pages) => Ok(Some(pages)),
            Err(_) => anyhow::bail!("{} must be a whole number of pages, got {:?}", env_var, v),
        },
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => anyhow::bail!("{}: {}", env_var, e),
    }
}

/// Resolve detection settings: CLI flags > env vars > config file > defaults.
///
/// `max_pages` is the already resolved flag or env value.
fn outline_config(
    max_pages: Option<usize>,
    file_config: &ConfigFile,
) -> anyhow::Result<OutlineConfig> {
    let mut builder = file_config
        .detection
        .as_ref()
        .map(OutlineConfigBuilder::from_detection)
        .unwrap_or_default();

    if let Some(pages) = max_pages {
        builder = builder.max_pages(pages);
    }

    Ok(builder.build()?)
}

fn resolve_dir(
    flag: Option<PathBuf>,
    env_var: &str,
    from_file: Option<&String>,
    default: &str,
) -> PathBuf {
    flag.or_else(|| std::env::var(env_var).ok().map(PathBuf::from))
        .or_else(|| from_file.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

async fn process(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    markdown: bool,
    max_pages: Option<usize>,
    no_color: bool,
    file_config: &ConfigFile,
) -> anyhow::Result<()> {
    let paths = file_config.paths.as_ref();
    let input_dir = resolve_dir(
        input,
        INPUT_DIR_ENV,
        paths.and_then(|p| p.input_dir.as_ref()),
        DEFAULT_INPUT_DIR,
    );
    let output_dir = resolve_dir(
        output,
        OUTPUT_DIR_ENV,
        paths.and_then(|p| p.output_dir.as_ref()),
        DEFAULT_OUTPUT_DIR,
    );
    let markdown = markdown
        || file_config
            .output
            .as_ref()
            .and_then(|o| o.markdown)
            .unwrap_or(false);

    let max_pages = max_pages_setting(max_pages, MAX_PAGES_ENV)?;
    let extractor = OutlineExtractor::with_config(outline_config(max_pages, file_config)?);
    let processor = BatchProcessor::new(pdf_outline_ingest::default_backend()?, extractor)
        .with_markdown(markdown);

    // Plain output when piped or captured by a container runtime
    let color = ColorMode(!no_color && std::io::stdout().is_terminal());
    output::print_start(&mut std::io::stdout(), color)?;

    let cancel = CancellationToken::new();

    // Set up Ctrl+C handler
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_clone.cancel();
        }
    });

    tracing::debug!(
        input = %input_dir.display(),
        output = %output_dir.display(),
        "processing directory"
    );

    let summary = tokio::task::spawn_blocking(move || {
        let mut stdout = std::io::stdout();
        let mut on_event = |event: pdf_outline_ingest::BatchEvent| {
            let _ = output::print_event(&mut stdout, &event, color);
            let _ = stdout.flush();
        };
        processor.process_directory(&input_dir, &output_dir, &mut on_event, &|| {
            cancel.is_cancelled()
        })
    })
    .await??;

    output::print_summary(&mut std::io::stdout(), &summary, color)?;
    Ok(())
}

fn extract(
    file_path: &Path,
    format: Format,
    max_pages: Option<usize>,
    file_config: &ConfigFile,
) -> anyhow::Result<()> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let max_pages = max_pages_setting(max_pages, MAX_PAGES_ENV)?;
    let extractor = OutlineExtractor::with_config(outline_config(max_pages, file_config)?);
    let backend = pdf_outline_ingest::default_backend()?;

    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.display().to_string());
    let bytes = std::fs::read(file_path)?;
    let outline = extractor.try_extract_from_bytes(&bytes, &file_name, backend.as_ref())?;

    let mut stdout = std::io::stdout();
    match format {
        Format::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(&outline)?)?,
        Format::Markdown => {
            writeln!(stdout, "# {}", outline.title)?;
            writeln!(stdout)?;
            writeln!(stdout, "{}", pdf_outline_parsing::render_markdown(&outline))?;
        }
    }
    Ok(())
}
