use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use file_header::config::{resolve, ConfigFile, Defaults, Overrides, CONFIG_FILE_NAME};
use file_header::i18n::TranslationCatalog;
use file_header::identity::SystemIdentity;
use file_header::profile::LanguageProfileTable;
use file_header::prompt::{DescriptionSource, LinePrompt};
use file_header::{HeaderError, HeaderMutator, UpdateDirective};

/// Insert or update a localized metadata header at the top of a file.
///
/// Settings come from built-in defaults, then `.header_config` in the working
/// directory, then the flags below.
#[derive(Parser, Debug)]
#[command(name = "file-header", disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Author name
    #[arg(short, long)]
    author: Option<String>,

    /// Label language: fr, en, de, es, it
    #[arg(short, long)]
    language: Option<String>,

    /// Comment token: #, //, ; or /
    #[arg(short, long)]
    comment: Option<String>,

    /// Shebang kind: none, auto, or a language such as bash, python, node
    #[arg(short, long)]
    shebang: Option<String>,

    /// Template: default or single
    #[arg(short, long)]
    template: Option<String>,

    /// Update an existing header: major, minor, patch or X.Y[.Z]
    #[arg(short, long, value_name = "ARG")]
    update: Option<String>,

    /// Prompt for a description
    #[arg(short, long)]
    description: bool,

    /// Print the resulting file to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Target file
    file: Option<PathBuf>,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("file_header=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.version {
        println!("file-header {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Validate everything before anything touches the file system.
    let path = cli.file.ok_or(HeaderError::NoFileSpecified)?;
    let update = cli
        .update
        .as_deref()
        .map(UpdateDirective::parse)
        .transpose()?;

    let file_config = ConfigFile::load(Path::new(CONFIG_FILE_NAME))?;
    let defaults = Defaults::from_env(&SystemIdentity);
    let overrides = Overrides {
        author: cli.author,
        language: cli.language,
        comment: cli.comment,
        shebang: cli.shebang,
        template: cli.template,
    };

    let mut prompt = LinePrompt::new(io::stdin().lock(), io::stderr());
    let description: Option<&mut dyn DescriptionSource> = if cli.description {
        Some(&mut prompt)
    } else {
        None
    };
    let config = resolve(&defaults, file_config.as_ref(), &overrides, description)?;

    let catalog = TranslationCatalog::new()?;
    let now = chrono::Local::now().naive_local();
    let mutator = HeaderMutator::new(&config, &catalog, LanguageProfileTable::get(), now);

    if cli.dry_run {
        let plan = mutator.plan(&path, update.as_ref())?;
        info!("Dry run: {:?} for {}", plan.mode, path.display());
        io::stdout()
            .write_all(&plan.content)
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    mutator.apply(&path, update.as_ref())?;
    Ok(())
}

fn main() -> ExitCode {
    // Load .env file (optional)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
