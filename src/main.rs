//! clipbatch binary
//!
//! Wires the ffmpeg editor, the configured blob store and the Gemini client
//! into the batch pipeline.
//!
//! Environment Variables (also read from `.env`):
//! - SOURCE_PATTERN, CATALOG_PATH, REMOTE_FOLDER, TRIM_SECONDS
//! - CLEANUP_POLICY (delete | archive), ARCHIVE_ROOT
//! - STORAGE_BACKEND (s3 | local) and the STORAGE_* settings of that backend
//! - GEMINI_API_KEY, GEMINI_MODEL

use clap::{Parser, Subcommand, ValueEnum};
use clipbatch::adapters::ffmpeg::FfmpegEditor;
use clipbatch::adapters::gemini::GeminiClient;
use clipbatch::adapters::storage::{fs::FsAdapter, s3::S3Adapter};
use clipbatch::application::stages::UploadStage;
use clipbatch::config::{self, CaptionConfig, CleanupPolicy, PipelineConfig, StorageConfig};
use clipbatch::error::{PipelineError, PipelineResult};
use clipbatch::ports::storage::BlobStore;
use clipbatch::{BatchPipeline, CatalogStore};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "clipbatch", version, about = "Trim, publish and caption video clips")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Process every new clip matching the source pattern (default)
    Run(RunArgs),
    /// Publish a single file and print its public URL
    Upload {
        file: PathBuf,
        /// Remote folder, concatenated verbatim with the object name
        #[arg(long)]
        folder: Option<String>,
        /// Remote object name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// List the filenames already recorded in the catalog
    Catalog,
}

#[derive(Debug, Default, clap::Args)]
struct RunArgs {
    /// Glob pattern selecting source clips
    #[arg(long)]
    source: Option<String>,
    #[arg(long, value_enum)]
    policy: Option<Policy>,
    #[arg(long)]
    archive_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    Delete,
    Archive,
}

#[tokio::main]
async fn main() -> ExitCode {
    config::load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => run(args).await,
        Command::Upload { file, folder, name } => upload(&file, folder, name).await,
        Command::Catalog => list_catalog(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical error, run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: RunArgs) -> PipelineResult<()> {
    let mut pipeline_config = PipelineConfig::from_env()?;
    if let Some(source) = args.source {
        pipeline_config.source_pattern = source;
    }
    let archive_root = args.archive_root.unwrap_or_else(|| match &pipeline_config.cleanup {
        CleanupPolicy::Archive { root } => root.clone(),
        CleanupPolicy::Delete => PathBuf::from("clipes_editados"),
    });
    match args.policy {
        Some(Policy::Delete) => pipeline_config.cleanup = CleanupPolicy::Delete,
        Some(Policy::Archive) => {
            pipeline_config.cleanup = CleanupPolicy::Archive { root: archive_root }
        }
        None => {
            if let CleanupPolicy::Archive { root } = &mut pipeline_config.cleanup {
                *root = archive_root;
            }
        }
    }

    let caption_config = CaptionConfig::from_env()?;
    match StorageConfig::from_env()? {
        StorageConfig::S3(s3) => {
            run_batch(pipeline_config, S3Adapter::from_config(&s3), &caption_config).await
        }
        StorageConfig::Local {
            root,
            public_base_url,
        } => {
            run_batch(pipeline_config, FsAdapter::new(root, public_base_url), &caption_config).await
        }
    }
}

async fn run_batch<S: BlobStore>(
    pipeline_config: PipelineConfig,
    store: S,
    caption_config: &CaptionConfig,
) -> PipelineResult<()> {
    let mut pipeline = BatchPipeline::new(
        pipeline_config,
        FfmpegEditor::new(),
        store,
        GeminiClient::new(caption_config),
    );
    let report = pipeline.run().await?;

    println!(
        "Batch finished: {} recorded, {} skipped, {} failed",
        report.recorded(),
        report.skipped(),
        report.failed()
    );
    for (source, outcome) in report.items.iter().filter(|(_, o)| o.is_failure()) {
        println!("  {}: {:?}", source.display(), outcome);
    }
    Ok(())
}

async fn upload(file: &Path, folder: Option<String>, name: Option<String>) -> PipelineResult<()> {
    let folder = match folder {
        Some(folder) => folder,
        None => PipelineConfig::from_env()?.remote_folder,
    };
    let url = match StorageConfig::from_env()? {
        StorageConfig::S3(s3) => {
            publish_one(S3Adapter::from_config(&s3), file, &folder, name.as_deref()).await?
        }
        StorageConfig::Local {
            root,
            public_base_url,
        } => {
            publish_one(FsAdapter::new(root, public_base_url), file, &folder, name.as_deref())
                .await?
        }
    };
    println!("{}", url);
    Ok(())
}

async fn publish_one<S: BlobStore>(
    store: S,
    file: &Path,
    folder: &str,
    name: Option<&str>,
) -> PipelineResult<String> {
    UploadStage::new(store)
        .publish(file, folder, name)
        .await
        .map_err(|e| PipelineError::storage(e.to_string()))
}

fn list_catalog() -> PipelineResult<()> {
    let pipeline_config = PipelineConfig::from_env()?;
    let mut catalog = CatalogStore::new(&pipeline_config.catalog_path);
    let entries = catalog.load()?.len();
    let mut names: Vec<String> = catalog.processed_filenames()?.into_iter().collect();
    names.sort();

    println!(
        "{}: {} entries, {} processed filenames",
        pipeline_config.catalog_path.display(),
        entries,
        names.len()
    );
    for name in names {
        println!("  {}", name);
    }
    Ok(())
}
