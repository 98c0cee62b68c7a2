use clap::Parser;
use std::path::PathBuf;
use swatch_core::resolver::VariantResolver;
use swatch_engine::cli::{self, OutputHandlers};
use swatch_engine::config::loader::ConfigLoader;
use swatch_engine::executor::CommandExecutor;
use swatch_engine::fragment::HttpFragmentSource;
use swatch_engine::session::VariantSession;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swatch", version, about = "Variant selection CLI for storefront products")]
struct Args {
    /// Product variant payload (JSON array of variants or product object)
    #[arg(long)]
    payload: PathBuf,

    /// Config file (defaults to ./swatch.yaml, then ~/.swatch/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Storefront origin used for fragment requests
    #[arg(long)]
    base_url: Option<String>,

    /// Script to execute (non-interactive mode)
    #[arg(long)]
    file: Option<String>,

    /// Initial selection, one value per axis ('-' leaves an axis unset)
    #[arg(long, num_args = 1.., value_name = "VALUE")]
    select: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from(path).await?,
        None => ConfigLoader::load_default().await?,
    };
    if let Some(base_url) = args.base_url {
        config.fragments.base_url = Some(base_url);
    }

    let payload = tokio::fs::read_to_string(&args.payload).await?;
    let mut resolver = match VariantResolver::from_json(&payload) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.payload.display(), e);
            return Err(e.into());
        }
    };
    tracing::info!(
        axes = resolver.axis_count(),
        variants = resolver.table().variants().len(),
        "Loaded variant payload"
    );

    if !args.select.is_empty() {
        resolver.set_selection(
            args.select
                .iter()
                .map(|value| (value != "-").then(|| value.clone())),
        );
    }

    let mut executor = if config.fragments.base_url.is_some() {
        CommandExecutor::with_source(Box::new(HttpFragmentSource::from_config(
            &config.fragments,
        )?))
    } else {
        CommandExecutor::new()
    };
    let mut session = VariantSession::new(resolver, config);

    let output = OutputHandlers {
        out: |msg| println!("{}", msg),
        err: |msg| eprintln!("{}", msg),
    };

    if let Some(file_path) = args.file {
        if let Err(e) = cli::run_file(&mut session, &mut executor, output, &file_path).await {
            eprintln!("Error executing file {}: {}", file_path, e);
            return Err(e.into());
        }
    } else if let Err(e) = cli::run_repl(&mut session, &mut executor, output).await {
        eprintln!("Error during session: {}", e);
        return Err(e.into());
    }

    Ok(())
}
