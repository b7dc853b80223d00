use darkroom_common::config::Config;
use darkroom_common::image::{Image, ImageError};
use darkroom_engine::FilterStack;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("image task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (PathBuf::from(input), PathBuf::from(output)),
        _ => {
            eprintln!("usage: darkroom <input> <output> [config.toml]");
            std::process::exit(2);
        }
    };
    let config_path = args.next().map(PathBuf::from);

    let config = match load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.parse().unwrap_or_default()),
        )
        .init();

    info!(
        input = %input.display(),
        output = %output.display(),
        filters = config.filters.len(),
        max_dimension = config.render.max_dimension,
        jpeg_quality = config.render.jpeg_quality,
        "starting darkroom render"
    );

    if let Err(e) = render(&input, &output, &config).await {
        error!(error = %e, "render failed");
        std::process::exit(1);
    }
}

/// An explicit path must exist; the default `config.toml` is optional.
fn load_config(path: Option<&Path>) -> Result<Config, darkroom_common::config::ConfigError> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if default.exists() {
                Config::load(default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

async fn render(input: &Path, output: &Path, config: &Config) -> Result<(), RenderError> {
    let started = Instant::now();

    let path = input.to_path_buf();
    let max_dimension = config.render.max_dimension;
    let source = tokio::task::spawn_blocking(move || {
        Image::open(&path).map(|image| image.downscaled(max_dimension))
    })
    .await??;

    let stack = FilterStack::from_configs(&config.filters);
    let edited = stack.apply(&source).await;

    let path = output.to_path_buf();
    let quality = config.render.jpeg_quality;
    tokio::task::spawn_blocking(move || edited.save(&path, quality)).await??;

    info!(
        width = source.extent().width,
        height = source.extent().height,
        filters = stack.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "render complete"
    );
    Ok(())
}
