use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use huecards::api;
use huecards::assets::{AssetCategory, AssetLoader};
use huecards::models::{AppConfig, ImageColorRecord};
use huecards::server;
use huecards::services::ColorExtractor;

#[derive(Parser)]
#[command(name = "huecards")]
#[command(about = "Image cards tagged with their dominant color")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print the dominant color of an image file
    Extract {
        /// Image file to analyze
        path: PathBuf,

        /// Number of k-means clusters (overrides config)
        #[arg(short, long)]
        clusters: Option<usize>,

        /// Square size the image is resized to before clustering (overrides config)
        #[arg(short, long)]
        resize: Option<u32>,

        /// RNG seed for reproducible results (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract the web front-end files
        #[arg(long = "static")]
        static_files: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Huecards API",
        description = "Image upload with dominant color extraction",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_upload, api::handle_manifest),
    components(schemas(api::UploadForm, api::UploadResponse, ImageColorRecord)),
    tags(
        (name = "Images", description = "Image upload and the image/color manifest")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Extract {
            path,
            clusters,
            resize,
            seed,
        }) => run_extract_command(&path, clusters, resize, seed),
        Some(Commands::Init {
            config,
            static_files,
            all,
            force,
            list,
        }) => run_init_command(config, static_files, all, force, list),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name).ok().map(PathBuf::from)
}

/// Asset loader with optional external paths from env vars
fn asset_loader_from_env() -> AssetLoader {
    AssetLoader::new(env_path("STATIC_DIR"), env_path("CONFIG_FILE"))
}

/// Compute the dominant color of one file (no server needed)
fn run_extract_command(
    path: &Path,
    clusters: Option<usize>,
    resize: Option<u32>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huecards=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load_from_assets(&asset_loader_from_env());
    let mut extraction = config.extraction;
    if let Some(k) = clusters {
        anyhow::ensure!(k > 0, "--clusters must be at least 1");
        extraction.clusters = k;
    }
    if let Some(size) = resize {
        anyhow::ensure!(size > 0, "--resize must be at least 1");
        extraction.resize = size;
    }
    if seed.is_some() {
        extraction.seed = seed;
    }

    let extractor = ColorExtractor::new(&extraction);
    let [r, g, b] = extractor
        .try_extract(path)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;

    println!("{r},{g},{b} #{r:02x}{g:02x}{b:02x}");

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    config: bool,
    static_files: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Static:");
        for f in AssetLoader::list_embedded(AssetCategory::Static) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    // Determine which categories to extract
    let mut categories = Vec::new();
    if all || static_files {
        categories.push(AssetCategory::Static);
    }
    if all || config {
        categories.push(AssetCategory::Config);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --static, or --config");
        eprintln!("\nRun 'huecards init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let report = asset_loader_from_env().init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let static_dir = std::env::var("STATIC_DIR").ok();
    let images_dir = std::env::var("IMAGES_DIR").ok();
    let colors_file = std::env::var("COLORS_FILE").ok();

    println!("Huecards v{VERSION}");
    println!("Image cards tagged with their dominant color\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    for (name, value) in [
        ("CONFIG_FILE", &config_file),
        ("STATIC_DIR ", &static_dir),
        ("IMAGES_DIR ", &images_dir),
        ("COLORS_FILE", &colors_file),
    ] {
        println!("  {name} = {}", value.as_deref().unwrap_or("(not set)"));
    }

    println!("\nAsset Sources:");

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:  {config_source}");

    let embedded_count = AssetLoader::list_embedded(AssetCategory::Static).len();
    match static_dir {
        Some(ref path) if Path::new(path).exists() => {
            let loader = AssetLoader::new(Some(PathBuf::from(path)), None);
            println!(
                "  Static:  {path} ({} files, {embedded_count} embedded)",
                loader.list_static().len()
            );
        }
        _ => println!("  Static:  embedded ({embedded_count} files)"),
    }

    // Storage locations as the server would resolve them
    let config = AppConfig::default().with_overrides(
        images_dir.map(PathBuf::from),
        colors_file.map(PathBuf::from),
    );
    println!("\nStorage:");
    println!("  Images:   {}", config.images_dir.display());
    println!("  Manifest: {}", config.colors_file.display());

    println!("\nCommands:");
    println!("  huecards serve     Start the HTTP server");
    println!("  huecards extract   Print the dominant color of an image");
    println!("  huecards init      Extract embedded assets");
    println!("\nRun 'huecards --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huecards=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let static_dir = env_path("STATIC_DIR");
    let config_file = env_path("CONFIG_FILE");
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let asset_loader = Arc::new(AssetLoader::new(static_dir.clone(), config_file.clone()));

    // Log asset sources
    tracing::info!(
        static_files = ?static_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        config = ?config_file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    let config = AppConfig::load_from_assets(&asset_loader)
        .with_overrides(env_path("IMAGES_DIR"), env_path("COLORS_FILE"));

    tracing::info!(
        images = %config.images_dir.display(),
        manifest = %config.colors_file.display(),
        "Storage configured"
    );

    // Create application state using shared server module
    let state = server::create_app_state(config, asset_loader)?;

    // Build router: start with shared routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Huecards server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
