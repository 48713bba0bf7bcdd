//! Photo Gallery - a small self-hosted photo album.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photo_gallery::{
    config::{Cli, Command, Config},
    gallery::{ImageIndex, Paginator},
    server::{create_router, RouterConfig},
    session::CredentialStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(config) => run_serve(config).await,
        Command::Check(config) => run_check(config),
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: Config) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    // Credentials are the one startup failure that stops the process
    let credentials = match CredentialStore::load(&config.credentials) {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let index = load_index(&config);
    let page_count = Paginator::new(config.page_size).page_count(&index);

    info!("Configuration:");
    info!("  Originals: {}", config.originals_dir.display());
    info!("  Compressed: {}", config.compressed_dir.display());
    info!(
        "  Images: {} ({} pages of {})",
        index.len(),
        page_count,
        config.page_size
    );
    info!("  Users: {}", credentials.len());
    info!(
        "  Sessions: expire after {}s idle, at most {}",
        config.session_ttl, config.max_sessions
    );
    if config.protect_assets {
        info!("  Assets: login required");
    } else {
        warn!("  Assets: PUBLIC - static files and downloads skip the login");
    }

    let router = create_router(index, credentials, build_router_config(&config));

    let addr = config.bind_address();
    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Build the image index, falling back to an empty gallery on failure.
fn load_index(config: &Config) -> ImageIndex {
    match ImageIndex::build(&config.compressed_dir, config.extension()) {
        Ok(index) => index,
        Err(e) => {
            warn!("{}; serving an empty gallery", e);
            ImageIndex::default()
        }
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "photo_gallery=debug,tower_http=debug"
    } else {
        "photo_gallery=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    RouterConfig::new(config.session_secret.clone())
        .with_page_size(config.page_size)
        .with_columns(config.columns)
        .with_title(config.title.clone())
        .with_image_dirs(config.originals_dir.clone(), config.compressed_dir.clone())
        .with_extension(config.extension())
        .with_archive_name(config.archive_name.clone())
        .with_cache_max_age(config.cache_max_age)
        .with_protect_assets(config.protect_assets)
        .with_session_limits(config.session_ttl(), config.max_sessions)
        .with_tracing(!config.no_tracing)
}

// =============================================================================
// Check Command
// =============================================================================

fn run_check(config: Config) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    println!("Photo Gallery Configuration Check");
    println!("═════════════════════════════════");
    println!();

    if let Err(e) = config.validate() {
        println!("✗ Configuration: {}", e);
        return ExitCode::FAILURE;
    }
    println!("✓ Configuration");

    match CredentialStore::load(&config.credentials) {
        Ok(credentials) => println!("✓ Credentials: {} user(s)", credentials.len()),
        Err(e) => {
            println!("✗ Credentials: {}", e);
            return ExitCode::FAILURE;
        }
    }

    match ImageIndex::build(&config.compressed_dir, config.extension()) {
        Ok(index) => {
            let page_count = Paginator::new(config.page_size).page_count(&index);
            println!(
                "✓ Images: {} in {} ({} page(s) of {})",
                index.len(),
                config.compressed_dir.display(),
                page_count,
                config.page_size
            );
        }
        Err(e) => println!("! Images: {} (gallery will be empty)", e),
    }

    let archive = config.originals_dir.join(&config.archive_name);
    if archive.is_file() {
        println!("✓ Archive: {}", archive.display());
    } else {
        println!("! Archive: {} not found (bulk download will 404)", archive.display());
    }

    println!();
    println!("═════════════════════════════════");
    println!("✓ All required checks passed!");

    ExitCode::SUCCESS
}
