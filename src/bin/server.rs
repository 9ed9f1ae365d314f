use std::{env, fs::OpenOptions, net::SocketAddr, process::ExitCode, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use belocal::{
    AppState, DEFAULT_TABLE, PriceTable, build_router, graceful_shutdown, logging_middleware,
};

/// The environment variable holding the API key for the price table.
const API_KEY_VAR: &str = "TABLE_API_KEY";

/// The web server for BeLocal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the project hosting the price table, e.g. "https://example.supabase.co".
    #[arg(long)]
    table_url: String,

    /// The name of the price table.
    #[arg(long, default_value = DEFAULT_TABLE)]
    table: String,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let Ok(api_key) = env::var(API_KEY_VAR) else {
        tracing::error!("The environment variable '{API_KEY_VAR}' must be set");
        return ExitCode::FAILURE;
    };

    let price_table = match PriceTable::new(&args.table_url, &args.table, &api_key) {
        Ok(price_table) => price_table,
        Err(error) => {
            tracing::error!("Could not set up the price table: {error}");
            return ExitCode::FAILURE;
        }
    };

    match price_table.check_connection().await {
        Ok(()) => tracing::info!("Connected to the price table at {}", price_table.rows_url()),
        Err(error) => tracing::warn!(
            "Could not read from the price table at {}, price checks will fail until it is reachable: {error}",
            price_table.rows_url()
        ),
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(AppState::new(price_table))
        .layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging() {
    let stdout_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let debug_log = match OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
    {
        Ok(log_file) => Some(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_ansi(false)
                .with_writer(Arc::new(log_file))
                .with_filter(LevelFilter::DEBUG),
        ),
        Err(error) => {
            eprintln!("Could not open debug.log, logging to stdout only: {error}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Failed lookups are logged where they happen.
        .on_failure(());

    router.layer(tracing_layer)
}
