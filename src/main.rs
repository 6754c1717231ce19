mod error;
mod recipe;
mod store;
mod templates;
mod web;

use error::*;
use recipe::*;
use store::FsStore;
use templates::*;

extern crate log;
extern crate mime;

use axum::{
    self,
    extract::{Form, Path, Query, State},
    http,
    response::{self, IntoResponse},
    routing,
};
use clap::Parser;
use serde::Deserialize;
use tokio::{net, signal};
use tower_http::{services, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::borrow::Cow;
use std::sync::Arc;

#[derive(Parser)]
struct Args {
    #[arg(short, long, name = "recipes-dir")]
    recipes_dir: Option<std::path::PathBuf>,
    #[arg(short, long, default_value = "127.0.0.1")]
    ip: String,
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

pub struct AppState {
    repo: Repository,
}

type SharedAppState = Arc<AppState>;

impl AppState {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }
}

fn get_recipes_dir(recipes_dir: Option<&std::path::Path>) -> Cow<'_, std::path::Path> {
    if let Some(recipes_dir) = recipes_dir {
        recipes_dir.into()
    } else if let Ok(recipes_dir) = std::env::var("RECIPES_DIR") {
        std::path::PathBuf::from(recipes_dir).into()
    } else {
        std::path::Path::new("recipes").into()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C (SIGINT) signal.");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal.");
        },
    }

    tracing::info!("Initiating graceful shutdown...");
}

async fn handler_404() -> response::Response {
    (http::StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

fn app(state: SharedAppState) -> axum::Router {
    let trace_layer = trace::TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(tracing::Level::INFO));

    axum::Router::new()
        .route("/", routing::get(web::home))
        .route("/add", routing::post(web::add_recipe))
        .route("/recipe/:recipe_id", routing::get(web::view_recipe))
        .route("/delete/:recipe_id", routing::post(web::delete_recipe))
        .route("/search", routing::get(web::search))
        .route_service(
            "/style.css",
            services::ServeFile::new_with_mime("assets/static/style.css", &mime::TEXT_CSS_UTF_8),
        )
        .fallback(handler_404)
        .layer(trace_layer)
        .with_state(state)
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let tsf = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr);
    let tse = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "recipe_catalog=debug,tower_http=info".into());
    tracing_subscriber::registry().with(tsf).with(tse).init();

    log::info!("Starting...");

    let args = Args::parse();

    let recipes_dir = get_recipes_dir(args.recipes_dir.as_deref());
    let repo = Repository::new(FsStore::new(&recipes_dir));
    repo.ensure_ready()?;
    log::info!("recipes stored in {}", recipes_dir.display());

    let state = Arc::new(AppState::new(repo));

    let endpoint = format!("{}:{}", args.ip, args.port);
    let listener = net::TcpListener::bind(&endpoint).await?;
    log::info!("started: listening on {}", endpoint);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = serve().await {
        eprintln!("recipe-catalog: error: {}", err);
        std::process::exit(1);
    }
}
