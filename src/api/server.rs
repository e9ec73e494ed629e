//! Router assembly and the HTTP listener.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{accounts, achievements, analytics, quests, rewards, social};
use crate::game::notify::Notifier;
use crate::game::storage::GameStore;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<GameStore>,
    pub notifier: Arc<dyn Notifier>,
    /// Coins granted at registration.
    pub starting_coins: i64,
    /// Gems granted at registration.
    pub starting_gems: i64,
    /// Emails promoted to the admin role at registration.
    pub admin_emails: Vec<String>,
}

/// Build the axum router (separated from [`serve`] for testing).
pub fn router(state: AppState) -> Router {
    // The SPA calls from a different origin during development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/quests", get(quests::list).post(quests::create))
        .route(
            "/api/quests/:id",
            get(quests::fetch).put(quests::update).delete(quests::remove),
        )
        .route("/api/quests/:id/complete", post(quests::complete))
        .route("/api/rewards", get(rewards::list).post(rewards::create))
        .route("/api/rewards/:id/purchase", post(rewards::purchase))
        .route("/api/social", get(social::list).post(social::create))
        .route("/api/social/:id/join", post(social::join))
        .route("/api/social/:id/leave", post(social::leave))
        .route("/api/analytics/summary", get(analytics::summary))
        .route("/api/achievements", get(achievements::list))
        .route("/api/accounts", post(accounts::register))
        .route(
            "/api/profile",
            get(accounts::profile).put(accounts::update_profile),
        )
        .route("/api/friends", post(accounts::add_friend))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("questlog API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> StatusCode {
    StatusCode::OK
}
