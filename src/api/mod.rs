//! REST layer: axum router, per-resource handlers, and the error / identity
//! plumbing shared between them. The router is built separately from the
//! listener so integration tests can drive it with `tower::ServiceExt`.

pub mod accounts;
pub mod achievements;
pub mod analytics;
pub mod error;
pub mod identity;
pub mod quests;
pub mod rewards;
pub mod server;
pub mod social;

pub use error::ApiError;
pub use identity::Identity;
pub use server::{router, serve, AppState};
