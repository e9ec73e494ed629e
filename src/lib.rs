//! # Questlog - Gamified Quest Tracking Server
//!
//! Questlog turns personal goals into quests. Completing a quest pays out
//! experience, coins, and skill points; accumulated progress unlocks
//! achievements, raises the avatar's level, and funds cosmetic rewards.
//! Guilds give players a shared roster, and an analytics endpoint reports
//! streaks and totals.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use questlog::api::{self, AppState};
//! use questlog::config::Config;
//! use questlog::game::notify::LogNotifier;
//! use questlog::game::storage::GameStoreBuilder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let store = Arc::new(GameStoreBuilder::new(&config.storage.data_dir).open()?);
//!     let state = AppState {
//!         store,
//!         notifier: Arc::new(LogNotifier),
//!         starting_coins: config.game.starting_coins,
//!         starting_gems: config.game.starting_gems,
//!         admin_emails: config.game.admin_emails.clone(),
//!     };
//!     api::serve(state, &config.server.host, config.server.port).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - Domain layer: quests, progression, achievements, guilds,
//!   rewards, analytics, and the sled-backed store
//! - [`api`] - REST layer built on axum
//! - [`config`] - Configuration management and validation
//! - [`validation`] - Input validation for client-supplied fields
//! - [`logutil`] - Log sanitization helpers

pub mod api;
pub mod config;
pub mod game;
pub mod logutil;
pub mod validation;
