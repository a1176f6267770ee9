//! Scout — a directory-aware assistant for the terminal.
//!
//! Typed lines are classified as either local filesystem commands (navigate,
//! list, create, remove — exact or phrased in natural language) or queries
//! forwarded to an OpenAI-compatible `/chat/completions` endpoint, with the
//! current directory listing and referenced file contents assembled into the
//! system prompt. Remote calls run as cancellable tasks behind a live
//! elapsed-time indicator.
//!
//! # Quick start
//!
//! ```no_run
//! use scout::api::QueryClient;
//! use scout::app::InteractionLoop;
//! use scout::config::load_config;
//! use scout::context::ContextAssembler;
//! use scout::router::RouteTable;
//! use scout::snapshot::DirectorySnapshot;
//! use scout::ui::{InputReader, Renderer};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let client = Arc::new(QueryClient::new(&config.api, Duration::from_secs(60)));
//! let snapshot = DirectorySnapshot::new(std::env::current_dir().unwrap());
//! let mut session = InteractionLoop::new(
//!     RouteTable::new(),
//!     snapshot,
//!     ContextAssembler::new(config.api.model.clone()),
//!     client,
//!     Renderer::new(config.display.color),
//!     InputReader::stdin(),
//! );
//! session.run().await;
//! # }
//! ```

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod router;
pub mod snapshot;
#[cfg(test)]
pub mod testsupport;
pub mod textutil;
pub mod types;
pub mod ui;
