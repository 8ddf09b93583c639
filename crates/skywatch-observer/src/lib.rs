//! Observer API server for the Skywatch engine.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **SSE endpoint** (`/api/events`) streaming a named `update` event
//!   to every subscriber each time the scheduler publishes a snapshot
//! - **REST endpoint** (`/api/data`) serving the latest snapshot on
//!   demand, or `503` before the first computation completes
//! - **Minimal HTML dashboard** (`GET /`) showing the current phase,
//!   subscriber count, and links to the API endpoints
//!
//! # Architecture
//!
//! The scheduler is the single writer: each tick it swaps a fresh
//! [`AstroSnapshot`] into the [`SnapshotStore`] and hands it to the
//! [`Broadcaster`], which serializes it once and fans the payload out
//! to every registered subscriber channel. REST reads take a cheap
//! `Arc` clone of the current snapshot and never block the tick cycle.
//! A subscriber whose channel has closed is pruned on the next publish
//! without disturbing the other channels.
//!
//! [`AstroSnapshot`]: skywatch_core::snapshot::AstroSnapshot
//! [`SnapshotStore`]: store::SnapshotStore
//! [`Broadcaster`]: broadcast::Broadcaster

pub mod broadcast;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod sse;
pub mod startup;
pub mod state;
pub mod store;

// Re-export primary types for convenience.
pub use broadcast::{Broadcaster, SubscriberId};
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;
pub use store::SnapshotStore;
