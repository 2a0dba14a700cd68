//! msgboard-server: HTTP message board backend
//!
//! Clients create, list, update, and delete short text messages, each
//! attributed to a username and timestamped at creation. Messages live in
//! PostgreSQL (or in memory for tests and local runs) behind the
//! [`MessageStore`] trait.

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use db::{MemoryMessageStore, Message, MessageStore, PgMessageStore, StoreError};
pub use http::{build_router, run_server, ServerConfig, ServerError};
pub use state::AppState;
