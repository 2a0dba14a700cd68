//! Database layer - store trait, connection pool and implementations
//!
//! # Design Principles
//!
//! - One SQL statement (or one transaction) per store operation
//! - Rely on DB constraints and RETURNING - no check-then-write
//! - Handlers only ever see `dyn MessageStore`

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use memory::MemoryMessageStore;
pub use pool::{create_pool, PoolSettings};
pub use repos::PgMessageStore;
pub use store::{Message, MessageStore, StoreError};
