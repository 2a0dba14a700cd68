//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses RETURNING so writes hand back the stored row in one round trip
//! - Maps "no row" to `StoreError::NotFound` (no check-then-write)
//! - Uses transactions for multi-step operations

pub mod messages;

pub use messages::PgMessageStore;
