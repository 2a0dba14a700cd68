//! Domain models with validation at construction
//!
//! Message fields are validated when these types are built, so the store
//! never sees an empty body or username.

pub mod message;
pub mod validation;

pub use message::{MessageBody, NewMessage, Username};
pub use validation::ValidationError;
