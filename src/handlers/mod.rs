//! Business logic handlers
//!
//! These handlers contain the core business logic behind the HTTP API.

pub mod memory;

// Re-export commonly used types
pub use memory::*;
