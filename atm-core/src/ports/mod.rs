//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Services depend
//! only on these traits, not on concrete implementations.

mod repository;
mod terminal;

pub use repository::AccountRepository;
pub use terminal::{Terminal, Tone};
