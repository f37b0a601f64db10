//! Transaction loaders
//!
//! Loaders turn raw input into `Transaction`s. Everything after this point
//! works on in-memory transactions and never touches the input format.
//!
//! ## Available Loaders
//!
//! - `WhitespaceLoader` - one transaction per line, whitespace-separated integers

pub mod loader;
pub mod whitespace;

pub use loader::TransactionLoader;
pub use whitespace::WhitespaceLoader;
