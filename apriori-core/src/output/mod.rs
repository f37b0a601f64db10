pub mod writer;

// Re-export for easy access
pub use writer::ResultWriter;
