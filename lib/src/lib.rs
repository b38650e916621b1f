pub mod config;
pub mod db;
pub mod error;
pub mod import_export;
pub mod models;
pub mod utils;
pub mod validate;

// Re-export error types for convenience
pub use error::BookmarkError;
