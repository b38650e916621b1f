mod entities;
pub mod export;
pub mod import;

// Re-export main functions for convenience
pub use export::{export_all, export_bookmarks, BookmarkExporter, HtmlExporter};
pub use import::{
    import_bookmarks, import_file, parse_file, parse_reader, parse_str, BookmarkImporter,
    DuplicateScope, HtmlImporter, ImportSummary,
};
