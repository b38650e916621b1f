use super::{AppContext, BookmarkCommand};
use bookmark_parser::db::StatusFilter;
use bookmark_parser::error::{BookmarkError, Result};
use bookmark_parser::import_export::{self, DuplicateScope};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ParseCommand {
    pub file: PathBuf,
}

impl BookmarkCommand for ParseCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let scope = DuplicateScope::from_config(ctx.config.detect_in_batch_duplicates);
        let summary = import_export::import_file(ctx.db, &self.file, scope)?;
        println!("Successfully imported {} bookmarks", summary.imported);
        if summary.duplicates > 0 {
            eprintln!(
                "{} bookmark(s) share a URL with an earlier record and were flagged as duplicates",
                summary.duplicates
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ExportCommand {
    pub output: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub filter: StatusFilter,
}

impl BookmarkCommand for ExportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        if let Some(dir) = &self.dir {
            for (path, count) in import_export::export_all(ctx.db, dir)? {
                println!("Exported {} bookmark(s) to {}", count, path.display());
            }
            return Ok(());
        }

        let output = self.output.as_ref().ok_or_else(|| {
            BookmarkError::InvalidInput("export needs --output or --dir".to_string())
        })?;
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let count = import_export::export_bookmarks(ctx.db, self.filter, output)?;
        match self.filter {
            StatusFilter::Valid => println!(
                "Successfully exported valid bookmarks to {}",
                output.display()
            ),
            _ => println!(
                "Successfully exported {} bookmark(s) to {}",
                count,
                output.display()
            ),
        }
        Ok(())
    }
}
