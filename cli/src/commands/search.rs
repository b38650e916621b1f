use super::{AppContext, BookmarkCommand};
use crate::output::{format_plain, Colorize, ColorizeBookmark};
use bookmark_parser::error::Result;

#[derive(Debug, Clone)]
pub struct SearchCommand {
    pub query: String,
    pub nc: bool,
}

impl BookmarkCommand for SearchCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let records = ctx.db.search(&self.query)?;
        log::debug!("{} record(s) match {:?}", records.len(), self.query);

        if records.is_empty() {
            println!("No bookmarks found matching your query");
            return Ok(());
        }

        for bookmark in &records {
            if self.nc {
                print!("{}", format_plain(bookmark));
            } else {
                print!("{}", ColorizeBookmark(bookmark).to_colored());
            }
        }
        Ok(())
    }
}
