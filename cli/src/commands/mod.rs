use bookmark_parser::config::Config;
use bookmark_parser::db::BookmarkDb;
use bookmark_parser::error::Result;

pub struct AppContext<'a> {
    pub db: &'a BookmarkDb,
    pub config: &'a Config,
}

pub mod import_export;
pub mod search;
pub mod validate;

pub trait BookmarkCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn BookmarkCommand>)
pub enum CommandEnum {
    Parse(import_export::ParseCommand),
    Search(search::SearchCommand),
    Validate(validate::ValidateCommand),
    Export(import_export::ExportCommand),
}

impl CommandEnum {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::Parse(cmd) => cmd.execute(ctx),
            Self::Search(cmd) => cmd.execute(ctx),
            Self::Validate(cmd) => cmd.execute(ctx),
            Self::Export(cmd) => cmd.execute(ctx),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::AppContext;
    use bookmark_parser::config::Config;
    use bookmark_parser::db::BookmarkDb;
    use bookmark_parser::models::Bookmark;

    pub struct TestEnv {
        pub db: BookmarkDb,
        pub config: Config,
    }

    impl TestEnv {
        pub fn new() -> Self {
            let db = BookmarkDb::init_in_memory().expect("Failed to init in-memory DB");
            Self {
                db,
                config: Config::default(),
            }
        }

        pub fn with_bookmarks(entries: &[(&str, &str, &str)]) -> Self {
            let env = Self::new();
            for (title, url, folder) in entries {
                env.db
                    .insert(&Bookmark::new(
                        title.to_string(),
                        url.to_string(),
                        folder.to_string(),
                    ))
                    .expect("Failed to insert bookmark");
            }
            env
        }

        pub fn ctx(&self) -> AppContext<'_> {
            AppContext {
                db: &self.db,
                config: &self.config,
            }
        }
    }
}
