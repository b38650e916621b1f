mod cli;
mod commands;
mod output;

use bookmark_parser::{config, db, error::Result, utils};
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Initialize logger; RUST_LOG still wins when set
    let default_level = if args.debug { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let db_path = if let Some(path) = &args.db {
        path.clone()
    } else {
        utils::get_default_dbdir().join("bookmarks.db")
    };

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = db::BookmarkDb::init(&db_path)?;
    log::debug!("Using database {}", db.get_path().display());

    // Load configuration
    let cfg = if let Some(config_path) = &args.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()
    };

    let ctx = commands::AppContext {
        db: &db,
        config: &cfg,
    };
    args.to_command().execute(&ctx)
}
