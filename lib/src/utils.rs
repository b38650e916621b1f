use std::path::PathBuf;

/// Directory holding the bookmark database.
///
/// `BOOKMARK_PARSER_DBDIR` overrides the default `data/` directory relative to the
/// working directory.
pub fn get_default_dbdir() -> PathBuf {
    if let Ok(path) = std::env::var("BOOKMARK_PARSER_DBDIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("bookmark-parser");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/bookmark-parser");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("bookmark-parser");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
