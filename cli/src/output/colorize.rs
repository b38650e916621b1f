use bookmark_parser::models::Bookmark;
use owo_colors::OwoColorize;

pub trait Colorize {
    fn to_colored(&self) -> String;
}

pub struct ColorizeBookmark<'a>(pub &'a Bookmark);

fn status_line(bookmark: &Bookmark) -> Option<&'static str> {
    if bookmark.dead {
        Some("Dead link")
    } else if bookmark.redirect {
        Some("Redirects to another location")
    } else {
        None
    }
}

/// Search result block without escape codes
pub fn format_plain(bookmark: &Bookmark) -> String {
    let mut s = format!(
        "\nTitle: {}\nURL: {}\nFolder: {}\n",
        bookmark.title, bookmark.url, bookmark.folder
    );
    if let Some(status) = status_line(bookmark) {
        s.push_str(&format!("Status: {}\n", status));
    }
    if let Some(target) = bookmark.redirect_url.as_deref().filter(|_| bookmark.redirect) {
        s.push_str(&format!("Redirect URL: {}\n", target));
    }
    s
}

impl<'a> Colorize for ColorizeBookmark<'a> {
    fn to_colored(&self) -> String {
        let b = self.0;
        let mut s = String::new();
        s.push_str(&format!("\n{} {}\n", "Title:".bold(), b.title.green()));
        s.push_str(&format!("{} {}\n", "URL:".bold(), b.url.yellow()));
        s.push_str(&format!("{} {}\n", "Folder:".bold(), b.folder.blue()));

        if let Some(status) = status_line(b) {
            let status = if b.dead {
                status.red().to_string()
            } else {
                status.cyan().to_string()
            };
            s.push_str(&format!("{} {}\n", "Status:".bold(), status));
        }
        if let Some(target) = b.redirect_url.as_deref().filter(|_| b.redirect) {
            s.push_str(&format!("{} {}\n", "Redirect URL:".bold(), target.cyan()));
        }
        s
    }
}
