/// A bookmark and everything import, validation and export record about it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmark {
    /// Store-assigned id, `None` until the record is inserted
    pub id: Option<usize>,
    pub title: String,
    pub url: String,
    /// Folder label inferred from the most recent heading; may be empty
    pub folder: String,
    pub dead: bool,
    pub redirect: bool,
    /// Final URL after redirects, only set when `redirect` is true
    pub redirect_url: Option<String>,
    pub duplicate: bool,
    /// Id of the earlier row sharing this URL
    pub duplicate_of: Option<usize>,
}

impl Bookmark {
    /// Create an unpersisted, unvalidated bookmark as produced by the parser
    pub fn new(title: String, url: String, folder: String) -> Self {
        Self {
            title,
            url,
            folder,
            ..Self::default()
        }
    }

    /// Neither dead nor redirecting
    pub fn is_valid(&self) -> bool {
        !self.dead && !self.redirect
    }
}
