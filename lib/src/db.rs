use crate::models::{Bookmark, StatusUpdate};
use rusqlite::{Connection, OptionalExtension, Result, Row, Transaction};
use std::path::{Path, PathBuf};

const BOOKMARK_COLUMNS: &str =
    "id, title, url, folder, is_dead, is_redirect, redirect_url, is_duplicate, duplicate_of";

/// Which slice of the store a filtered read returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Neither dead nor redirecting
    Valid,
    Dead,
    Redirects,
    All,
}

impl StatusFilter {
    fn predicate(self) -> &'static str {
        match self {
            StatusFilter::Valid => "WHERE is_dead = FALSE AND is_redirect = FALSE",
            StatusFilter::Dead => "WHERE is_dead = TRUE",
            StatusFilter::Redirects => "WHERE is_redirect = TRUE",
            StatusFilter::All => "",
        }
    }
}

pub struct BookmarkDb {
    conn: Connection,
    db_path: PathBuf,
}

impl BookmarkDb {
    pub fn init_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        db.setup_tables()?;
        Ok(db)
    }

    pub fn init(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let db = Self {
            conn,
            db_path: db_path.to_path_buf(),
        };
        db.setup_tables()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn get_path(&self) -> &Path {
        &self.db_path
    }

    fn setup_tables(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS bookmarks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                url TEXT NOT NULL,
                folder TEXT,
                is_dead BOOLEAN DEFAULT FALSE,
                is_redirect BOOLEAN DEFAULT FALSE,
                redirect_url TEXT,
                is_duplicate BOOLEAN DEFAULT FALSE,
                duplicate_of INTEGER,
                FOREIGN KEY(duplicate_of) REFERENCES bookmarks(id)
            )",
            [],
        )?;

        // Exact-URL lookups run once per distinct URL on every import
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_bookmarks_url ON bookmarks(url)",
            [],
        )?;

        Ok(())
    }

    /// Start a transaction on the shared connection.
    ///
    /// Every statement issued through `self` until the returned guard is committed
    /// belongs to it; dropping the guard rolls all of them back.
    pub fn begin(&self) -> Result<Transaction<'_>> {
        self.conn.unchecked_transaction()
    }

    /// Insert a record, keeping its duplicate fields, and return the new id
    pub fn insert(&self, bookmark: &Bookmark) -> Result<usize> {
        self.conn.execute(
            "INSERT INTO bookmarks (title, url, folder, is_duplicate, duplicate_of)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                &bookmark.title,
                &bookmark.url,
                &bookmark.folder,
                bookmark.duplicate,
                bookmark.duplicate_of,
            ),
        )?;
        Ok(self.conn.last_insert_rowid() as usize)
    }

    /// Id of the oldest row whose URL is byte-for-byte equal to `url`
    pub fn find_by_url(&self, url: &str) -> Result<Option<usize>> {
        self.conn
            .query_row(
                "SELECT id FROM bookmarks WHERE url = ?1 ORDER BY id LIMIT 1",
                [url],
                |row| row.get(0),
            )
            .optional()
    }

    pub fn get_by_id(&self, id: usize) -> Result<Option<Bookmark>> {
        let sql = format!("SELECT {} FROM bookmarks WHERE id = ?1", BOOKMARK_COLUMNS);
        self.conn
            .query_row(&sql, [id], row_to_bookmark)
            .optional()
    }

    pub fn count(&self) -> Result<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))
    }

    /// Stream every `(id, url)` pair through `f` without materializing the table.
    ///
    /// Rows that fail to decode are handed to `f` as errors so the caller decides
    /// whether to abort.
    pub fn with_urls<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Iterator<Item = Result<(usize, String)>>) -> T,
    {
        let mut stmt = self.conn.prepare("SELECT id, url FROM bookmarks ORDER BY id")?;
        let mut rows = stmt.query_map([], |row| {
            Ok((row.get::<_, usize>(0)?, row.get::<_, String>(1)?))
        })?;
        let output = f(&mut rows);
        Ok(output)
    }

    /// Apply validation outcomes in a single transaction with one prepared statement.
    /// Any failing row rolls back the whole batch.
    pub fn update_status_batch(&self, updates: &[StatusUpdate]) -> Result<usize> {
        if updates.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "UPDATE bookmarks SET is_dead = ?1, is_redirect = ?2, redirect_url = ?3 WHERE id = ?4",
            )?;
            for update in updates {
                stmt.execute((
                    update.dead,
                    update.redirect,
                    update.redirect_url.as_deref(),
                    update.id,
                ))?;
            }
        }
        tx.commit()?;
        Ok(updates.len())
    }

    /// Filtered read ordered by folder, then title
    pub fn list_filtered(&self, filter: StatusFilter) -> Result<Vec<Bookmark>> {
        let sql = format!(
            "SELECT {} FROM bookmarks {} ORDER BY folder, title",
            BOOKMARK_COLUMNS,
            filter.predicate()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], row_to_bookmark)?
            .collect::<Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Substring match on title or URL
    pub fn search(&self, query: &str) -> Result<Vec<Bookmark>> {
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE title LIKE ?1 OR url LIKE ?1 ORDER BY id",
            BOOKMARK_COLUMNS
        );
        let pattern = format!("%{}%", query);
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([pattern], row_to_bookmark)?
            .collect::<Result<Vec<_>>>()?;
        Ok(records)
    }
}

fn row_to_bookmark(row: &Row<'_>) -> Result<Bookmark> {
    Ok(Bookmark {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        url: row.get(2)?,
        folder: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        dead: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
        redirect: row.get::<_, Option<bool>>(5)?.unwrap_or(false),
        redirect_url: row.get(6)?,
        duplicate: row.get::<_, Option<bool>>(7)?.unwrap_or(false),
        duplicate_of: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bm(title: &str, url: &str, folder: &str) -> Bookmark {
        Bookmark::new(title.to_string(), url.to_string(), folder.to_string())
    }

    fn seeded_db() -> BookmarkDb {
        let db = BookmarkDb::init_in_memory().unwrap();
        db.insert(&bm("Rust", "https://rust-lang.org", "Dev")).unwrap();
        db.insert(&bm("Gone", "https://gone.test", "Dev")).unwrap();
        db.insert(&bm("Moved", "https://moved.test", "News")).unwrap();
        db.insert(&bm("Loose", "https://loose.test", "")).unwrap();
        db.update_status_batch(&[
            StatusUpdate::dead(2),
            StatusUpdate::redirected(3, "https://new.test/"),
        ])
        .unwrap();
        db
    }

    #[test]
    fn test_insert_assigns_ids() {
        let db = BookmarkDb::init_in_memory().unwrap();
        let first = db.insert(&bm("A", "https://a.test", "")).unwrap();
        let second = db.insert(&bm("B", "https://b.test", "")).unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(db.count().unwrap(), 2);
    }

    #[test]
    fn test_same_url_is_stored_twice() {
        let db = BookmarkDb::init_in_memory().unwrap();
        db.insert(&bm("A", "https://a.test", "")).unwrap();
        assert!(db.insert(&bm("A again", "https://a.test", "")).is_ok());
        assert_eq!(db.count().unwrap(), 2);
    }

    #[test]
    fn test_get_by_id_round_trip() {
        let db = BookmarkDb::init_in_memory().unwrap();
        let mut record = bm("Example", "https://example.com", "Work");
        record.duplicate = true;
        record.duplicate_of = None;
        let id = db.insert(&record).unwrap();

        let stored = db.get_by_id(id).unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.title, "Example");
        assert_eq!(stored.folder, "Work");
        assert!(stored.duplicate);
        assert!(!stored.dead);
        assert!(stored.redirect_url.is_none());
    }

    #[test]
    fn test_get_by_id_not_found() {
        let db = BookmarkDb::init_in_memory().unwrap();
        assert!(db.get_by_id(999).unwrap().is_none());
    }

    #[test]
    fn test_find_by_url_is_exact() {
        let db = BookmarkDb::init_in_memory().unwrap();
        let id = db.insert(&bm("A", "https://a.test/path", "")).unwrap();

        assert_eq!(db.find_by_url("https://a.test/path").unwrap(), Some(id));
        assert_eq!(db.find_by_url("https://a.test/path/").unwrap(), None);
        assert_eq!(db.find_by_url("HTTPS://A.TEST/path").unwrap(), None);
    }

    #[test]
    fn test_find_by_url_returns_oldest() {
        let db = BookmarkDb::init_in_memory().unwrap();
        let first = db.insert(&bm("A", "https://a.test", "")).unwrap();
        db.insert(&bm("A2", "https://a.test", "")).unwrap();
        assert_eq!(db.find_by_url("https://a.test").unwrap(), Some(first));
    }

    #[test]
    fn test_update_status_sets_fields() {
        let db = seeded_db();
        let moved = db.get_by_id(3).unwrap().unwrap();
        assert!(moved.redirect);
        assert!(!moved.dead);
        assert_eq!(moved.redirect_url.as_deref(), Some("https://new.test/"));
    }

    #[test]
    fn test_update_status_batch_rolls_back_on_failure() {
        let db = seeded_db();
        db.conn
            .execute_batch(
                "CREATE TRIGGER reject_four BEFORE UPDATE ON bookmarks WHEN old.id = 4
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let updates = vec![StatusUpdate::dead(1), StatusUpdate::dead(4)];
        assert!(db.update_status_batch(&updates).is_err());

        // Row 1 was updated before the failure and must have been rolled back
        assert!(!db.get_by_id(1).unwrap().unwrap().dead);
    }

    #[test]
    fn test_with_urls_in_id_order() {
        let db = seeded_db();
        let urls = db
            .with_urls(|rows| rows.collect::<Result<Vec<_>>>())
            .unwrap()
            .unwrap();
        assert_eq!(urls.len(), 4);
        assert_eq!(urls[0], (1, "https://rust-lang.org".to_string()));
        assert_eq!(urls[3].0, 4);
    }

    #[rstest]
    #[case(StatusFilter::Valid, vec!["Loose", "Rust"])]
    #[case(StatusFilter::Dead, vec!["Gone"])]
    #[case(StatusFilter::Redirects, vec!["Moved"])]
    #[case(StatusFilter::All, vec!["Loose", "Gone", "Rust", "Moved"])]
    fn test_list_filtered(#[case] filter: StatusFilter, #[case] expected: Vec<&str>) {
        let db = seeded_db();
        let titles: Vec<String> = db
            .list_filtered(filter)
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, expected);
    }

    #[rstest]
    #[case("rust", 1)]
    #[case("test", 3)]
    #[case("Moved", 1)]
    #[case("nothing-here", 0)]
    fn test_search(#[case] query: &str, #[case] expected: usize) {
        let db = seeded_db();
        assert_eq!(db.search(query).unwrap().len(), expected);
    }

    #[test]
    fn test_uncommitted_transaction_rolls_back() {
        let db = BookmarkDb::init_in_memory().unwrap();
        {
            let _tx = db.begin().unwrap();
            db.insert(&bm("A", "https://a.test", "")).unwrap();
        }
        assert_eq!(db.count().unwrap(), 0);
    }
}
