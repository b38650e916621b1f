use crate::db::BookmarkDb;
use super::entities::decode_entities;
use crate::error::{BookmarkError, Result};
use crate::models::Bookmark;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

/// Trait for importing bookmarks from different formats
pub trait BookmarkImporter {
    fn import(&self, db: &BookmarkDb, path: &Path) -> Result<ImportSummary>;
}

/// How far duplicate detection looks during an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateScope {
    /// Only rows that existed before the import started. Two same-URL records
    /// inside one batch are both stored as originals.
    #[default]
    StoreOnly,
    /// Rows stored before the import plus records inserted earlier in the same batch
    IncludeBatch,
}

impl DuplicateScope {
    pub fn from_config(detect_in_batch: bool) -> Self {
        if detect_in_batch {
            DuplicateScope::IncludeBatch
        } else {
            DuplicateScope::StoreOnly
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub duplicates: usize,
}

/// Parse a Netscape bookmark document.
///
/// Headings (`H3`) set a single current-folder label that applies to every link
/// visited afterwards in document order, whatever its depth, until the next
/// heading. Links that lack an `href` or a non-blank title are skipped. URLs,
/// titles and folder labels have character references resolved.
pub fn parse_str(html: &str) -> Result<Vec<Bookmark>> {
    let dom = tl::parse(html, tl::ParserOptions::default())?;
    let parser = dom.parser();

    let mut bookmarks = Vec::new();
    let mut current_folder = String::new();

    // The node arena is laid out in document order (a depth-first pre-order walk)
    for node in dom.nodes() {
        let Some(tag) = node.as_tag() else {
            continue;
        };
        let tag_name = tag.name().as_utf8_str();

        if tag_name.eq_ignore_ascii_case("h3") {
            let heading = decode_entities(tag.inner_text(parser).trim());
            if !heading.is_empty() {
                current_folder = heading;
            }
        } else if tag_name.eq_ignore_ascii_case("a") {
            let url = tag
                .attributes()
                .get("HREF")
                .or_else(|| tag.attributes().get("href"))
                .flatten()
                .map(|h| decode_entities(&h.as_utf8_str()))
                .unwrap_or_default();
            let title = first_text(tag, parser);

            if url.is_empty() || title.is_empty() {
                log::debug!("Skipping link without url or title: {:?}", url);
                continue;
            }

            bookmarks.push(Bookmark::new(title, url, current_folder.clone()));
        }
    }

    log::info!("Parsed {} bookmark(s)", bookmarks.len());
    Ok(bookmarks)
}

/// Text of the link's first child node, so markup after the leading text is
/// not part of the title
fn first_text(tag: &tl::HTMLTag<'_>, parser: &tl::Parser<'_>) -> String {
    tag.children()
        .top()
        .get(0)
        .and_then(|handle| handle.get(parser))
        .map(|node| decode_entities(node.inner_text(parser).trim()))
        .unwrap_or_default()
}

/// Parse a bookmark document from any byte stream. The stream must be UTF-8.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Vec<Bookmark>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| input_error("<stream>", e))?;
    let html = String::from_utf8(bytes).map_err(|e| input_error("<stream>", e))?;
    parse_str(&html)
}

pub fn parse_file(path: &Path) -> Result<Vec<Bookmark>> {
    let bytes = std::fs::read(path).map_err(|e| input_error(&path.display().to_string(), e))?;
    let html =
        String::from_utf8(bytes).map_err(|e| input_error(&path.display().to_string(), e))?;
    parse_str(&html)
}

fn input_error(path: &str, reason: impl std::fmt::Display) -> BookmarkError {
    BookmarkError::Input {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Look up each distinct incoming URL once and remember the existing row id
fn snapshot_existing(db: &BookmarkDb, bookmarks: &[Bookmark]) -> Result<HashMap<String, usize>> {
    let mut seen = HashSet::new();
    let mut existing = HashMap::new();

    for bookmark in bookmarks {
        if !seen.insert(bookmark.url.as_str()) {
            continue;
        }
        if let Some(id) = db.find_by_url(&bookmark.url)? {
            existing.insert(bookmark.url.clone(), id);
        }
    }

    Ok(existing)
}

/// Store a parsed batch, marking records whose URL is already known as duplicates.
///
/// The whole batch is one transaction: a failing insert leaves the store untouched.
pub fn import_bookmarks(
    db: &BookmarkDb,
    bookmarks: &[Bookmark],
    scope: DuplicateScope,
) -> Result<ImportSummary> {
    let tx = db.begin()?;
    let mut known = snapshot_existing(db, bookmarks)?;
    let mut summary = ImportSummary::default();

    for bookmark in bookmarks {
        let mut record = bookmark.clone();
        record.id = None;
        match known.get(&record.url) {
            Some(&original) => {
                record.duplicate = true;
                record.duplicate_of = Some(original);
                summary.duplicates += 1;
                log::debug!("{} duplicates bookmark {}", record.url, original);
            }
            None => {
                record.duplicate = false;
                record.duplicate_of = None;
            }
        }

        let id = db.insert(&record)?;
        if scope == DuplicateScope::IncludeBatch {
            known.entry(record.url).or_insert(id);
        }
        summary.imported += 1;
    }

    tx.commit()?;
    log::info!(
        "Imported {} bookmark(s), {} duplicate(s)",
        summary.imported,
        summary.duplicates
    );
    Ok(summary)
}

/// HTML/Netscape Bookmark File importer
#[derive(Debug, Default)]
pub struct HtmlImporter {
    pub scope: DuplicateScope,
}

impl BookmarkImporter for HtmlImporter {
    fn import(&self, db: &BookmarkDb, path: &Path) -> Result<ImportSummary> {
        let bookmarks = parse_file(path)?;
        import_bookmarks(db, &bookmarks, self.scope)
    }
}

/// Import bookmarks from a browser HTML export file
pub fn import_file(db: &BookmarkDb, path: &Path, scope: DuplicateScope) -> Result<ImportSummary> {
    HtmlImporter { scope }.import(db, path)
}
