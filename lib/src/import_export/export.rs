use super::entities::escape_html;
use crate::db::{BookmarkDb, StatusFilter};
use crate::error::Result;
use crate::models::Bookmark;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Trait for exporting bookmarks to different formats
pub trait BookmarkExporter {
    fn export(&self, bookmarks: &[Bookmark], path: &Path) -> Result<()>;
}

/// Records sharing a folder label, in the order they were read
#[derive(Debug)]
pub struct FolderGroup<'a> {
    pub folder: &'a str,
    pub bookmarks: Vec<&'a Bookmark>,
}

/// Group records by folder. Folders appear in the order they are first seen and
/// records keep their relative order inside each folder.
pub fn group_by_folder(records: &[Bookmark]) -> Vec<FolderGroup<'_>> {
    let mut groups: Vec<FolderGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let folder = record.folder.as_str();
        let slot = *index.entry(folder).or_insert_with(|| {
            groups.push(FolderGroup {
                folder,
                bookmarks: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].bookmarks.push(record);
    }

    groups
}

/// HTML/Netscape Bookmark File exporter
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    /// Used for both the TITLE and the H1 banner
    pub title: String,
    /// Append "(Redirects to: ...)" after every link
    pub annotate_redirects: bool,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self {
            title: "Bookmarks".to_string(),
            annotate_redirects: false,
        }
    }
}

impl HtmlExporter {
    pub fn for_filter(filter: StatusFilter) -> Self {
        let title = match filter {
            StatusFilter::Valid => "Bookmarks",
            StatusFilter::Dead => "Dead Links",
            StatusFilter::Redirects => "Redirecting Bookmarks",
            StatusFilter::All => "All Bookmarks",
        };
        Self {
            title: title.to_string(),
            annotate_redirects: filter == StatusFilter::Redirects,
        }
    }

    pub fn write_to<W: Write>(&self, records: &[Bookmark], mut out: W) -> Result<()> {
        writeln!(out, "<!DOCTYPE NETSCAPE-Bookmark-file-1>")?;
        writeln!(out, "<!-- This is an automatically generated file.")?;
        writeln!(out, "     It will be read and overwritten.")?;
        writeln!(out, "     DO NOT EDIT! -->")?;
        writeln!(
            out,
            "<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">"
        )?;
        writeln!(out, "<TITLE>{}</TITLE>", self.title)?;
        writeln!(out, "<H1>{}</H1>", self.title)?;
        writeln!(out, "<DL><p>")?;

        for group in group_by_folder(records) {
            let wrapped = !group.folder.is_empty();
            if wrapped {
                writeln!(out, "    <DT><H3>{}</H3>", escape_html(group.folder))?;
                writeln!(out, "    <DL><p>")?;
            }

            for bookmark in group.bookmarks {
                write!(
                    out,
                    "        <DT><A HREF=\"{}\">{}</A>",
                    escape_html(&bookmark.url),
                    escape_html(&bookmark.title)
                )?;
                if self.annotate_redirects {
                    write!(
                        out,
                        " (Redirects to: {})",
                        escape_html(bookmark.redirect_url.as_deref().unwrap_or_default())
                    )?;
                }
                writeln!(out)?;
            }

            if wrapped {
                writeln!(out, "    </DL><p>")?;
            }
        }

        writeln!(out, "</DL><p>")?;
        out.flush()?;
        Ok(())
    }
}

impl BookmarkExporter for HtmlExporter {
    fn export(&self, records: &[Bookmark], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(records, BufWriter::new(file))
    }
}

/// File name used for each filter when exporting into a directory
pub fn default_file_name(filter: StatusFilter) -> &'static str {
    match filter {
        StatusFilter::Valid => "bookmarks.html",
        StatusFilter::Dead => "dead-links.html",
        StatusFilter::Redirects => "redirects.html",
        StatusFilter::All => "all-bookmarks.html",
    }
}

/// Export one filtered, folder-ordered slice of the store. Returns the record count.
pub fn export_bookmarks(db: &BookmarkDb, filter: StatusFilter, path: &Path) -> Result<usize> {
    let records = db.list_filtered(filter)?;
    HtmlExporter::for_filter(filter).export(&records, path)?;
    log::info!(
        "Exported {} {:?} bookmark(s) to {}",
        records.len(),
        filter,
        path.display()
    );
    Ok(records.len())
}

/// Write valid, dead and redirecting bookmarks into separate files under `dir`
pub fn export_all(db: &BookmarkDb, dir: &Path) -> Result<Vec<(PathBuf, usize)>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for filter in [StatusFilter::Valid, StatusFilter::Dead, StatusFilter::Redirects] {
        let path = dir.join(default_file_name(filter));
        let count = export_bookmarks(db, filter, &path)?;
        written.push((path, count));
    }
    Ok(written)
}
