use crate::error::Result;
use crate::models::status::{LinkCategory, StatusUpdate};
use std::fmt;
use std::fs;
use std::path::Path;

/// Counts accumulated over one validation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub total: usize,
    pub valid: usize,
    pub dead: usize,
    pub redirects: usize,
}

impl ValidationReport {
    pub fn record(&mut self, update: &StatusUpdate) {
        self.total += 1;
        match update.category() {
            LinkCategory::Dead => self.dead += 1,
            LinkCategory::Redirect => self.redirects += 1,
            LinkCategory::Valid => self.valid += 1,
        }
    }

    /// Write the plain-text summary, creating parent directories as needed
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bookmark Validation Report")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "Total URLs processed: {}", self.total)?;
        writeln!(f, "Valid URLs: {}", self.valid)?;
        writeln!(f, "Dead links: {}", self.dead)?;
        writeln!(f, "Redirects: {}", self.redirects)
    }
}
