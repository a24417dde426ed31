use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use careerstack_core::CompanyRecord;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Accepted header spellings for the company-name column.
const NAME_HEADERS: &[&str] = &["Company Name", "company", "name"];

/// Accepted header spellings for the career-page-URL column.
const URL_HEADERS: &[&str] = &[
    "Career Page URL",
    "career",
    "career_page",
    "CareerPage",
    "career_page_url",
];

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to access company directory: {0}")]
    Io(#[from] io::Error),
    #[error("malformed company directory: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV-backed list of organizations and their career pages. Re-read on
/// every refresh, never cached. Extra columns (HQ, industry, flags) are
/// passed through unused.
pub struct CompanyDirectory {
    path: PathBuf,
}

impl CompanyDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the directory fresh. A missing file reads as empty; the
    /// caller decides whether empty is a configuration error.
    pub fn load(&self) -> Result<Vec<CompanyRecord>, DirectoryError> {
        let mut reader = match csv::Reader::from_path(&self.path) {
            Ok(reader) => reader,
            Err(err) => match err.kind() {
                csv::ErrorKind::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                    return Ok(Vec::new());
                }
                _ => return Err(err.into()),
            },
        };

        let headers = reader.headers()?.clone();
        let name_idx = find_column(&headers, NAME_HEADERS);
        let url_idx = find_column(&headers, URL_HEADERS);

        let mut companies = Vec::new();
        for record in reader.records() {
            let record = record?;
            let name = name_idx
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or("Unknown")
                .to_string();
            let url = url_idx
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(String::from);
            companies.push(CompanyRecord::new(name, url));
        }
        Ok(companies)
    }

    /// Atomically replaces the directory file by writing a temp file in
    /// the same directory and renaming it into place.
    pub fn replace(&self, contents: &[u8]) -> Result<(), DirectoryError> {
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|err| DirectoryError::Io(err.error))?;
        Ok(())
    }
}

fn find_column(headers: &csv::StringRecord, accepted: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        accepted
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(header.trim()))
    })
}
