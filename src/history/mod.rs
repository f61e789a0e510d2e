//! History Log: append-only record of saved disease lookups.
//!
//! Stored as a one-column CSV (`disease`). Each append is a single write to a
//! file opened in append mode, so sequential writers never drop rows.

pub mod insights;

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::HistoryEntry;

pub const HISTORY_COLUMN: &str = "disease";

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed history file: {0}")]
    Csv(#[from] csv::Error),

    #[error("History file {0} has no 'disease' column")]
    MissingColumn(PathBuf),

    #[error("Cannot record an empty disease name")]
    EmptyDisease,
}

/// Handle on the history file. Cheap; holds only the path.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file (and its directory) if absent.
    pub fn append(&self, disease: &str) -> Result<(), HistoryError> {
        let disease = disease.trim();
        if disease.is_empty() {
            return Err(HistoryError::EmptyDisease);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;

        let len = file.metadata()?.len();
        let mut buf: Vec<u8> = Vec::new();
        if len == 0 {
            buf.extend_from_slice(HISTORY_COLUMN.as_bytes());
            buf.push(b'\n');
        } else {
            // Refuse to add rows that read_all could never return.
            if !has_history_column(&mut file)? {
                return Err(HistoryError::MissingColumn(self.path.clone()));
            }
            if !ends_with_newline(&mut file)? {
                buf.push(b'\n');
            }
        }

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(buf);
        writer.write_record([disease])?;
        let buf = writer
            .into_inner()
            .map_err(|e| HistoryError::Io(e.into_error()))?;

        file.write_all(&buf)?;
        debug!(disease = %disease, path = %self.path.display(), "History entry appended");
        Ok(())
    }

    /// All entries in append order. A missing file is an empty history.
    pub fn read_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&self.path)?;

        let column = reader
            .headers()?
            .iter()
            .position(|h| h == HISTORY_COLUMN)
            .ok_or_else(|| HistoryError::MissingColumn(self.path.clone()))?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record?;
            match record.get(column) {
                Some(disease) if !disease.is_empty() => entries.push(HistoryEntry::new(disease)),
                _ => {}
            }
        }

        info!(entries = entries.len(), path = %self.path.display(), "History loaded");
        Ok(entries)
    }
}

fn has_history_column(file: &mut std::fs::File) -> Result<bool, HistoryError> {
    file.seek(SeekFrom::Start(0))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);
    Ok(reader.headers()?.iter().any(|h| h == HISTORY_COLUMN))
}

fn ends_with_newline(file: &mut std::fs::File) -> Result<bool, std::io::Error> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
