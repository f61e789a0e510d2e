//! CSV readers for the four reference tables.
//!
//! Every table shares one shape: first column is the key, remaining columns
//! are positional values padded with blanks. Cells are trimmed, blank values
//! dropped, and a row with an empty key rejects the whole load.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use super::ReferenceError;

/// One keyed row: line number (1-based, header included), key, non-blank values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedRow {
    pub line: u64,
    pub key: String,
    pub values: Vec<String>,
}

/// Read a reference table into keyed rows, in file order.
pub fn read_keyed_rows(path: &Path) -> Result<Vec<KeyedRow>, ReferenceError> {
    if !path.is_file() {
        return Err(ReferenceError::MissingFile(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| ReferenceError::csv(path, e))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReferenceError::csv(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let mut fields = record.iter();
        let key = fields.next().unwrap_or_default();
        if key.is_empty() {
            return Err(ReferenceError::EmptyKey {
                file: path.to_path_buf(),
                line,
            });
        }

        let values = fields
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();

        rows.push(KeyedRow {
            line,
            key: key.to_string(),
            values,
        });
    }

    debug!(path = %path.display(), rows = rows.len(), "Read reference table");
    Ok(rows)
}

/// Disease -> symptom list. Repeated disease rows are merged: the union of
/// their symptoms in first-seen order. The first row's symptoms therefore
/// always lead the list; later rows only append symptoms it lacks, so a
/// first-row-only reading (duplicates dropped) is always a prefix of this one.
pub fn load_symptom_table(path: &Path) -> Result<BTreeMap<String, Vec<String>>, ReferenceError> {
    let mut table: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in read_keyed_rows(path)? {
        let symptoms = table.entry(row.key).or_default();
        for symptom in row.values {
            if !symptoms.contains(&symptom) {
                symptoms.push(symptom);
            }
        }
    }
    Ok(table)
}

/// Disease -> description. First row for a disease wins.
pub fn load_descriptions(path: &Path) -> Result<HashMap<String, String>, ReferenceError> {
    let mut table = HashMap::new();
    for row in read_keyed_rows(path)? {
        let description = row.values.into_iter().next().unwrap_or_default();
        table.entry(row.key).or_insert(description);
    }
    Ok(table)
}

/// Disease -> ordered precautions. First row for a disease wins.
pub fn load_precautions(path: &Path) -> Result<HashMap<String, Vec<String>>, ReferenceError> {
    let mut table = HashMap::new();
    for row in read_keyed_rows(path)? {
        table.entry(row.key).or_insert(row.values);
    }
    Ok(table)
}

/// Symptom -> severity weight. A repeated symptom takes its last weight.
pub fn load_severity(path: &Path) -> Result<HashMap<String, u32>, ReferenceError> {
    let mut table = HashMap::new();
    for row in read_keyed_rows(path)? {
        let raw = row.values.first().cloned().unwrap_or_default();
        let weight: u32 = raw.parse().map_err(|_| ReferenceError::InvalidWeight {
            file: path.to_path_buf(),
            line: row.line,
            symptom: row.key.clone(),
            value: raw.clone(),
        })?;
        table.insert(row.key, weight);
    }
    Ok(table)
}
