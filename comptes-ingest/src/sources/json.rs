//! Snapshot stored as a single JSON document, as returned by the data layer:
//! `{ "statements": [...], "balance_sheets": [...], "income_statements": [...] }`

use std::fs;
use std::path::Path;

use comptes_core::{BalanceSheet, CompanySnapshot, FinancialStatement, IncomeStatement};
use serde::Deserialize;

use crate::error::{IngestError, Result};
use crate::rows::snapshot_from_rows;

#[derive(Debug, Default, Deserialize)]
struct SnapshotDocument {
    statements: Vec<FinancialStatement>,
    #[serde(default)]
    balance_sheets: Vec<BalanceSheet>,
    #[serde(default)]
    income_statements: Vec<IncomeStatement>,
}

/// Load a snapshot from a JSON file at `path`.
pub fn load_snapshot_json(path: impl AsRef<Path>) -> Result<CompanySnapshot> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IngestError::MissingFile(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text, path)
}

/// Parse a JSON snapshot held in memory.
pub fn snapshot_from_json_str(text: &str) -> Result<CompanySnapshot> {
    parse(text, Path::new("<memory>"))
}

fn parse(text: &str, origin: &Path) -> Result<CompanySnapshot> {
    let doc: SnapshotDocument = serde_json::from_str(text).map_err(|source| IngestError::Json {
        path: origin.to_path_buf(),
        source,
    })?;
    snapshot_from_rows(doc.statements, doc.balance_sheets, doc.income_statements)
}
