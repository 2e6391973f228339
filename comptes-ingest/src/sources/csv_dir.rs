//! Snapshot stored as a directory of CSV exports
//!
//! Expected layout:
//!   statements.csv         id,fiscal_year,statement_type,status   (required)
//!   balance_sheets.csv     statement_id,share_capital,...         (optional)
//!   income_statements.csv  statement_id,net_turnover,...          (optional)
//!
//! Columns may be omitted and cells left blank; both read as absent figures.

use std::path::{Path, PathBuf};

use comptes_core::{BalanceSheet, CompanySnapshot, FinancialStatement, IncomeStatement};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::rows::snapshot_from_rows;

pub const STATEMENTS_FILE: &str = "statements.csv";
pub const BALANCE_SHEETS_FILE: &str = "balance_sheets.csv";
pub const INCOME_STATEMENTS_FILE: &str = "income_statements.csv";

/// Load a snapshot from `dir`.
pub fn load_snapshot_dir(dir: impl AsRef<Path>) -> Result<CompanySnapshot> {
    let dir = dir.as_ref();

    let statements_path = dir.join(STATEMENTS_FILE);
    if !statements_path.exists() {
        return Err(IngestError::MissingFile(statements_path));
    }
    let statements: Vec<FinancialStatement> = read_csv(&statements_path)?;
    let balance_sheets: Vec<BalanceSheet> = read_optional_csv(dir.join(BALANCE_SHEETS_FILE))?;
    let income_statements: Vec<IncomeStatement> =
        read_optional_csv(dir.join(INCOME_STATEMENTS_FILE))?;

    debug!(
        dir = %dir.display(),
        statements = statements.len(),
        balance_sheets = balance_sheets.len(),
        income_statements = income_statements.len(),
        "loaded csv snapshot"
    );

    snapshot_from_rows(statements, balance_sheets, income_statements)
}

fn read_optional_csv<T: DeserializeOwned>(path: PathBuf) -> Result<Vec<T>> {
    if !path.exists() {
        debug!(path = %path.display(), "optional csv not present");
        return Ok(Vec::new());
    }
    read_csv(&path)
}

/// Read every row of a headed CSV file into `T`.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let csv_err = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        rows.push(record.map_err(csv_err)?);
    }
    Ok(rows)
}
