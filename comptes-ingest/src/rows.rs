//! Assemble loaded rows into a [`CompanySnapshot`], rejecting duplicates

use std::collections::HashSet;

use comptes_core::{BalanceSheet, CompanySnapshot, FinancialStatement, IncomeStatement};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Build a snapshot from raw rows.
///
/// A statement may have at most one balance sheet and one income statement.
/// Rows pointing at unknown statements are kept; they never match a year.
pub fn snapshot_from_rows(
    statements: Vec<FinancialStatement>,
    balance_sheets: Vec<BalanceSheet>,
    income_statements: Vec<IncomeStatement>,
) -> Result<CompanySnapshot> {
    check_unique("balance sheet", balance_sheets.iter().map(|b| b.statement_id.as_str()))?;
    check_unique("income statement", income_statements.iter().map(|i| i.statement_id.as_str()))?;

    let known: HashSet<&str> = statements.iter().map(|s| s.id.as_str()).collect();
    let orphans = balance_sheets
        .iter()
        .map(|b| b.statement_id.as_str())
        .chain(income_statements.iter().map(|i| i.statement_id.as_str()))
        .filter(|id| !known.contains(id))
        .count();
    if orphans > 0 {
        debug!(orphans, "rows reference unknown statements");
    }

    Ok(CompanySnapshot::new(statements, balance_sheets, income_statements))
}

fn check_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(IngestError::DuplicateRow {
                kind,
                statement_id: id.to_string(),
            });
        }
    }
    Ok(())
}
