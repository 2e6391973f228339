//! In-memory snapshot of one company's filings, indexed by statement id

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::accounts::{BalanceSheet, IncomeStatement};
use crate::statement::FinancialStatement;

/// Number of fiscal years the analysis views consider
pub const DEFAULT_YEAR_WINDOW: usize = 5;

/// Fully-resolved rows for a single company. Read-only once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompanySnapshot {
    pub statements: Vec<FinancialStatement>,
    pub balance_sheets: HashMap<String, BalanceSheet>,
    pub income_statements: HashMap<String, IncomeStatement>,
}

impl CompanySnapshot {
    /// Build a snapshot. Later rows for an already-seen statement id replace
    /// earlier ones; callers that need to reject duplicates check before.
    pub fn new(
        statements: Vec<FinancialStatement>,
        balance_sheets: impl IntoIterator<Item = BalanceSheet>,
        income_statements: impl IntoIterator<Item = IncomeStatement>,
    ) -> Self {
        let balance_sheets: HashMap<_, _> = balance_sheets
            .into_iter()
            .map(|bs| (bs.statement_id.clone(), bs))
            .collect();
        let income_statements: HashMap<_, _> = income_statements
            .into_iter()
            .map(|is| (is.statement_id.clone(), is))
            .collect();

        debug!(
            statements = statements.len(),
            balance_sheets = balance_sheets.len(),
            income_statements = income_statements.len(),
            "built company snapshot"
        );

        Self {
            statements,
            balance_sheets,
            income_statements,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// First statement (input order) closing `year`
    pub fn statement_for_year(&self, year: i32) -> Option<&FinancialStatement> {
        self.statements.iter().find(|s| s.fiscal_year == year)
    }

    /// Distinct fiscal years, newest first
    pub fn fiscal_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.statements.iter().map(|s| s.fiscal_year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    /// One statement per fiscal year for the `n` most recent years, newest first.
    /// Ties within a year resolve to the first statement in input order.
    pub fn recent_statements(&self, n: usize) -> Vec<&FinancialStatement> {
        let mut sorted: Vec<&FinancialStatement> = self.statements.iter().collect();
        // stable: keeps input order inside a year
        sorted.sort_by(|a, b| b.fiscal_year.cmp(&a.fiscal_year));
        sorted.dedup_by_key(|s| s.fiscal_year);
        sorted.truncate(n);
        sorted
    }

    pub fn balance_sheet(&self, statement_id: &str) -> Option<&BalanceSheet> {
        self.balance_sheets.get(statement_id)
    }

    pub fn income_statement(&self, statement_id: &str) -> Option<&IncomeStatement> {
        self.income_statements.get(statement_id)
    }
}
