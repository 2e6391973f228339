//! Balance sheet and income statement rows (PGC layout)
//!
//! Every numeric field is optional: bookkeeping data arrives incomplete and
//! upstream forms leave cells blank. Readers go through [`amount`], which
//! reads an absent value as zero.

use serde::{Deserialize, Serialize};

/// Read an optional figure, treating absent or non-finite values as `0.0`.
pub fn amount(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Balance sheet row, at most one per statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BalanceSheet {
    pub statement_id: String,

    // Equity (Fons propis)
    pub share_capital: Option<f64>,
    pub share_premium: Option<f64>,
    pub revaluation_reserve: Option<f64>,
    pub legal_reserve: Option<f64>,
    pub statutory_reserves: Option<f64>,
    pub voluntary_reserves: Option<f64>,
    pub retained_earnings: Option<f64>,
    pub current_year_result: Option<f64>,
    /// Own shares held; subtracted from equity
    pub treasury_shares: Option<f64>,

    // Non-current liabilities (Fons aliens)
    pub long_term_provisions: Option<f64>,
    pub long_term_debts: Option<f64>,
    pub long_term_group_debts: Option<f64>,
    pub deferred_tax_liabilities: Option<f64>,

    // Non-current assets
    pub deferred_tax_assets: Option<f64>,
    pub long_term_group_investments: Option<f64>,
    pub intangible_assets: Option<f64>,
    pub goodwill: Option<f64>,
    pub tangible_assets: Option<f64>,
    pub long_term_financial_investments: Option<f64>,
    pub real_estate_investments: Option<f64>,

    // Current assets
    pub inventory: Option<f64>,
    pub trade_receivables: Option<f64>,
    pub short_term_financial_investments: Option<f64>,
    pub cash_equivalents: Option<f64>,

    // Current liabilities
    pub short_term_debts: Option<f64>,
    pub short_term_group_debts: Option<f64>,
    pub trade_payables: Option<f64>,
    pub other_creditors: Option<f64>,
}

impl BalanceSheet {
    /// Empty balance sheet for `statement_id`; every field absent
    pub fn new(statement_id: impl Into<String>) -> Self {
        Self {
            statement_id: statement_id.into(),
            ..Default::default()
        }
    }

    /// All figures by column name, in PGC order
    pub fn fields(&self) -> [(&'static str, Option<f64>); 28] {
        [
            ("share_capital", self.share_capital),
            ("share_premium", self.share_premium),
            ("revaluation_reserve", self.revaluation_reserve),
            ("legal_reserve", self.legal_reserve),
            ("statutory_reserves", self.statutory_reserves),
            ("voluntary_reserves", self.voluntary_reserves),
            ("retained_earnings", self.retained_earnings),
            ("current_year_result", self.current_year_result),
            ("treasury_shares", self.treasury_shares),
            ("long_term_provisions", self.long_term_provisions),
            ("long_term_debts", self.long_term_debts),
            ("long_term_group_debts", self.long_term_group_debts),
            ("deferred_tax_liabilities", self.deferred_tax_liabilities),
            ("deferred_tax_assets", self.deferred_tax_assets),
            ("long_term_group_investments", self.long_term_group_investments),
            ("intangible_assets", self.intangible_assets),
            ("goodwill", self.goodwill),
            ("tangible_assets", self.tangible_assets),
            ("long_term_financial_investments", self.long_term_financial_investments),
            ("real_estate_investments", self.real_estate_investments),
            ("inventory", self.inventory),
            ("trade_receivables", self.trade_receivables),
            ("short_term_financial_investments", self.short_term_financial_investments),
            ("cash_equivalents", self.cash_equivalents),
            ("short_term_debts", self.short_term_debts),
            ("short_term_group_debts", self.short_term_group_debts),
            ("trade_payables", self.trade_payables),
            ("other_creditors", self.other_creditors),
        ]
    }

    /// Names of fields that were not provided
    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing(&self.fields())
    }
}

/// Income statement row, at most one per statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IncomeStatement {
    pub statement_id: String,
    pub net_turnover: Option<f64>,
    pub financial_expenses: Option<f64>,
    pub corporate_tax: Option<f64>,
}

impl IncomeStatement {
    pub fn new(statement_id: impl Into<String>) -> Self {
        Self {
            statement_id: statement_id.into(),
            ..Default::default()
        }
    }

    pub fn fields(&self) -> [(&'static str, Option<f64>); 3] {
        [
            ("net_turnover", self.net_turnover),
            ("financial_expenses", self.financial_expenses),
            ("corporate_tax", self.corporate_tax),
        ]
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing(&self.fields())
    }
}

fn missing(fields: &[(&'static str, Option<f64>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| *name)
        .collect()
}
