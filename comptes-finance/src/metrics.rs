//! Per-year grouped totals and ratios for the long-term financial analysis
//! and working capital views.
//!
//! Missing rows and missing fields count as zero, and every ratio with a zero
//! denominator resolves to zero. The computation cannot fail.

use std::collections::HashMap;

use comptes_core::{BalanceSheet, FinancialStatement, IncomeStatement, amount};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// `numerator / denominator`, or `0.0` when the denominator is zero or the
/// quotient is not finite.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let q = numerator / denominator;
    if q.is_finite() { q } else { 0.0 }
}

/// Derived figures for one fiscal year
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct YearMetrics {
    pub fiscal_year: i32,
    /// Whether a statement was found for the year
    pub has_statement: bool,

    /// Fons propis
    pub equity: f64,
    /// Fons aliens (non-current liabilities)
    pub long_term_liabilities: f64,
    /// Equity + long-term liabilities
    pub total_financing_funds: f64,
    pub non_current_investments: f64,
    pub current_assets: f64,
    pub current_liabilities: f64,
    /// Capital circulant
    pub working_capital: f64,
    /// Legal + statutory + voluntary reserves
    pub reserves: f64,
    pub self_financing: f64,
    pub pre_tax_profit: f64,

    pub solvency_ratio: f64,
    pub debt_ratio: f64,
    /// Percentage
    pub effective_tax_rate: f64,
    pub financial_expense_coverage: f64,

    // Raw components shown alongside the groups
    pub current_year_result: f64,
    pub net_turnover: f64,
    pub financial_expenses: f64,
    pub corporate_tax: f64,
}

/// Row accessors with absent rows and fields read as zero
#[derive(Debug, Clone, Copy)]
struct Figures<'a> {
    balance: Option<&'a BalanceSheet>,
    income: Option<&'a IncomeStatement>,
}

type BalanceField = fn(&BalanceSheet) -> Option<f64>;

impl Figures<'_> {
    fn bs(&self, field: BalanceField) -> f64 {
        amount(self.balance.and_then(field))
    }

    fn sum(&self, fields: &[BalanceField]) -> f64 {
        fields.iter().map(|&f| self.bs(f)).sum()
    }

    fn income(&self, field: fn(&IncomeStatement) -> Option<f64>) -> f64 {
        amount(self.income.and_then(field))
    }

    fn reserves(&self) -> f64 {
        self.sum(&[
            |b| b.legal_reserve,
            |b| b.statutory_reserves,
            |b| b.voluntary_reserves,
        ])
    }

    fn equity(&self) -> f64 {
        self.bs(|b| b.share_capital)
            + self.bs(|b| b.share_premium)
            + self.bs(|b| b.revaluation_reserve)
            + self.reserves()
            + self.bs(|b| b.retained_earnings)
            + self.bs(|b| b.current_year_result)
            - self.bs(|b| b.treasury_shares)
    }

    fn long_term_liabilities(&self) -> f64 {
        self.sum(&[
            |b| b.long_term_provisions,
            |b| b.long_term_debts,
            |b| b.long_term_group_debts,
            |b| b.deferred_tax_liabilities,
        ])
    }

    fn non_current_investments(&self) -> f64 {
        self.bs(|b| b.deferred_tax_assets)
            + self.bs(|b| b.long_term_group_investments)
            + (self.bs(|b| b.intangible_assets) + self.bs(|b| b.goodwill))
            + self.bs(|b| b.tangible_assets)
            + self.bs(|b| b.long_term_financial_investments)
            + self.bs(|b| b.real_estate_investments)
    }

    fn current_assets(&self) -> f64 {
        self.sum(&[
            |b| b.inventory,
            |b| b.trade_receivables,
            |b| b.short_term_financial_investments,
            |b| b.cash_equivalents,
        ])
    }

    fn current_liabilities(&self) -> f64 {
        self.sum(&[
            |b| b.short_term_debts,
            |b| b.short_term_group_debts,
            |b| b.trade_payables,
            |b| b.other_creditors,
        ])
    }
}

impl YearMetrics {
    /// Compute every group and ratio from one (possibly absent) pair of rows.
    pub fn from_rows(
        fiscal_year: i32,
        balance_sheet: Option<&BalanceSheet>,
        income_statement: Option<&IncomeStatement>,
    ) -> Self {
        let f = Figures {
            balance: balance_sheet,
            income: income_statement,
        };

        let equity = f.equity();
        let long_term_liabilities = f.long_term_liabilities();
        let total_financing_funds = equity + long_term_liabilities;
        let non_current_investments = f.non_current_investments();
        let current_assets = f.current_assets();
        let current_liabilities = f.current_liabilities();
        let reserves = f.reserves();
        let result = f.bs(|b| b.current_year_result);
        let corporate_tax = f.income(|i| i.corporate_tax);
        let financial_expenses = f.income(|i| i.financial_expenses);
        let pre_tax_profit = result + corporate_tax;

        Self {
            fiscal_year,
            has_statement: false,
            equity,
            long_term_liabilities,
            total_financing_funds,
            non_current_investments,
            current_assets,
            current_liabilities,
            working_capital: current_assets - current_liabilities,
            reserves,
            self_financing: reserves + f.bs(|b| b.retained_earnings) + result,
            pre_tax_profit,
            solvency_ratio: safe_ratio(non_current_investments, total_financing_funds),
            debt_ratio: safe_ratio(equity, total_financing_funds),
            effective_tax_rate: safe_ratio(corporate_tax, pre_tax_profit) * 100.0,
            financial_expense_coverage: safe_ratio(result, financial_expenses.abs()),
            current_year_result: result,
            net_turnover: f.income(|i| i.net_turnover),
            financial_expenses,
            corporate_tax,
        }
    }
}

/// Compute the metrics for `year`.
///
/// When no statement closes `year` the result is all zeros. When several do,
/// the first one in `statements` is used.
pub fn compute_year_metrics(
    year: i32,
    statements: &[FinancialStatement],
    balance_sheets: &HashMap<String, BalanceSheet>,
    income_statements: &HashMap<String, IncomeStatement>,
) -> YearMetrics {
    let mut matching = statements.iter().filter(|s| s.fiscal_year == year);
    let Some(statement) = matching.next() else {
        return YearMetrics {
            fiscal_year: year,
            ..YearMetrics::default()
        };
    };
    let extra = matching.count();
    if extra > 0 {
        warn!(
            year,
            statement_id = %statement.id,
            ignored = extra,
            "multiple statements for fiscal year, using the first"
        );
    }

    let mut metrics = YearMetrics::from_rows(
        year,
        balance_sheets.get(&statement.id),
        income_statements.get(&statement.id),
    );
    metrics.has_statement = true;
    metrics
}
