//! Multi-year metric series and year-over-year variation

use comptes_core::CompanySnapshot;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::{YearMetrics, compute_year_metrics, safe_ratio};

/// How a metric is displayed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Currency amount; subject to the thousands toggle
    Amount,
    /// Already scaled to 0-100
    Percent,
    /// Unitless ratio
    Ratio,
}

/// Every metric a report row can show, in display order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Equity,
    LongTermLiabilities,
    TotalFinancingFunds,
    NonCurrentInvestments,
    CurrentAssets,
    CurrentLiabilities,
    WorkingCapital,
    SelfFinancing,
    NetTurnover,
    CurrentYearResult,
    CorporateTax,
    PreTaxProfit,
    FinancialExpenses,
    SolvencyRatio,
    DebtRatio,
    EffectiveTaxRate,
    FinancialExpenseCoverage,
}

impl MetricKey {
    pub const ALL: [MetricKey; 17] = [
        MetricKey::Equity,
        MetricKey::LongTermLiabilities,
        MetricKey::TotalFinancingFunds,
        MetricKey::NonCurrentInvestments,
        MetricKey::CurrentAssets,
        MetricKey::CurrentLiabilities,
        MetricKey::WorkingCapital,
        MetricKey::SelfFinancing,
        MetricKey::NetTurnover,
        MetricKey::CurrentYearResult,
        MetricKey::CorporateTax,
        MetricKey::PreTaxProfit,
        MetricKey::FinancialExpenses,
        MetricKey::SolvencyRatio,
        MetricKey::DebtRatio,
        MetricKey::EffectiveTaxRate,
        MetricKey::FinancialExpenseCoverage,
    ];

    pub fn kind(&self) -> MetricKind {
        match self {
            MetricKey::SolvencyRatio
            | MetricKey::DebtRatio
            | MetricKey::FinancialExpenseCoverage => MetricKind::Ratio,
            MetricKey::EffectiveTaxRate => MetricKind::Percent,
            _ => MetricKind::Amount,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Equity => "Equity",
            MetricKey::LongTermLiabilities => "Long-term liabilities",
            MetricKey::TotalFinancingFunds => "Total financing funds",
            MetricKey::NonCurrentInvestments => "Non-current investments",
            MetricKey::CurrentAssets => "Current assets",
            MetricKey::CurrentLiabilities => "Current liabilities",
            MetricKey::WorkingCapital => "Working capital",
            MetricKey::SelfFinancing => "Self-financing",
            MetricKey::NetTurnover => "Net turnover",
            MetricKey::CurrentYearResult => "Result for the year",
            MetricKey::CorporateTax => "Corporate tax",
            MetricKey::PreTaxProfit => "Pre-tax profit",
            MetricKey::FinancialExpenses => "Financial expenses",
            MetricKey::SolvencyRatio => "Solvency ratio",
            MetricKey::DebtRatio => "Debt ratio",
            MetricKey::EffectiveTaxRate => "Effective tax rate",
            MetricKey::FinancialExpenseCoverage => "Financial expense coverage",
        }
    }

    /// Catalan heading used by the analysis views
    pub fn local_label(&self) -> &'static str {
        match self {
            MetricKey::Equity => "Fons propis",
            MetricKey::LongTermLiabilities => "Fons aliens",
            MetricKey::TotalFinancingFunds => "Total fons de finançament",
            MetricKey::NonCurrentInvestments => "Inversions no corrents",
            MetricKey::CurrentAssets => "Actiu corrent",
            MetricKey::CurrentLiabilities => "Passiu corrent",
            MetricKey::WorkingCapital => "Capital circulant",
            MetricKey::SelfFinancing => "Autofinançament",
            MetricKey::NetTurnover => "Import net de la xifra de negocis",
            MetricKey::CurrentYearResult => "Resultat de l'exercici",
            MetricKey::CorporateTax => "Impost sobre societats",
            MetricKey::PreTaxProfit => "Resultat abans d'impostos",
            MetricKey::FinancialExpenses => "Despeses financeres",
            MetricKey::SolvencyRatio => "Ràtio de solvència",
            MetricKey::DebtRatio => "Ràtio d'endeutament",
            MetricKey::EffectiveTaxRate => "Tipus impositiu efectiu",
            MetricKey::FinancialExpenseCoverage => "Cobertura de despeses financeres",
        }
    }
}

impl YearMetrics {
    /// Read one metric by key
    pub fn value(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Equity => self.equity,
            MetricKey::LongTermLiabilities => self.long_term_liabilities,
            MetricKey::TotalFinancingFunds => self.total_financing_funds,
            MetricKey::NonCurrentInvestments => self.non_current_investments,
            MetricKey::CurrentAssets => self.current_assets,
            MetricKey::CurrentLiabilities => self.current_liabilities,
            MetricKey::WorkingCapital => self.working_capital,
            MetricKey::SelfFinancing => self.self_financing,
            MetricKey::NetTurnover => self.net_turnover,
            MetricKey::CurrentYearResult => self.current_year_result,
            MetricKey::CorporateTax => self.corporate_tax,
            MetricKey::PreTaxProfit => self.pre_tax_profit,
            MetricKey::FinancialExpenses => self.financial_expenses,
            MetricKey::SolvencyRatio => self.solvency_ratio,
            MetricKey::DebtRatio => self.debt_ratio,
            MetricKey::EffectiveTaxRate => self.effective_tax_rate,
            MetricKey::FinancialExpenseCoverage => self.financial_expense_coverage,
        }
    }
}

/// Change of a metric against the previous available year
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Variation {
    pub absolute: f64,
    /// Relative to the magnitude of the previous value; 0 when it was 0
    pub percent: f64,
}

impl Variation {
    pub fn between(previous: f64, current: f64) -> Self {
        let absolute = current - previous;
        Self {
            absolute,
            percent: safe_ratio(absolute, previous.abs()) * 100.0,
        }
    }
}

/// Metrics for consecutive filings, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetricSeries {
    pub years: Vec<YearMetrics>,
}

impl MetricSeries {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn fiscal_years(&self) -> Vec<i32> {
        self.years.iter().map(|m| m.fiscal_year).collect()
    }

    pub fn get(&self, year: i32) -> Option<&YearMetrics> {
        self.years.iter().find(|m| m.fiscal_year == year)
    }

    /// Variation of `key` in `year` against the next older year in the series.
    /// `None` when `year` is absent or is the oldest.
    pub fn variation(&self, key: MetricKey, year: i32) -> Option<Variation> {
        let idx = self.years.iter().position(|m| m.fiscal_year == year)?;
        let previous = self.years.get(idx + 1)?;
        Some(Variation::between(
            previous.value(key),
            self.years[idx].value(key),
        ))
    }
}

/// Compute metrics for the `years` most recent fiscal years of `snapshot`.
pub fn compute_series(snapshot: &CompanySnapshot, years: usize) -> MetricSeries {
    let recent = snapshot.recent_statements(years);
    debug!(requested = years, available = recent.len(), "computing metric series");

    let years = recent
        .iter()
        .map(|st| {
            compute_year_metrics(
                st.fiscal_year,
                &snapshot.statements,
                &snapshot.balance_sheets,
                &snapshot.income_statements,
            )
        })
        .collect();

    MetricSeries { years }
}
