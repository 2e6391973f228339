//! comptes-core: statement, balance sheet and income statement types

pub mod accounts;
pub mod snapshot;
pub mod statement;

pub use accounts::{BalanceSheet, IncomeStatement, amount};
pub use snapshot::{CompanySnapshot, DEFAULT_YEAR_WINDOW};
pub use statement::{FinancialStatement, StatementStatus, StatementType};
