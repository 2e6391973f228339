//! Financial statement headers: one per company per fiscal year

use serde::{Deserialize, Serialize};

/// Header row of a yearly filing. Balance sheet and income statement rows
/// hang off it by `statement_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialStatement {
    /// Unique identifier (the key other rows reference)
    pub id: String,
    /// Fiscal year the statement closes
    pub fiscal_year: i32,
    /// PGC presentation format
    #[serde(default)]
    pub statement_type: StatementType,
    /// Workflow status
    #[serde(default)]
    pub status: StatementStatus,
}

/// PGC presentation formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum StatementType {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "abbreviated", alias = "abreujat", alias = "abreviado")]
    Abbreviated,
    #[serde(rename = "sme", alias = "pymes", alias = "pimes")]
    Sme,
    #[serde(rename = "consolidated")]
    Consolidated,
    #[serde(other)]
    Other,
}

/// Statement lifecycle; archived statements are immutable upstream
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum StatementStatus {
    #[default]
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "submitted")]
    Submitted,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "archived")]
    Archived,
    #[serde(other)]
    Other,
}

impl StatementStatus {
    pub fn is_archived(&self) -> bool {
        matches!(self, StatementStatus::Archived)
    }
}

impl FinancialStatement {
    /// Create a new statement header
    pub fn new(id: impl Into<String>, fiscal_year: i32) -> Self {
        Self {
            id: id.into(),
            fiscal_year,
            statement_type: StatementType::default(),
            status: StatementStatus::default(),
        }
    }

    pub fn with_type(mut self, statement_type: StatementType) -> Self {
        self.statement_type = statement_type;
        self
    }

    pub fn with_status(mut self, status: StatementStatus) -> Self {
        self.status = status;
        self
    }
}
