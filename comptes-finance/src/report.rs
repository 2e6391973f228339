//! Formatted year-by-metric table handed to renderers (terminal, JSON, CSV)

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::{DisplayOptions, format_amount, format_percent, format_ratio};
use crate::series::{MetricKey, MetricKind, MetricSeries};

/// Format a metric value according to its kind
pub fn format_value(kind: MetricKind, value: f64, opts: &DisplayOptions) -> String {
    match kind {
        MetricKind::Amount => format_amount(value, opts),
        MetricKind::Percent => format_percent(value, opts),
        MetricKind::Ratio => format_ratio(value, opts),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportRow {
    pub key: MetricKey,
    pub label: &'static str,
    pub local_label: &'static str,
    pub kind: MetricKind,
    /// Raw values, one per report year
    pub values: Vec<f64>,
    /// Display strings, one per report year
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub options: DisplayOptions,
    /// Column years, newest first
    pub years: Vec<i32>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn build(series: &MetricSeries, opts: &DisplayOptions) -> Self {
        Self::build_rows(series, opts, &MetricKey::ALL)
    }

    /// Report restricted to `keys`, in the given order
    pub fn build_rows(series: &MetricSeries, opts: &DisplayOptions, keys: &[MetricKey]) -> Self {
        let rows = keys
            .iter()
            .map(|&key| {
                let kind = key.kind();
                let values: Vec<f64> = series.years.iter().map(|m| m.value(key)).collect();
                let cells = values
                    .iter()
                    .map(|&v| format_value(kind, v, opts))
                    .collect();
                ReportRow {
                    key,
                    label: key.label(),
                    local_label: key.local_label(),
                    kind,
                    values,
                    cells,
                }
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            options: *opts,
            years: series.fiscal_years(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn row(&self, key: MetricKey) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize report")
    }

    /// One CSV line per metric: `metric,label,<year>...` with formatted cells
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(out);

        let mut header = vec!["metric".to_string(), "label".to_string()];
        header.extend(self.years.iter().map(|y| y.to_string()));
        wtr.write_record(&header).context("write csv header")?;

        for row in &self.rows {
            let key = serde_json::to_value(row.key)?;
            let mut record = vec![
                key.as_str().unwrap_or_default().to_string(),
                row.local_label.to_string(),
            ];
            record.extend(row.cells.iter().cloned());
            wtr.write_record(&record)
                .with_context(|| format!("write csv row {}", row.label))?;
        }

        wtr.flush().context("flush csv")?;
        Ok(())
    }
}
