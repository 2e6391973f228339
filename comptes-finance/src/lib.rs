//! comptes-finance: grouped totals, ratios, multi-year series and report formatting

pub mod format;
pub mod metrics;
pub mod report;
pub mod series;

pub use format::{DisplayOptions, NumberLocale, format_amount, format_percent, format_ratio};
pub use metrics::{YearMetrics, compute_year_metrics, safe_ratio};
pub use report::{Report, ReportRow};
pub use series::{MetricKey, MetricKind, MetricSeries, Variation, compute_series};
