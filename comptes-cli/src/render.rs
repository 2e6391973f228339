//! Terminal tables for reports, single years and validation

use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use comptes_core::{BalanceSheet, CompanySnapshot, amount};
use comptes_finance::report::format_value;
use comptes_finance::{
    DisplayOptions, MetricKey, MetricSeries, Report, YearMetrics, format_amount, format_percent,
};

fn new_table(header: Vec<String>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right_align_from(table: &mut Table, first: usize) {
    for column in table.column_iter_mut().skip(first) {
        column.set_cell_alignment(CellAlignment::Right);
    }
}

pub fn report_table(report: &Report) -> Table {
    let mut header = vec!["".to_string()];
    header.extend(report.years.iter().map(|y| y.to_string()));
    let mut table = new_table(header);

    for row in &report.rows {
        let mut cells = vec![row.local_label.to_string()];
        cells.extend(row.cells.iter().cloned());
        table.add_row(cells);
    }
    right_align_from(&mut table, 1);
    table
}

/// One year with its change against the previous available year
pub fn year_table(
    metrics: &YearMetrics,
    series: &MetricSeries,
    opts: &DisplayOptions,
) -> Table {
    let mut table = new_table(vec![
        "".to_string(),
        metrics.fiscal_year.to_string(),
        "Var.".to_string(),
        "Var. %".to_string(),
    ]);

    for key in MetricKey::ALL {
        let kind = key.kind();
        let (abs, pct) = match series.variation(key, metrics.fiscal_year) {
            Some(v) => (
                format_value(kind, v.absolute, opts),
                format_percent(v.percent, opts),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            key.local_label().to_string(),
            format_value(kind, metrics.value(key), opts),
            abs,
            pct,
        ]);
    }
    right_align_from(&mut table, 1);
    table
}

/// Current assets and liabilities line by line
pub fn working_capital_table(
    balance_sheet: Option<&BalanceSheet>,
    metrics: &YearMetrics,
    opts: &DisplayOptions,
) -> Table {
    let mut table = new_table(vec!["Capital circulant".to_string(), "".to_string()]);

    let lines: [(&str, f64); 12] = [
        ("Existències", line(balance_sheet, |b| b.inventory)),
        ("Deutors comercials", line(balance_sheet, |b| b.trade_receivables)),
        ("Inversions financeres a curt termini", line(balance_sheet, |b| b.short_term_financial_investments)),
        ("Efectiu i equivalents", line(balance_sheet, |b| b.cash_equivalents)),
        ("Actiu corrent", metrics.current_assets),
        ("Deutes a curt termini", line(balance_sheet, |b| b.short_term_debts)),
        ("Deutes amb empreses del grup a curt termini", line(balance_sheet, |b| b.short_term_group_debts)),
        ("Proveïdors", line(balance_sheet, |b| b.trade_payables)),
        ("Altres creditors", line(balance_sheet, |b| b.other_creditors)),
        ("Passiu corrent", metrics.current_liabilities),
        ("Capital circulant", metrics.working_capital),
        ("Autofinançament", metrics.self_financing),
    ];
    for (label, value) in lines {
        table.add_row(vec![label.to_string(), format_amount(value, opts)]);
    }
    right_align_from(&mut table, 1);
    table
}

fn line(balance_sheet: Option<&BalanceSheet>, field: fn(&BalanceSheet) -> Option<f64>) -> f64 {
    amount(balance_sheet.and_then(field))
}

/// Completeness of each filing: which rows and fields are absent
pub fn validation_table(snapshot: &CompanySnapshot) -> Table {
    let mut table = new_table(vec![
        "Statement".to_string(),
        "Year".to_string(),
        "Status".to_string(),
        "Balance sheet".to_string(),
        "Income statement".to_string(),
    ]);

    let mut statements: Vec<_> = snapshot.statements.iter().collect();
    statements.sort_by(|a, b| b.fiscal_year.cmp(&a.fiscal_year));

    for st in statements {
        let bs = match snapshot.balance_sheet(&st.id) {
            Some(bs) => missing_summary(bs.missing_fields().len(), bs.fields().len()),
            None => "missing".to_string(),
        };
        let is = match snapshot.income_statement(&st.id) {
            Some(is) => missing_summary(is.missing_fields().len(), is.fields().len()),
            None => "missing".to_string(),
        };
        table.add_row(vec![
            st.id.clone(),
            st.fiscal_year.to_string(),
            format!("{:?}", st.status),
            bs,
            is,
        ]);
    }
    table
}

fn missing_summary(missing: usize, total: usize) -> String {
    if missing == 0 {
        "complete".to_string()
    } else {
        format!("{}/{} fields blank", missing, total)
    }
}
