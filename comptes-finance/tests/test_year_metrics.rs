use std::collections::HashMap;

use approx::assert_relative_eq;
use comptes_core::{BalanceSheet, CompanySnapshot, FinancialStatement, IncomeStatement};
use comptes_finance::{
    DisplayOptions, MetricKey, NumberLocale, Report, YearMetrics, compute_series,
    compute_year_metrics,
};
use proptest::prelude::*;

fn single(
    bs: BalanceSheet,
    is: IncomeStatement,
) -> (
    Vec<FinancialStatement>,
    HashMap<String, BalanceSheet>,
    HashMap<String, IncomeStatement>,
) {
    let id = bs.statement_id.clone();
    (
        vec![FinancialStatement::new(id.clone(), 2023)],
        HashMap::from([(id.clone(), bs)]),
        HashMap::from([(id, is)]),
    )
}

fn all_zero_sheet(id: &str) -> BalanceSheet {
    let mut bs = BalanceSheet::new(id);
    bs.share_capital = Some(0.0);
    bs.share_premium = Some(0.0);
    bs.revaluation_reserve = Some(0.0);
    bs.legal_reserve = Some(0.0);
    bs.statutory_reserves = Some(0.0);
    bs.voluntary_reserves = Some(0.0);
    bs.retained_earnings = Some(0.0);
    bs.current_year_result = Some(0.0);
    bs.treasury_shares = Some(0.0);
    bs.long_term_provisions = Some(0.0);
    bs.long_term_debts = Some(0.0);
    bs.long_term_group_debts = Some(0.0);
    bs.deferred_tax_liabilities = Some(0.0);
    bs.deferred_tax_assets = Some(0.0);
    bs.long_term_group_investments = Some(0.0);
    bs.intangible_assets = Some(0.0);
    bs.goodwill = Some(0.0);
    bs.tangible_assets = Some(0.0);
    bs.long_term_financial_investments = Some(0.0);
    bs.real_estate_investments = Some(0.0);
    bs.inventory = Some(0.0);
    bs.trade_receivables = Some(0.0);
    bs.short_term_financial_investments = Some(0.0);
    bs.cash_equivalents = Some(0.0);
    bs.short_term_debts = Some(0.0);
    bs.short_term_group_debts = Some(0.0);
    bs.trade_payables = Some(0.0);
    bs.other_creditors = Some(0.0);
    bs
}

/// Balance sheet used by the worked scenarios: capital 1000, result 200,
/// provisions 50, long-term debts 300, tangible assets 800.
fn scenario_sheet() -> BalanceSheet {
    BalanceSheet {
        share_capital: Some(1000.0),
        current_year_result: Some(200.0),
        long_term_provisions: Some(50.0),
        long_term_debts: Some(300.0),
        tangible_assets: Some(800.0),
        ..all_zero_sheet("st-2023")
    }
}

#[test]
fn test_explicit_zeros_give_zero_metrics() {
    let is = IncomeStatement {
        net_turnover: Some(0.0),
        financial_expenses: Some(0.0),
        corporate_tax: Some(0.0),
        ..IncomeStatement::new("z")
    };
    let (st, bs, is) = single(all_zero_sheet("z"), is);
    let m = compute_year_metrics(2023, &st, &bs, &is);
    assert_eq!(
        m,
        YearMetrics {
            fiscal_year: 2023,
            has_statement: true,
            ..YearMetrics::default()
        }
    );
}

#[test]
fn test_scenario_equity() {
    let (st, bs, is) = single(scenario_sheet(), IncomeStatement::new("st-2023"));
    let m = compute_year_metrics(2023, &st, &bs, &is);
    assert_eq!(m.equity, 1200.0);
}

#[test]
fn test_scenario_total_financing_funds() {
    let (st, bs, is) = single(scenario_sheet(), IncomeStatement::new("st-2023"));
    let m = compute_year_metrics(2023, &st, &bs, &is);
    assert_eq!(m.long_term_liabilities, 350.0);
    assert_eq!(m.total_financing_funds, 1550.0);
}

#[test]
fn test_scenario_solvency_ratio() {
    let (st, bs, is) = single(scenario_sheet(), IncomeStatement::new("st-2023"));
    let m = compute_year_metrics(2023, &st, &bs, &is);
    assert_eq!(m.non_current_investments, 800.0);
    assert_relative_eq!(m.solvency_ratio, 0.5161, epsilon = 1e-4);
}

#[test]
fn test_scenario_zero_tax() {
    let bs = BalanceSheet {
        current_year_result: Some(100.0),
        ..BalanceSheet::new("t")
    };
    let is = IncomeStatement {
        corporate_tax: Some(0.0),
        ..IncomeStatement::new("t")
    };
    let (st, bs, is) = single(bs, is);
    let m = compute_year_metrics(2023, &st, &bs, &is);
    assert_eq!(m.pre_tax_profit, 100.0);
    assert_eq!(m.effective_tax_rate, 0.0);
}

#[test]
fn test_scenario_zero_financial_expenses() {
    for result in [-500.0, 0.0, 42.0, 1e9] {
        let bs = BalanceSheet {
            current_year_result: Some(result),
            ..BalanceSheet::new("c")
        };
        let is = IncomeStatement {
            financial_expenses: Some(0.0),
            ..IncomeStatement::new("c")
        };
        let (st, bs, is) = single(bs, is);
        let m = compute_year_metrics(2023, &st, &bs, &is);
        assert_eq!(m.financial_expense_coverage, 0.0);
    }
}

#[test]
fn test_five_year_report_end_to_end() {
    let mut statements = Vec::new();
    let mut sheets = Vec::new();
    let mut incomes = Vec::new();
    for (i, year) in (2017..=2023).enumerate() {
        let id = format!("st-{year}");
        statements.push(FinancialStatement::new(id.clone(), year));
        sheets.push(BalanceSheet {
            share_capital: Some(100_000.0),
            current_year_result: Some(10_000.0 * (i as f64 + 1.0)),
            long_term_debts: Some(50_000.0),
            ..BalanceSheet::new(id.clone())
        });
        incomes.push(IncomeStatement {
            corporate_tax: Some(2_500.0),
            financial_expenses: Some(1_000.0),
            ..IncomeStatement::new(id)
        });
    }
    let snapshot = CompanySnapshot::new(statements, sheets, incomes);
    let series = compute_series(&snapshot, 5);
    assert_eq!(series.fiscal_years(), vec![2023, 2022, 2021, 2020, 2019]);

    let newest = series.get(2023).unwrap();
    assert_eq!(newest.equity, 170_000.0);
    assert_eq!(newest.pre_tax_profit, 72_500.0);
    assert_eq!(newest.financial_expense_coverage, 70.0);

    let v = series.variation(MetricKey::CurrentYearResult, 2023).unwrap();
    assert_eq!(v.absolute, 10_000.0);

    let report = Report::build(&series, &DisplayOptions::new(true, NumberLocale::Catalan));
    let equity = report.row(MetricKey::Equity).unwrap();
    assert_eq!(equity.cells[0], "170,00");
    let tax = report.row(MetricKey::EffectiveTaxRate).unwrap();
    assert_eq!(tax.cells[0], "3,4%");
}

fn figure() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (-1e9f64..1e9f64).prop_map(Some)]
}

prop_compose! {
    fn arb_sheet()(
        a in proptest::collection::vec(figure(), 28),
    ) -> BalanceSheet {
        BalanceSheet {
            statement_id: "p".to_string(),
            share_capital: a[0],
            share_premium: a[1],
            revaluation_reserve: a[2],
            legal_reserve: a[3],
            statutory_reserves: a[4],
            voluntary_reserves: a[5],
            retained_earnings: a[6],
            current_year_result: a[7],
            treasury_shares: a[8],
            long_term_provisions: a[9],
            long_term_debts: a[10],
            long_term_group_debts: a[11],
            deferred_tax_liabilities: a[12],
            deferred_tax_assets: a[13],
            long_term_group_investments: a[14],
            intangible_assets: a[15],
            goodwill: a[16],
            tangible_assets: a[17],
            long_term_financial_investments: a[18],
            real_estate_investments: a[19],
            inventory: a[20],
            trade_receivables: a[21],
            short_term_financial_investments: a[22],
            cash_equivalents: a[23],
            short_term_debts: a[24],
            short_term_group_debts: a[25],
            trade_payables: a[26],
            other_creditors: a[27],
        }
    }
}

prop_compose! {
    fn arb_income()(
        net_turnover in figure(),
        financial_expenses in figure(),
        corporate_tax in figure(),
    ) -> IncomeStatement {
        IncomeStatement {
            statement_id: "p".to_string(),
            net_turnover,
            financial_expenses,
            corporate_tax,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_idempotent(bs in arb_sheet(), is in arb_income()) {
        let (st, bs, is) = single(bs, is);
        let a = compute_year_metrics(2023, &st, &bs, &is);
        let b = compute_year_metrics(2023, &st, &bs, &is);
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn prop_ratios_always_finite(bs in arb_sheet(), is in arb_income()) {
        let (st, bs, is) = single(bs, is);
        let m = compute_year_metrics(2023, &st, &bs, &is);
        prop_assert!(m.solvency_ratio.is_finite());
        prop_assert!(m.debt_ratio.is_finite());
        prop_assert!(m.effective_tax_rate.is_finite());
        prop_assert!(m.financial_expense_coverage.is_finite());
    }

    #[test]
    fn prop_zero_financing_funds_zero_ratios(bs in arb_sheet(), is in arb_income()) {
        let (st, bs, is) = single(bs, is);
        let m = compute_year_metrics(2023, &st, &bs, &is);
        if m.total_financing_funds == 0.0 {
            prop_assert_eq!(m.solvency_ratio, 0.0);
            prop_assert_eq!(m.debt_ratio, 0.0);
        }
        if m.pre_tax_profit == 0.0 {
            prop_assert_eq!(m.effective_tax_rate, 0.0);
        }
        if m.financial_expenses == 0.0 {
            prop_assert_eq!(m.financial_expense_coverage, 0.0);
        }
    }

    #[test]
    fn prop_balanced_financing_gives_zero_ratios(
        capital in 1.0f64..1e6,
        is in arb_income(),
    ) {
        // long-term debts exactly cancel equity
        let bs = BalanceSheet {
            share_capital: Some(capital),
            long_term_debts: Some(-capital),
            tangible_assets: Some(capital),
            ..BalanceSheet::new("p")
        };
        let (st, bs, is) = single(bs, is);
        let m = compute_year_metrics(2023, &st, &bs, &is);
        prop_assert_eq!(m.total_financing_funds, 0.0);
        prop_assert_eq!(m.solvency_ratio, 0.0);
        prop_assert_eq!(m.debt_ratio, 0.0);
    }

    #[test]
    fn prop_zero_financial_expenses_zero_coverage(result in -1e9f64..1e9f64) {
        let bs = BalanceSheet {
            current_year_result: Some(result),
            ..BalanceSheet::new("p")
        };
        let is = IncomeStatement {
            financial_expenses: Some(0.0),
            ..IncomeStatement::new("p")
        };
        let (st, bs, is) = single(bs, is);
        let m = compute_year_metrics(2023, &st, &bs, &is);
        prop_assert_eq!(m.financial_expense_coverage, 0.0);
    }
}
