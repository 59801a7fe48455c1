// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bizdash::metrics::{self, Evaluation, ProfitAnalysis, Summary};
use bizdash::models::{Asset, Owner, Transaction, TxKind};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(kind: TxKind, amount: Decimal, day: &str) -> Transaction {
    Transaction {
        id: 0,
        label: "t".into(),
        kind,
        amount,
        category: String::new(),
        date: date(day),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        owner: Owner::new("acme").unwrap(),
    }
}

fn asset(name: &str, value: Decimal) -> Asset {
    Asset {
        id: 0,
        name: name.into(),
        value,
        category: String::new(),
        acquired_date: date("2024-01-01"),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        owner: Owner::new("acme").unwrap(),
    }
}

fn two_months() -> Vec<Transaction> {
    vec![
        tx(TxKind::Revenue, dec(1000), "2024-01-10"),
        tx(TxKind::Expense, dec(600), "2024-01-20"),
        tx(TxKind::Revenue, dec(1200), "2024-02-03"),
        tx(TxKind::Expense, dec(500), "2024-02-28"),
    ]
}

#[test]
fn monthly_buckets_and_break_even() {
    let buckets = metrics::monthly_buckets(&two_months());
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].month, "2024-01");
    assert_eq!(buckets[0].revenue, dec(1000));
    assert_eq!(buckets[0].expense, dec(600));
    assert_eq!(buckets[0].profit, dec(400));
    assert_eq!(buckets[1].month, "2024-02");
    assert_eq!(buckets[1].profit, dec(700));

    let be = metrics::break_even_month(&buckets).unwrap();
    assert_eq!(be.month, "2024-01");
}

#[test]
fn break_even_skips_losing_months() {
    let txs = vec![
        tx(TxKind::Revenue, dec(100), "2024-01-05"),
        tx(TxKind::Expense, dec(300), "2024-01-06"),
        tx(TxKind::Revenue, dec(500), "2024-03-01"),
    ];
    let buckets = metrics::monthly_buckets(&txs);
    assert_eq!(metrics::break_even_month(&buckets).unwrap().month, "2024-03");
    assert_eq!(ProfitAnalysis::compute(&txs).break_even_month.as_deref(), Some("2024-03"));
}

#[test]
fn budget_rows_do_not_affect_buckets() {
    let mut txs = two_months();
    txs.push(tx(TxKind::Budget, dec(25000), "2024-01-15"));
    let buckets = metrics::monthly_buckets(&txs);
    assert_eq!(buckets[0].profit, dec(400));
    assert_eq!(metrics::capital(&txs), dec(25000) + dec(1100));
}

#[test]
fn trend_keeps_most_recent_months() {
    let txs: Vec<_> = (1..=12)
        .chain(1..=3)
        .enumerate()
        .map(|(i, m)| {
            let year = if i < 12 { 2023 } else { 2024 };
            tx(TxKind::Revenue, dec(10), &format!("{year}-{m:02}-01"))
        })
        .collect();
    let trend = metrics::trend(&txs, metrics::TREND_MONTHS);
    assert_eq!(trend.len(), 12);
    assert_eq!(trend.first().unwrap().month, "2023-04");
    assert_eq!(trend.last().unwrap().month, "2024-03");
}

#[test]
fn gross_profit_is_revenue_minus_expense() {
    let sets = [
        two_months(),
        vec![],
        vec![tx(TxKind::Expense, dec(90), "2024-05-05")],
        vec![
            tx(TxKind::Budget, dec(7), "2024-05-05"),
            tx(TxKind::Revenue, Decimal::new(1999, 2), "2024-05-06"),
        ],
    ];
    for set in &sets {
        assert_eq!(
            metrics::sum_by_kind(set, TxKind::Revenue) - metrics::sum_by_kind(set, TxKind::Expense),
            metrics::gross_profit(set)
        );
    }
}

#[test]
fn growth_is_zero_without_previous_revenue() {
    let current = vec![tx(TxKind::Revenue, dec(5000), "2024-02-01")];
    let previous = vec![tx(TxKind::Expense, dec(100), "2024-01-01")];
    assert_eq!(metrics::month_over_month_growth(&current, &previous), Decimal::ZERO);
    assert_eq!(metrics::month_over_month_growth(&current, &[]), Decimal::ZERO);

    let previous = vec![tx(TxKind::Revenue, dec(4000), "2024-01-01")];
    assert_eq!(metrics::month_over_month_growth(&current, &previous), dec(25));
}

#[test]
fn asset_distribution_sorted_and_sums_to_hundred() {
    let shares = metrics::asset_distribution(&[asset("A", dec(100)), asset("B", dec(300))]);
    assert_eq!(shares[0].name, "B");
    assert_eq!(shares[0].percentage, dec(75));
    assert_eq!(shares[1].name, "A");
    assert_eq!(shares[1].percentage, dec(25));

    let thirds = metrics::asset_distribution(&[
        asset("x", dec(1)),
        asset("y", dec(1)),
        asset("z", dec(1)),
    ]);
    let sum: Decimal = thirds.iter().map(|s| s.percentage).sum();
    assert!((sum - dec(100)).abs() < Decimal::new(1, 6));
}

#[test]
fn zero_value_assets_get_zero_share() {
    let shares = metrics::asset_distribution(&[asset("A", Decimal::ZERO)]);
    assert_eq!(shares[0].percentage, Decimal::ZERO);
    assert!(metrics::asset_distribution(&[]).is_empty());
}

#[test]
fn health_score_stays_in_range() {
    let values = [
        dec(-1000),
        dec(-1),
        Decimal::ZERO,
        Decimal::new(5, 1),
        dec(5),
        dec(6),
        dec(1_000_000),
    ];
    for m in values {
        for g in values {
            for t in values {
                assert!(metrics::health_score(m, g, t) <= 100);
            }
        }
    }
    assert_eq!(metrics::health_score(dec(10), dec(6), dec(1)), 100);
    assert_eq!(metrics::health_score(dec(10), dec(5), Decimal::new(5, 1)), 65);
    assert_eq!(metrics::health_score(dec(-3), dec(-3), dec(-3)), 0);
}

#[test]
fn empty_inputs_yield_zero_metrics() {
    let today = date("2024-06-15");
    let summary = Summary::compute(&[], &[], &[], &[]);
    assert_eq!(summary.total_assets, Decimal::ZERO);
    assert_eq!(summary.gross_profit, Decimal::ZERO);
    assert_eq!(summary.capital, Decimal::ZERO);
    assert_eq!(summary.growth, Decimal::ZERO);

    let profit = ProfitAnalysis::compute(&[]);
    assert_eq!(profit.profit_margin, Decimal::ZERO);
    assert_eq!(profit.break_even_month, None);

    let eval = Evaluation::compute(&[], &[], today);
    assert_eq!(eval.health_score, 0);
    assert_eq!(eval.asset_turnover, Decimal::ZERO);
    assert_eq!(eval.months_in_business, 0);
    assert!(metrics::trend(&[], metrics::TREND_MONTHS).is_empty());
}

#[test]
fn time_in_business_floors_average_months() {
    let txs = vec![tx(TxKind::Revenue, dec(1), "2024-01-01")];
    // 60 days is 1.97 average months.
    assert_eq!(metrics::time_in_business(&txs, date("2024-03-01")), 1);
    // 366 days is 12.02 average months.
    assert_eq!(metrics::time_in_business(&txs, date("2025-01-01")), 12);
}

#[test]
fn zero_revenue_month_has_zero_profit_percent() {
    let txs = vec![tx(TxKind::Expense, dec(50), "2024-04-04")];
    let buckets = metrics::monthly_buckets(&txs);
    assert_eq!(buckets[0].profit, dec(-50));
    assert_eq!(buckets[0].profit_percent(), Decimal::ZERO);
}
