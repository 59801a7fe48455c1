// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived business metrics.
//!
//! Everything here is a pure reduction over a fetched snapshot. Each function
//! is total: empty input yields zero totals, zero rates, no break-even month
//! and an empty distribution. Divisions by a zero denominator yield zero.
//!
//! Months are keyed `YYYY-MM` from the stored calendar date of each row. No
//! timezone conversion is applied; callers pass "today" explicitly (the CLI
//! uses the UTC date).

use crate::models::{Asset, Transaction, TxKind};
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

/// Buckets shown by the revenue trend panel.
pub const TREND_MONTHS: usize = 12;

pub fn total_assets(assets: &[Asset]) -> Decimal {
    assets.iter().map(|a| a.value).sum()
}

pub fn sum_by_kind(transactions: &[Transaction], kind: TxKind) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

pub fn gross_profit(transactions: &[Transaction]) -> Decimal {
    sum_by_kind(transactions, TxKind::Revenue) - sum_by_kind(transactions, TxKind::Expense)
}

pub fn capital(transactions: &[Transaction]) -> Decimal {
    sum_by_kind(transactions, TxKind::Budget) + gross_profit(transactions)
}

/// `(curr - prev) / prev * 100`, or zero when `prev` is zero.
pub fn percent_change(prev: Decimal, curr: Decimal) -> Decimal {
    if prev.is_zero() {
        return Decimal::ZERO;
    }
    (curr - prev) / prev * Decimal::ONE_HUNDRED
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part / whole * Decimal::ONE_HUNDRED
}

pub fn month_over_month_growth(current: &[Transaction], previous: &[Transaction]) -> Decimal {
    percent_change(
        sum_by_kind(previous, TxKind::Revenue),
        sum_by_kind(current, TxKind::Revenue),
    )
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// First and last day of the month containing `date`. `None` when the
/// month after it is past the calendar range chrono can represent.
pub fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = date.with_day(1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

/// First and last day of the month before the one containing `date`.
pub fn previous_month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = date.with_day(1)?;
    Some((first.checked_sub_months(Months::new(1))?, first.pred_opt()?))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub month: String,
    pub revenue: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

impl MonthlyBucket {
    /// Profit as a share of the month's revenue; zero for a month without revenue.
    pub fn profit_percent(&self) -> Decimal {
        percent_of(self.profit, self.revenue)
    }
}

/// Revenue and expense per calendar month, oldest first. Budget rows are not
/// part of any bucket.
pub fn monthly_buckets(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = map
            .entry(month_key(t.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            TxKind::Revenue => entry.0 += t.amount,
            TxKind::Expense => entry.1 += t.amount,
            TxKind::Budget => {}
        }
    }
    map.into_iter()
        .map(|(month, (revenue, expense))| MonthlyBucket {
            month,
            revenue,
            expense,
            profit: revenue - expense,
        })
        .collect()
}

/// The most recent `months` buckets, oldest first.
pub fn trend(transactions: &[Transaction], months: usize) -> Vec<MonthlyBucket> {
    let mut buckets = monthly_buckets(transactions);
    let skip = buckets.len().saturating_sub(months);
    buckets.split_off(skip)
}

/// First month, in chronological order, whose profit is positive.
pub fn break_even_month(buckets: &[MonthlyBucket]) -> Option<&MonthlyBucket> {
    buckets.iter().find(|b| b.profit > Decimal::ZERO)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetShare {
    pub name: String,
    pub value: Decimal,
    pub percentage: Decimal,
}

/// Each asset's share of the total, largest value first.
pub fn asset_distribution(assets: &[Asset]) -> Vec<AssetShare> {
    let total = total_assets(assets);
    let mut shares: Vec<AssetShare> = assets
        .iter()
        .map(|a| AssetShare {
            name: a.name.clone(),
            value: a.value,
            percentage: percent_of(a.value, total),
        })
        .collect();
    shares.sort_by(|a, b| b.value.cmp(&a.value));
    shares
}

pub fn profit_margin(transactions: &[Transaction]) -> Decimal {
    percent_of(
        gross_profit(transactions),
        sum_by_kind(transactions, TxKind::Revenue),
    )
}

pub fn asset_turnover(total_revenue: Decimal, total_assets: Decimal) -> Decimal {
    if total_revenue > Decimal::ZERO && total_assets > Decimal::ZERO {
        total_revenue / total_assets
    } else {
        Decimal::ZERO
    }
}

/// Weighted 0..=100 heuristic over profitability, growth and asset efficiency.
pub fn health_score(profit_margin: Decimal, growth_rate: Decimal, asset_turnover: Decimal) -> u8 {
    let five = Decimal::from(5);
    let half = Decimal::new(5, 1);

    let mut score: i32 = 0;
    if profit_margin > Decimal::ZERO {
        score += 30;
    }
    if growth_rate > five {
        score += 30;
    } else if growth_rate > Decimal::ZERO {
        score += 15;
    }
    if asset_turnover > half {
        score += 40;
    } else if asset_turnover > Decimal::ZERO {
        score += 20;
    }
    score.clamp(0, 100) as u8
}

/// Revenue growth from the earliest to the latest month present. Zero with
/// fewer than two months or no revenue in the earliest month.
pub fn revenue_growth_span(transactions: &[Transaction]) -> Decimal {
    let buckets = monthly_buckets(transactions);
    match (buckets.first(), buckets.last()) {
        (Some(first), Some(last)) if buckets.len() >= 2 => {
            percent_change(first.revenue, last.revenue)
        }
        _ => Decimal::ZERO,
    }
}

/// Whole months (30.44 days each) since the earliest transaction date.
pub fn time_in_business(transactions: &[Transaction], today: NaiveDate) -> i64 {
    let Some(earliest) = transactions.iter().map(|t| t.date).min() else {
        return 0;
    };
    let days = (today - earliest).num_days();
    if days <= 0 {
        return 0;
    }
    days * 100 / 3044
}

/// Headline KPI cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_assets: Decimal,
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub budget: Decimal,
    pub gross_profit: Decimal,
    pub capital: Decimal,
    pub growth: Decimal,
}

impl Summary {
    pub fn compute(
        assets: &[Asset],
        transactions: &[Transaction],
        current_month: &[Transaction],
        previous_month: &[Transaction],
    ) -> Self {
        Summary {
            total_assets: total_assets(assets),
            revenue: sum_by_kind(transactions, TxKind::Revenue),
            expenses: sum_by_kind(transactions, TxKind::Expense),
            budget: sum_by_kind(transactions, TxKind::Budget),
            gross_profit: gross_profit(transactions),
            capital: capital(transactions),
            growth: month_over_month_growth(current_month, previous_month),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitAnalysis {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub gross_profit: Decimal,
    pub profit_margin: Decimal,
    pub break_even_month: Option<String>,
}

impl ProfitAnalysis {
    pub fn compute(transactions: &[Transaction]) -> Self {
        let buckets = monthly_buckets(transactions);
        ProfitAnalysis {
            total_revenue: sum_by_kind(transactions, TxKind::Revenue),
            total_expenses: sum_by_kind(transactions, TxKind::Expense),
            gross_profit: gross_profit(transactions),
            profit_margin: profit_margin(transactions),
            break_even_month: break_even_month(&buckets).map(|b| b.month.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Strong,
    Fair,
    Weak,
}

impl HealthBand {
    pub fn of(score: u8) -> Self {
        match score {
            70.. => HealthBand::Strong,
            50..=69 => HealthBand::Fair,
            _ => HealthBand::Weak,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthBand::Strong => "strong",
            HealthBand::Fair => "fair",
            HealthBand::Weak => "weak",
        }
    }
}

/// Business evaluation panel. Rates are rounded for display after the score
/// has been computed from the unrounded values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub health_score: u8,
    pub band: HealthBand,
    pub growth_rate: Decimal,
    pub asset_turnover: Decimal,
    pub months_in_business: i64,
}

impl Evaluation {
    pub fn compute(transactions: &[Transaction], assets: &[Asset], today: NaiveDate) -> Self {
        let revenue = sum_by_kind(transactions, TxKind::Revenue);
        let growth = revenue_growth_span(transactions);
        let turnover = asset_turnover(revenue, total_assets(assets));
        let score = health_score(profit_margin(transactions), growth, turnover);
        Evaluation {
            health_score: score,
            band: HealthBand::of(score),
            growth_rate: growth.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            asset_turnover: turnover
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            months_in_business: time_in_business(transactions, today),
        }
    }
}
