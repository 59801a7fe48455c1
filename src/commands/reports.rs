// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::{Dashboard, DashboardView};
use crate::metrics::{
    self, AssetShare, Evaluation, MonthlyBucket, ProfitAnalysis, Summary, TREND_MONTHS,
};
use crate::models::Owner;
use crate::store::{RecordStore, TransactionQuery};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, parse_date, pretty_table, today};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::sync::Arc;

pub fn handle(store: &dyn RecordStore, owner: &Owner, m: &clap::ArgMatches) -> Result<()> {
    let Some((name, sub)) = m.subcommand() else {
        return Ok(());
    };
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if name == "trend" {
        let buckets = trend_buckets(store, owner, sub)?;
        if !maybe_print_json(json_flag, jsonl_flag, &buckets)? {
            print_trend(&buckets);
        }
        return Ok(());
    }
    let view = load(store, owner, sub)?;
    match name {
        "summary" => {
            if !maybe_print_json(json_flag, jsonl_flag, &view.summary)? {
                print_summary(&view.summary);
            }
        }
        "assets" => {
            if !maybe_print_json(json_flag, jsonl_flag, &view.assets)? {
                print_assets(&view.assets);
            }
        }
        "profit" => {
            if !maybe_print_json(json_flag, jsonl_flag, &view.profit)? {
                print_profit(&view.profit);
            }
        }
        "health" => {
            if !maybe_print_json(json_flag, jsonl_flag, &view.evaluation)? {
                print_evaluation(&view.evaluation);
            }
        }
        _ => {}
    }
    Ok(())
}

/// The `dashboard` command: every panel from a single refresh.
pub fn dashboard(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let view = load(store, owner, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &*view)? {
        return Ok(());
    }
    println!("Dashboard for {} as of {}", view.owner, view.as_of);
    print_summary(&view.summary);
    print_trend(&view.trend);
    print_assets(&view.assets);
    print_profit(&view.profit);
    print_evaluation(&view.evaluation);
    let recent = view
        .recent
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.label.clone(),
                t.kind.to_string(),
                fmt_money(&t.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Label", "Type", "Amount"], recent)
    );
    let roadmap: Vec<String> = view
        .roadmap_status
        .iter()
        .map(|(status, n)| format!("{status}: {n}"))
        .collect();
    println!("Roadmap  {}", roadmap.join("  "));
    Ok(())
}

/// Buckets for `report trend`: the last `--months` calendar months with
/// activity on or before `--as-of`, oldest first.
pub fn trend_buckets(
    store: &dyn RecordStore,
    owner: &Owner,
    sub: &clap::ArgMatches,
) -> Result<Vec<MonthlyBucket>> {
    let months = sub.get_one::<usize>("months").copied().unwrap_or(TREND_MONTHS);
    let query = TransactionQuery {
        to: Some(as_of(sub)?),
        ..TransactionQuery::all()
    };
    let transactions = store
        .select_transactions(owner, &query)
        .with_context(|| format!("Load transactions for {}", owner))?;
    Ok(metrics::trend(&transactions, months))
}

fn as_of(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("as_of") {
        Some(raw) => parse_date(raw),
        None => Ok(today()),
    }
}

fn load(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<Arc<DashboardView>> {
    let day = as_of(sub)?;
    Dashboard::new()
        .refresh(store, owner, day)
        .with_context(|| format!("Load metrics for {}", owner))
}

fn print_summary(s: &Summary) {
    let rows = vec![
        vec!["Business value (total assets)".into(), fmt_money(&s.total_assets)],
        vec!["Capital (budget + profit)".into(), fmt_money(&s.capital)],
        vec!["Revenue".into(), fmt_money(&s.revenue)],
        vec!["Expenses".into(), fmt_money(&s.expenses)],
        vec!["Budget".into(), fmt_money(&s.budget)],
        vec!["Gross profit".into(), fmt_money(&s.gross_profit)],
        vec!["Growth (month over month)".into(), fmt_percent(&s.growth)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
}

fn print_trend(buckets: &[MonthlyBucket]) {
    let rows = buckets
        .iter()
        .map(|b| {
            vec![
                b.month.clone(),
                fmt_money(&b.revenue),
                fmt_money(&b.expense),
                fmt_money(&b.profit),
                format!("{:.1}%", b.profit_percent().round_dp(1)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Revenue", "Expense", "Profit", "Profit %"], rows)
    );
}

fn print_assets(shares: &[AssetShare]) {
    let rows = shares
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                fmt_money(&a.value),
                format!("{:.1}%", a.percentage.round_dp(1)),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Asset", "Value", "Share"], rows));
}

fn print_profit(p: &ProfitAnalysis) {
    let rows = vec![
        vec!["Total revenue".into(), fmt_money(&p.total_revenue)],
        vec!["Total expenses".into(), fmt_money(&p.total_expenses)],
        vec!["Gross profit".into(), fmt_money(&p.gross_profit)],
        vec![
            "Profit margin".into(),
            format!("{:.1}%", p.profit_margin.round_dp(1)),
        ],
        vec![
            "Break-even month".into(),
            p.break_even_month
                .clone()
                .unwrap_or_else(|| "not yet".to_string()),
        ],
    ];
    println!("{}", pretty_table(&["Profit", "Value"], rows));
}

fn print_evaluation(e: &Evaluation) {
    let rows = vec![
        vec![
            "Health score".into(),
            format!("{} / 100 ({})", e.health_score, e.band.as_str()),
        ],
        vec!["Growth rate".into(), format!("{}%", e.growth_rate)],
        vec![
            "Asset turnover".into(),
            format!("{}x", e.asset_turnover.round_dp(2)),
        ],
        vec![
            "Time in business".into(),
            format!("{} months", e.months_in_business),
        ],
    ];
    println!("{}", pretty_table(&["Evaluation", "Value"], rows));
}
