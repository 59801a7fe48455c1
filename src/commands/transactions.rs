// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forms::{TransactionDraft, submit_transaction};
use crate::models::{Owner, TxKind};
use crate::store::{DateOrder, RecordStore, TransactionQuery};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_id, pretty_table, today};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(store: &dyn RecordStore, owner: &Owner, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, owner, sub)?,
        Some(("list", sub)) => list(store, owner, sub)?,
        Some(("rm", sub)) => rm(store, owner, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg(sub: &clap::ArgMatches, name: &str) -> String {
    sub.get_one::<String>(name).cloned().unwrap_or_default()
}

fn add(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let mut draft = TransactionDraft {
        label: arg(sub, "label"),
        kind: arg(sub, "type"),
        amount: arg(sub, "amount"),
        category: arg(sub, "category"),
        date: arg(sub, "date"),
    };
    let tx = submit_transaction(store, owner, &mut draft, today())?;
    println!(
        "Recorded {} {} '{}' on {} (id {})",
        tx.kind,
        fmt_money(&tx.amount),
        tx.label,
        tx.date,
        tx.id
    );
    Ok(())
}

fn list(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, owner, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.label.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Label", "Type", "Amount", "Category"], rows)
        );
    }
    Ok(())
}

fn rm(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").map(String::as_str).unwrap_or_default())?;
    store
        .delete_transaction(owner, id)
        .with_context(|| format!("Remove transaction {}", id))?;
    tracing::info!(owner = %owner, id, "transaction removed");
    println!("Removed transaction {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
}

/// Newest first, filtered by the `list` arguments.
pub fn query_rows(
    store: &dyn RecordStore,
    owner: &Owner,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let mut query = TransactionQuery {
        order: DateOrder::Descending,
        limit: sub.get_one::<usize>("limit").copied(),
        ..TransactionQuery::default()
    };
    if let Some(kind) = sub.get_one::<String>("type") {
        query.kind = Some(kind.parse::<TxKind>()?);
    }
    if let Some(from) = sub.get_one::<String>("from") {
        query.from = Some(parse_date(from)?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        query.to = Some(parse_date(to)?);
    }

    let data = store
        .select_transactions(owner, &query)
        .context("Fetch transactions")?
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            label: t.label,
            kind: t.kind.to_string(),
            amount: fmt_money(&t.amount),
            category: t.category,
        })
        .collect();
    Ok(data)
}
