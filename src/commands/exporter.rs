// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Owner;
use crate::store::{RecordStore, TransactionQuery};
use anyhow::{Context, Result, bail};
use serde_json::json;
use std::path::Path;

pub fn handle(store: &dyn RecordStore, owner: &Owner, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = sub
                .get_one::<String>("format")
                .map(|s| s.to_lowercase())
                .unwrap_or_default();
            let out = sub.get_one::<String>("out").cloned().unwrap_or_default();
            let n = export_transactions(store, owner, &fmt, Path::new(&out))?;
            println!("Exported {} transactions to {}", n, out);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Writes every transaction of `owner`, oldest first. Returns the row count.
pub fn export_transactions(
    store: &dyn RecordStore,
    owner: &Owner,
    fmt: &str,
    out: &Path,
) -> Result<usize> {
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let rows = store
        .select_transactions(owner, &TransactionQuery::all())
        .context("Fetch transactions")?;

    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out.display()))?;
            wtr.write_record(["date", "label", "type", "amount", "category", "created_at"])?;
            for t in &rows {
                wtr.write_record([
                    t.date.to_string(),
                    t.label.clone(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.created_at.to_rfc3339(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.to_string(),
                        "label": t.label,
                        "type": t.kind.as_str(),
                        "amount": t.amount.to_string(),
                        "category": t.category,
                        "created_at": t.created_at.to_rfc3339(),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
    }
    tracing::info!(owner = %owner, rows = rows.len(), path = %out.display(), "transactions exported");
    Ok(rows.len())
}
