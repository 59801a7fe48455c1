// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forms::{AssetDraft, submit_asset};
use crate::metrics::total_assets;
use crate::models::Owner;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, parse_id, pretty_table, today};
use anyhow::{Context, Result};

pub fn handle(store: &dyn RecordStore, owner: &Owner, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let get = |name: &str| sub.get_one::<String>(name).cloned().unwrap_or_default();
            let mut draft = AssetDraft {
                name: get("name"),
                value: get("value"),
                category: get("category"),
                acquired_date: get("acquired"),
            };
            let asset = submit_asset(store, owner, &mut draft, today())?;
            println!(
                "Added asset '{}' worth {} (id {})",
                asset.name,
                fmt_money(&asset.value),
                asset.id
            );
        }
        Some(("list", sub)) => {
            let assets = store.select_assets(owner).context("Fetch assets")?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &assets)? {
                let total = total_assets(&assets);
                let mut data: Vec<Vec<String>> = assets
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.category.clone(),
                            a.acquired_date.to_string(),
                            fmt_money(&a.value),
                        ]
                    })
                    .collect();
                data.push(vec![
                    String::new(),
                    "Total".into(),
                    String::new(),
                    String::new(),
                    fmt_money(&total),
                ]);
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Category", "Acquired", "Value"], data)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").map(String::as_str).unwrap_or_default())?;
            store
                .delete_asset(owner, id)
                .with_context(|| format!("Remove asset {}", id))?;
            tracing::info!(owner = %owner, id, "asset removed");
            println!("Removed asset {}", id);
        }
        _ => {}
    }
    Ok(())
}
