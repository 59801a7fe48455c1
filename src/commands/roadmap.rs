// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forms::{RoadmapDraft, submit_roadmap_item};
use crate::models::{Owner, RoadmapStatus};
use crate::roadmap::{SuggestionCatalog, adopt_suggestion, set_status, status_counts};
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_id, pretty_table};
use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

pub fn handle(store: &dyn RecordStore, owner: &Owner, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, owner, sub)?,
        Some(("suggestions", sub)) => suggestions(sub)?,
        Some(("adopt", sub)) => adopt(store, owner, sub)?,
        Some(("list", sub)) => list(store, owner, sub)?,
        Some(("status", sub)) => status(store, owner, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").map(String::as_str).unwrap_or_default())?;
            store
                .delete_roadmap_item(owner, id)
                .with_context(|| format!("Remove roadmap item {}", id))?;
            tracing::info!(owner = %owner, id, "roadmap item removed");
            println!("Removed roadmap item {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn catalog(sub: &clap::ArgMatches) -> Result<SuggestionCatalog> {
    SuggestionCatalog::load(sub.get_one::<PathBuf>("catalog").map(PathBuf::as_path))
}

fn add(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let get = |name: &str| sub.get_one::<String>(name).cloned().unwrap_or_default();
    let mut draft = RoadmapDraft {
        title: get("title"),
        description: get("description"),
        priority: get("priority"),
        target_date: get("target"),
    };
    let item = submit_roadmap_item(store, owner, &mut draft)?;
    println!("Added roadmap item '{}' (id {})", item.title, item.id);
    Ok(())
}

pub fn suggestions(sub: &clap::ArgMatches) -> Result<()> {
    let catalog = catalog(sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &catalog.items())? {
        let rows = catalog
            .items()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                vec![
                    (i + 1).to_string(),
                    s.title.clone(),
                    s.description.clone(),
                    s.priority.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["#", "Title", "Description", "Priority"], rows)
        );
    }
    Ok(())
}

fn adopt(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let catalog = catalog(sub)?;
    let index = *sub
        .get_one::<usize>("index")
        .ok_or_else(|| anyhow!("--index is required"))?;
    if index == 0 {
        return Err(anyhow!("--index is 1-based"));
    }
    let item = adopt_suggestion(store, owner, &catalog, index - 1)?;
    println!("Added suggested item '{}' (id {})", item.title, item.id);
    Ok(())
}

fn list(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let items = store
        .select_roadmap_items(owner)
        .context("Fetch roadmap items")?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    let rows = items
        .iter()
        .map(|i| {
            vec![
                i.id.to_string(),
                i.title.clone(),
                i.kind.to_string(),
                i.status.to_string(),
                i.priority.to_string(),
                i.target_date.map(|d| d.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Title", "Type", "Status", "Priority", "Target"],
            rows
        )
    );
    let footer: Vec<String> = status_counts(&items)
        .into_iter()
        .map(|(status, n)| format!("{status}: {n}"))
        .collect();
    println!("{}", footer.join("  "));
    Ok(())
}

fn status(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").map(String::as_str).unwrap_or_default())?;
    let status = sub
        .get_one::<String>("set")
        .ok_or_else(|| anyhow!("--set is required"))?
        .parse::<RoadmapStatus>()?;
    let item = set_status(store, owner, id, status)
        .with_context(|| format!("Update roadmap item {}", id))?;
    println!("'{}' is now {}", item.title, item.status);
    Ok(())
}
