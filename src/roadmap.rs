// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Roadmap items: creation paths, the suggestion catalog and status changes.
//!
//! Status is direct-set. Any of `planned`, `in_progress` and `completed` may
//! be set from any other, so a completed item can be reopened.

use crate::forms::ValidationError;
use crate::models::{Owner, Priority, RoadmapItem, RoadmapKind, RoadmapStatus};
use crate::store::{RecordStore, StoreError};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Insert payload for a roadmap item. Status is always `planned` on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoadmapItem {
    pub title: String,
    pub description: String,
    pub kind: RoadmapKind,
    pub priority: Priority,
    pub target_date: Option<NaiveDate>,
}

impl NewRoadmapItem {
    pub fn user_defined(
        title: &str,
        description: &str,
        priority: Priority,
        target_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::Missing("title"));
        }
        Ok(NewRoadmapItem {
            title: title.to_string(),
            description: description.trim().to_string(),
            kind: RoadmapKind::UserDefined,
            priority,
            target_date,
        })
    }

    /// Copies the suggestion verbatim. Suggested items carry no target date.
    pub fn suggested(s: &Suggestion) -> Self {
        NewRoadmapItem {
            title: s.title.clone(),
            description: s.description.clone(),
            kind: RoadmapKind::Suggested,
            priority: s.priority,
            target_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Immutable table of candidate roadmap items offered to every owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionCatalog {
    items: Vec<Suggestion>,
}

const BUILTIN: [(&str, &str, Priority); 4] = [
    (
        "Quarterly Financial Review",
        "Review financial statements and adjust budget allocations",
        Priority::High,
    ),
    (
        "Cost Optimization Analysis",
        "Identify areas to reduce expenses and improve profit margins",
        Priority::Medium,
    ),
    (
        "Revenue Stream Diversification",
        "Explore new revenue opportunities and market segments",
        Priority::High,
    ),
    (
        "Asset Portfolio Review",
        "Evaluate current assets and plan for future acquisitions",
        Priority::Medium,
    ),
];

impl Default for SuggestionCatalog {
    fn default() -> Self {
        SuggestionCatalog::new(
            BUILTIN
                .iter()
                .map(|(title, description, priority)| Suggestion {
                    title: title.to_string(),
                    description: description.to_string(),
                    priority: *priority,
                })
                .collect(),
        )
    }
}

impl SuggestionCatalog {
    pub fn new(items: Vec<Suggestion>) -> Self {
        SuggestionCatalog { items }
    }

    /// Reads a JSON array of `{title, description, priority}` objects.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Read catalog {}", path.display()))?;
        let items: Vec<Suggestion> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid catalog JSON in {}", path.display()))?;
        if items.iter().any(|s| s.title.trim().is_empty()) {
            return Err(anyhow!("Catalog {} has an item without a title", path.display()));
        }
        Ok(SuggestionCatalog::new(items))
    }

    /// Catalog from `path` when given, the built-in one otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_json_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Adds catalog entry `index` (0-based) for `owner`.
pub fn adopt_suggestion(
    store: &dyn RecordStore,
    owner: &Owner,
    catalog: &SuggestionCatalog,
    index: usize,
) -> Result<RoadmapItem> {
    let suggestion = catalog.get(index).ok_or_else(|| {
        anyhow!(
            "No suggestion #{} (catalog has {} items)",
            index + 1,
            catalog.len()
        )
    })?;
    let item = store
        .insert_roadmap_item(owner, &NewRoadmapItem::suggested(suggestion))
        .with_context(|| format!("Add suggested item '{}'", suggestion.title))?;
    tracing::info!(owner = %owner, id = item.id, title = %item.title, "suggested item added");
    Ok(item)
}

pub fn set_status(
    store: &dyn RecordStore,
    owner: &Owner,
    id: i64,
    status: RoadmapStatus,
) -> Result<RoadmapItem, StoreError> {
    let item = store.update_roadmap_status(owner, id, status)?;
    tracing::info!(owner = %owner, id, status = %status, "roadmap status set");
    Ok(item)
}

/// Item count per status, every status present (zero when unused).
pub fn status_counts(items: &[RoadmapItem]) -> BTreeMap<&'static str, usize> {
    let mut counts: BTreeMap<&'static str, usize> =
        RoadmapStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
    for item in items {
        *counts.entry(item.status.as_str()).or_insert(0) += 1;
    }
    counts
}
