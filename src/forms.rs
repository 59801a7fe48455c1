// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input drafts for the add flows.
//!
//! A draft holds raw user input. Submitting validates it, inserts it, and
//! clears the draft only once the insert has succeeded; on any failure the
//! draft keeps what the user typed and the error is returned.

use crate::models::{
    Asset, ModelError, NewAsset, NewTransaction, Owner, Priority, RoadmapItem, Transaction,
    TxKind,
};
use crate::roadmap::NewRoadmapItem;
use crate::store::RecordStore;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Largest single amount or asset value accepted. The schema carries the
/// same bound, which keeps every aggregate well inside `Decimal` range.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid {field} '{value}', expected a decimal number")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{field} must not exceed {max}")]
    TooLarge { field: &'static str, max: Decimal },
    #[error("{0} has more than two decimal places")]
    TooPrecise(&'static str),
    #[error("invalid {field} '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error(transparent)]
    Model(#[from] ModelError),
}

fn required(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let v = raw.trim();
    if v.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(v.to_string())
}

fn money(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let v = required(field, raw)?;
    let amount = v
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidNumber { field, value: v })?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::Negative(field));
    }
    let max = Decimal::from(MAX_AMOUNT);
    if amount > max {
        return Err(ValidationError::TooLarge { field, max });
    }
    if amount.normalize().scale() > 2 {
        return Err(ValidationError::TooPrecise(field));
    }
    Ok(amount)
}

fn date_or(field: &'static str, raw: &str, default: NaiveDate) -> Result<NaiveDate, ValidationError> {
    match optional_date(field, raw)? {
        Some(d) => Ok(d),
        None => Ok(default),
    }
}

fn optional_date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let v = raw.trim();
    if v.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: v.to_string(),
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub label: String,
    /// Empty means revenue.
    pub kind: String,
    pub amount: String,
    pub category: String,
    /// Empty means today.
    pub date: String,
}

impl TransactionDraft {
    pub fn validate(&self, today: NaiveDate) -> Result<NewTransaction, ValidationError> {
        let kind = if self.kind.trim().is_empty() {
            TxKind::Revenue
        } else {
            self.kind.parse::<TxKind>()?
        };
        Ok(NewTransaction {
            label: required("label", &self.label)?,
            kind,
            amount: money("amount", &self.amount)?,
            category: self.category.trim().to_string(),
            date: date_or("date", &self.date, today)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetDraft {
    pub name: String,
    pub value: String,
    pub category: String,
    /// Empty means today.
    pub acquired_date: String,
}

impl AssetDraft {
    pub fn validate(&self, today: NaiveDate) -> Result<NewAsset, ValidationError> {
        Ok(NewAsset {
            name: required("name", &self.name)?,
            value: money("value", &self.value)?,
            category: self.category.trim().to_string(),
            acquired_date: date_or("acquired date", &self.acquired_date, today)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadmapDraft {
    pub title: String,
    pub description: String,
    /// Empty means medium.
    pub priority: String,
    pub target_date: String,
}

impl RoadmapDraft {
    pub fn validate(&self) -> Result<NewRoadmapItem, ValidationError> {
        let priority = if self.priority.trim().is_empty() {
            Priority::default()
        } else {
            self.priority.parse::<Priority>()?
        };
        NewRoadmapItem::user_defined(
            &self.title,
            &self.description,
            priority,
            optional_date("target date", &self.target_date)?,
        )
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn submit_transaction(
    store: &dyn RecordStore,
    owner: &Owner,
    draft: &mut TransactionDraft,
    today: NaiveDate,
) -> Result<Transaction> {
    let new = draft.validate(today)?;
    let tx = store.insert_transaction(owner, &new).map_err(|err| {
        tracing::error!(owner = %owner, error = %err, "adding transaction failed");
        err
    });
    let tx = tx.context("Add transaction")?;
    *draft = TransactionDraft::default();
    tracing::info!(owner = %owner, id = tx.id, kind = %tx.kind, amount = %tx.amount, "transaction added");
    Ok(tx)
}

pub fn submit_asset(
    store: &dyn RecordStore,
    owner: &Owner,
    draft: &mut AssetDraft,
    today: NaiveDate,
) -> Result<Asset> {
    let new = draft.validate(today)?;
    let asset = store.insert_asset(owner, &new).map_err(|err| {
        tracing::error!(owner = %owner, error = %err, "adding asset failed");
        err
    });
    let asset = asset.context("Add asset")?;
    *draft = AssetDraft::default();
    tracing::info!(owner = %owner, id = asset.id, value = %asset.value, "asset added");
    Ok(asset)
}

pub fn submit_roadmap_item(
    store: &dyn RecordStore,
    owner: &Owner,
    draft: &mut RoadmapDraft,
) -> Result<RoadmapItem> {
    let new = draft.validate()?;
    let item = store.insert_roadmap_item(owner, &new).map_err(|err| {
        tracing::error!(owner = %owner, error = %err, "adding roadmap item failed");
        err
    });
    let item = item.context("Add roadmap item")?;
    *draft = RoadmapDraft::default();
    tracing::info!(owner = %owner, id = item.id, title = %item.title, "roadmap item added");
    Ok(item)
}
