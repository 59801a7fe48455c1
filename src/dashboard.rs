// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard refresh.
//!
//! A refresh fetches every table it needs concurrently and only computes the
//! panels once all fetches have succeeded. Published views are guarded by a
//! refresh generation so a slow, older refresh never replaces a newer view,
//! and a failed refresh leaves the current view in place.

use crate::metrics::{
    self, AssetShare, Evaluation, MonthlyBucket, ProfitAnalysis, Summary, TREND_MONTHS,
};
use crate::models::{Asset, Owner, RoadmapItem, Transaction};
use crate::roadmap::status_counts;
use crate::store::{RecordStore, StoreError, TransactionQuery};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::ScopedJoinHandle;

/// Rows shown in the recent transactions panel.
pub const RECENT_LIMIT: usize = 10;

/// Raw rows for one owner, as of `today`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub today: NaiveDate,
    pub assets: Vec<Asset>,
    pub transactions: Vec<Transaction>,
    pub current_month: Vec<Transaction>,
    pub previous_month: Vec<Transaction>,
    pub recent: Vec<Transaction>,
    pub roadmap: Vec<RoadmapItem>,
}

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("reference date {0} is outside the supported calendar range")]
    DateOutOfRange(NaiveDate),
}

fn join<T>(handle: ScopedJoinHandle<'_, Result<T, StoreError>>) -> Result<T, StoreError> {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

/// Issues the independent fetches concurrently and waits for all of them.
/// Any failure fails the whole snapshot.
pub fn fetch_snapshot(
    store: &dyn RecordStore,
    owner: &Owner,
    today: NaiveDate,
) -> Result<Snapshot, RefreshError> {
    let (cur_from, cur_to) =
        metrics::month_bounds(today).ok_or(RefreshError::DateOutOfRange(today))?;
    let (prev_from, prev_to) =
        metrics::previous_month_bounds(today).ok_or(RefreshError::DateOutOfRange(today))?;

    std::thread::scope(|s| -> Result<Snapshot, RefreshError> {
        let assets = s.spawn(|| store.select_assets(owner));
        let transactions = s.spawn(|| store.select_transactions(owner, &TransactionQuery::all()));
        let current_month = s.spawn(|| {
            store.select_transactions(owner, &TransactionQuery::between(cur_from, cur_to))
        });
        let previous_month = s.spawn(|| {
            store.select_transactions(owner, &TransactionQuery::between(prev_from, prev_to))
        });
        let recent =
            s.spawn(|| store.select_transactions(owner, &TransactionQuery::recent(RECENT_LIMIT)));
        let roadmap = s.spawn(|| store.select_roadmap_items(owner));

        Ok(Snapshot {
            today,
            assets: join(assets)?,
            transactions: join(transactions)?,
            current_month: join(current_month)?,
            previous_month: join(previous_month)?,
            recent: join(recent)?,
            roadmap: join(roadmap)?,
        })
    })
}

/// Every panel of the dashboard, computed from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub owner: Owner,
    pub as_of: NaiveDate,
    pub summary: Summary,
    pub trend: Vec<MonthlyBucket>,
    pub assets: Vec<AssetShare>,
    pub profit: ProfitAnalysis,
    pub evaluation: Evaluation,
    pub recent: Vec<Transaction>,
    pub roadmap: Vec<RoadmapItem>,
    pub roadmap_status: BTreeMap<&'static str, usize>,
}

impl DashboardView {
    pub fn from_snapshot(owner: &Owner, snap: Snapshot) -> Self {
        let summary = Summary::compute(
            &snap.assets,
            &snap.transactions,
            &snap.current_month,
            &snap.previous_month,
        );
        DashboardView {
            owner: owner.clone(),
            as_of: snap.today,
            summary,
            trend: metrics::trend(&snap.transactions, TREND_MONTHS),
            assets: metrics::asset_distribution(&snap.assets),
            profit: ProfitAnalysis::compute(&snap.transactions),
            evaluation: Evaluation::compute(&snap.transactions, &snap.assets, snap.today),
            roadmap_status: status_counts(&snap.roadmap),
            recent: snap.recent,
            roadmap: snap.roadmap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

struct Published {
    ticket: RefreshTicket,
    view: Arc<DashboardView>,
}

/// Holds the most recently published view.
#[derive(Default)]
pub struct Dashboard {
    issued: AtomicU64,
    published: RwLock<Option<Published>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a refresh generation. Later tickets compare greater.
    pub fn begin(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Publishes `view` unless a newer generation is already showing.
    pub fn publish(&self, ticket: RefreshTicket, view: Arc<DashboardView>) -> bool {
        let mut slot = self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = slot.as_ref() {
            if current.ticket >= ticket {
                tracing::debug!(
                    ticket = ticket.0,
                    showing = current.ticket.0,
                    "dropping stale dashboard refresh"
                );
                return false;
            }
        }
        *slot = Some(Published { ticket, view });
        true
    }

    pub fn current(&self) -> Option<Arc<DashboardView>> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|p| Arc::clone(&p.view))
    }

    /// Fetches, computes and publishes a fresh view. On failure the error is
    /// logged and returned and the previously published view stays current.
    pub fn refresh(
        &self,
        store: &dyn RecordStore,
        owner: &Owner,
        today: NaiveDate,
    ) -> Result<Arc<DashboardView>, RefreshError> {
        let ticket = self.begin();
        let snap = match fetch_snapshot(store, owner, today) {
            Ok(snap) => snap,
            Err(err) => {
                tracing::error!(owner = %owner, error = %err, "dashboard refresh failed");
                return Err(err);
            }
        };
        let view = Arc::new(DashboardView::from_snapshot(owner, snap));
        if self.publish(ticket, Arc::clone(&view)) {
            tracing::info!(owner = %owner, ticket = ticket.0, "dashboard refreshed");
        }
        Ok(view)
    }
}
