// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bizdash::dashboard::{Dashboard, DashboardView, RECENT_LIMIT, RefreshError, fetch_snapshot};
use bizdash::forms::MAX_AMOUNT;
use bizdash::models::{
    Asset, NewAsset, NewTransaction, Owner, RoadmapItem, RoadmapStatus, Transaction, TxKind,
};
use bizdash::roadmap::NewRoadmapItem;
use bizdash::store::{RecordStore, SqliteStore, StoreError, TransactionQuery};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Delegates to SQLite until `fail` is set, then every read errors.
struct FlakyStore {
    inner: SqliteStore,
    fail: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        FlakyStore {
            inner: SqliteStore::open_in_memory().unwrap(),
            fail: AtomicBool::new(false),
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(rusqlite::Error::QueryReturnedNoRows));
        }
        Ok(())
    }
}

impl RecordStore for FlakyStore {
    fn insert_transaction(
        &self,
        owner: &Owner,
        new: &NewTransaction,
    ) -> Result<Transaction, StoreError> {
        self.inner.insert_transaction(owner, new)
    }
    fn select_transactions(
        &self,
        owner: &Owner,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.check()?;
        self.inner.select_transactions(owner, query)
    }
    fn delete_transaction(&self, owner: &Owner, id: i64) -> Result<(), StoreError> {
        self.inner.delete_transaction(owner, id)
    }
    fn insert_asset(&self, owner: &Owner, new: &NewAsset) -> Result<Asset, StoreError> {
        self.inner.insert_asset(owner, new)
    }
    fn select_assets(&self, owner: &Owner) -> Result<Vec<Asset>, StoreError> {
        self.check()?;
        self.inner.select_assets(owner)
    }
    fn delete_asset(&self, owner: &Owner, id: i64) -> Result<(), StoreError> {
        self.inner.delete_asset(owner, id)
    }
    fn insert_roadmap_item(
        &self,
        owner: &Owner,
        new: &NewRoadmapItem,
    ) -> Result<RoadmapItem, StoreError> {
        self.inner.insert_roadmap_item(owner, new)
    }
    fn select_roadmap_items(&self, owner: &Owner) -> Result<Vec<RoadmapItem>, StoreError> {
        self.check()?;
        self.inner.select_roadmap_items(owner)
    }
    fn update_roadmap_status(
        &self,
        owner: &Owner,
        id: i64,
        status: RoadmapStatus,
    ) -> Result<RoadmapItem, StoreError> {
        self.inner.update_roadmap_status(owner, id, status)
    }
    fn delete_roadmap_item(&self, owner: &Owner, id: i64) -> Result<(), StoreError> {
        self.inner.delete_roadmap_item(owner, id)
    }
    fn purge_owner(&self, owner: &Owner) -> Result<(), StoreError> {
        self.inner.purge_owner(owner)
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add_tx(store: &dyn RecordStore, owner: &Owner, kind: TxKind, amount: i64, day: &str) {
    store
        .insert_transaction(
            owner,
            &NewTransaction {
                label: "row".into(),
                kind,
                amount: Decimal::from(amount),
                category: String::new(),
                date: date(day),
            },
        )
        .unwrap();
}

fn populated() -> (FlakyStore, Owner) {
    let store = FlakyStore::new();
    let owner = Owner::new("acme").unwrap();
    add_tx(&store, &owner, TxKind::Revenue, 1000, "2024-01-10");
    add_tx(&store, &owner, TxKind::Expense, 600, "2024-01-20");
    add_tx(&store, &owner, TxKind::Revenue, 1200, "2024-02-03");
    add_tx(&store, &owner, TxKind::Expense, 500, "2024-02-28");
    store
        .insert_asset(
            &owner,
            &NewAsset {
                name: "Office".into(),
                value: Decimal::from(4400),
                category: "Property".into(),
                acquired_date: date("2023-06-01"),
            },
        )
        .unwrap();
    (store, owner)
}

#[test]
fn snapshot_splits_current_and_previous_month() {
    let (store, owner) = populated();
    let snap = fetch_snapshot(&store, &owner, date("2024-02-15")).unwrap();
    assert_eq!(snap.transactions.len(), 4);
    assert_eq!(snap.current_month.len(), 2);
    assert_eq!(snap.previous_month.len(), 2);
    assert_eq!(snap.recent[0].date, date("2024-02-28"));
    assert!(snap.recent.len() <= RECENT_LIMIT);
    assert_eq!(snap.assets.len(), 1);
}

#[test]
fn refresh_computes_every_panel() {
    let (store, owner) = populated();
    let dash = Dashboard::new();
    let view = dash.refresh(&store, &owner, date("2024-02-15")).unwrap();

    assert_eq!(view.summary.total_assets, Decimal::from(4400));
    assert_eq!(view.summary.gross_profit, Decimal::from(1100));
    assert_eq!(view.summary.growth, Decimal::from(20));
    assert_eq!(view.trend.len(), 2);
    assert_eq!(view.profit.break_even_month.as_deref(), Some("2024-01"));
    assert_eq!(view.assets[0].percentage, Decimal::from(100));
    // margin 50%, growth 20%, turnover 0.5 => 30 + 30 + 20
    assert_eq!(view.evaluation.health_score, 80);
    assert_eq!(view.roadmap_status["planned"], 0);
    assert!(Arc::ptr_eq(&view, &dash.current().unwrap()));
}

#[test]
fn failed_refresh_keeps_previous_view() {
    let (store, owner) = populated();
    let dash = Dashboard::new();
    let first = dash.refresh(&store, &owner, date("2024-02-15")).unwrap();

    store.fail.store(true, Ordering::SeqCst);
    assert!(dash.refresh(&store, &owner, date("2024-02-16")).is_err());

    let shown = dash.current().unwrap();
    assert!(Arc::ptr_eq(&first, &shown));
    assert_eq!(shown.as_of, date("2024-02-15"));
}

#[test]
fn failed_first_refresh_publishes_nothing() {
    let (store, owner) = populated();
    store.fail.store(true, Ordering::SeqCst);
    let dash = Dashboard::new();
    assert!(dash.refresh(&store, &owner, date("2024-02-15")).is_err());
    assert!(dash.current().is_none());
}

fn view_for(store: &dyn RecordStore, owner: &Owner, day: &str) -> Arc<DashboardView> {
    let snap = fetch_snapshot(store, owner, date(day)).unwrap();
    Arc::new(DashboardView::from_snapshot(owner, snap))
}

#[test]
fn older_refresh_cannot_replace_newer_view() {
    let (store, owner) = populated();
    let dash = Dashboard::new();

    let older = dash.begin();
    let newer = dash.begin();
    assert!(older < newer);

    assert!(dash.publish(newer, view_for(&store, &owner, "2024-02-20")));
    assert!(!dash.publish(older, view_for(&store, &owner, "2024-02-10")));
    assert_eq!(dash.current().unwrap().as_of, date("2024-02-20"));
}

#[test]
fn views_are_scoped_to_owner() {
    let (store, _) = populated();
    let other = Owner::new("globex").unwrap();
    add_tx(&store, &other, TxKind::Revenue, 5, "2024-02-01");

    let view = Dashboard::new()
        .refresh(&store, &other, date("2024-02-15"))
        .unwrap();
    assert_eq!(view.owner, other);
    assert_eq!(view.summary.revenue, Decimal::from(5));
    assert_eq!(view.summary.total_assets, Decimal::ZERO);
}

#[test]
fn last_representable_month_is_an_error() {
    let (store, owner) = populated();
    let dash = Dashboard::new();
    assert!(matches!(
        dash.refresh(&store, &owner, NaiveDate::MAX),
        Err(RefreshError::DateOutOfRange(d)) if d == NaiveDate::MAX
    ));
    assert!(dash.current().is_none());
    assert!(dash.refresh(&store, &owner, date("2024-02-15")).is_ok());
}

#[test]
fn largest_amounts_aggregate_without_overflow() {
    let store = FlakyStore::new();
    let owner = Owner::new("acme").unwrap();
    let day = "2024-02-10";
    let mut tx = NewTransaction {
        label: "row".into(),
        kind: TxKind::Revenue,
        amount: Decimal::from(MAX_AMOUNT),
        category: String::new(),
        date: date(day),
    };
    for kind in [TxKind::Revenue, TxKind::Revenue, TxKind::Budget, TxKind::Expense] {
        tx.kind = kind;
        store.insert_transaction(&owner, &tx).unwrap();
    }
    store
        .insert_asset(
            &owner,
            &NewAsset {
                name: "Everything".into(),
                value: Decimal::from(MAX_AMOUNT),
                category: String::new(),
                acquired_date: date("2020-01-01"),
            },
        )
        .unwrap();

    let view = Dashboard::new()
        .refresh(&store, &owner, date("2024-02-15"))
        .unwrap();
    let max = Decimal::from(MAX_AMOUNT);
    assert_eq!(view.summary.revenue, max * Decimal::TWO);
    assert_eq!(view.summary.gross_profit, max);
    assert_eq!(view.summary.capital, max * Decimal::TWO);
    assert_eq!(view.evaluation.asset_turnover, Decimal::TWO);
}
