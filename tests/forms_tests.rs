// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bizdash::forms::{
    AssetDraft, MAX_AMOUNT, RoadmapDraft, TransactionDraft, ValidationError, submit_asset,
    submit_roadmap_item, submit_transaction,
};
use bizdash::models::{
    Asset, NewAsset, NewTransaction, Owner, Priority, RoadmapItem, RoadmapStatus, Transaction,
    TxKind,
};
use bizdash::roadmap::NewRoadmapItem;
use bizdash::store::{RecordStore, SqliteStore, StoreError, TransactionQuery};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Reads succeed against an empty database; every insert fails.
struct ReadOnlyStore(SqliteStore);

fn rejected() -> StoreError {
    StoreError::Backend(rusqlite::Error::QueryReturnedNoRows)
}

impl RecordStore for ReadOnlyStore {
    fn insert_transaction(&self, _: &Owner, _: &NewTransaction) -> Result<Transaction, StoreError> {
        Err(rejected())
    }
    fn select_transactions(
        &self,
        owner: &Owner,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.0.select_transactions(owner, query)
    }
    fn delete_transaction(&self, owner: &Owner, id: i64) -> Result<(), StoreError> {
        self.0.delete_transaction(owner, id)
    }
    fn insert_asset(&self, _: &Owner, _: &NewAsset) -> Result<Asset, StoreError> {
        Err(rejected())
    }
    fn select_assets(&self, owner: &Owner) -> Result<Vec<Asset>, StoreError> {
        self.0.select_assets(owner)
    }
    fn delete_asset(&self, owner: &Owner, id: i64) -> Result<(), StoreError> {
        self.0.delete_asset(owner, id)
    }
    fn insert_roadmap_item(&self, _: &Owner, _: &NewRoadmapItem) -> Result<RoadmapItem, StoreError> {
        Err(rejected())
    }
    fn select_roadmap_items(&self, owner: &Owner) -> Result<Vec<RoadmapItem>, StoreError> {
        self.0.select_roadmap_items(owner)
    }
    fn update_roadmap_status(
        &self,
        owner: &Owner,
        id: i64,
        status: RoadmapStatus,
    ) -> Result<RoadmapItem, StoreError> {
        self.0.update_roadmap_status(owner, id, status)
    }
    fn delete_roadmap_item(&self, owner: &Owner, id: i64) -> Result<(), StoreError> {
        self.0.delete_roadmap_item(owner, id)
    }
    fn purge_owner(&self, owner: &Owner) -> Result<(), StoreError> {
        self.0.purge_owner(owner)
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn setup() -> (SqliteStore, Owner) {
    (
        SqliteStore::open_in_memory().unwrap(),
        Owner::new("acme").unwrap(),
    )
}

fn draft(amount: &str) -> TransactionDraft {
    TransactionDraft {
        label: "Consulting".into(),
        kind: "revenue".into(),
        amount: amount.into(),
        category: "Services".into(),
        date: "2024-03-01".into(),
    }
}

#[test]
fn validation_defaults_kind_and_date() {
    let d = TransactionDraft {
        label: "Walk-in sale".into(),
        amount: "12.50".into(),
        ..TransactionDraft::default()
    };
    let new = d.validate(today()).unwrap();
    assert_eq!(new.kind, TxKind::Revenue);
    assert_eq!(new.date, today());
    assert_eq!(new.amount, Decimal::new(1250, 2));
}

#[test]
fn validation_rejects_bad_input() {
    assert_eq!(
        draft("").validate(today()).unwrap_err(),
        ValidationError::Missing("amount")
    );
    assert!(matches!(
        draft("ten").validate(today()).unwrap_err(),
        ValidationError::InvalidNumber { field: "amount", .. }
    ));
    assert_eq!(
        draft("-5").validate(today()).unwrap_err(),
        ValidationError::Negative("amount")
    );

    let mut bad_date = draft("5");
    bad_date.date = "15/03/2024".into();
    assert!(matches!(
        bad_date.validate(today()).unwrap_err(),
        ValidationError::InvalidDate { .. }
    ));

    let mut bad_kind = draft("5");
    bad_kind.kind = "refund".into();
    assert!(matches!(
        bad_kind.validate(today()).unwrap_err(),
        ValidationError::Model(_)
    ));
}

#[test]
fn successful_submit_clears_draft() {
    let (store, owner) = setup();
    let mut d = draft("250");
    let tx = submit_transaction(&store, &owner, &mut d, today()).unwrap();
    assert_eq!(tx.amount, Decimal::from(250));
    assert!(d.is_empty());
    assert_eq!(
        store
            .select_transactions(&owner, &TransactionQuery::all())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn failed_submit_keeps_draft() {
    let (store, owner) = setup();
    let mut d = draft("not money");
    let before = d.clone();
    assert!(submit_transaction(&store, &owner, &mut d, today()).is_err());
    assert_eq!(d, before);
    assert!(store
        .select_transactions(&owner, &TransactionQuery::all())
        .unwrap()
        .is_empty());
}

#[test]
fn asset_draft_round_trip() {
    let (store, owner) = setup();
    let mut d = AssetDraft {
        name: "Delivery van".into(),
        value: "18000".into(),
        category: "Vehicle".into(),
        acquired_date: String::new(),
    };
    let asset = submit_asset(&store, &owner, &mut d, today()).unwrap();
    assert_eq!(asset.acquired_date, today());
    assert!(d.is_empty());

    let mut missing = AssetDraft {
        value: "1".into(),
        ..AssetDraft::default()
    };
    assert!(submit_asset(&store, &owner, &mut missing, today()).is_err());
    assert_eq!(missing.value, "1");
}

#[test]
fn roadmap_draft_defaults_to_medium() {
    let (store, owner) = setup();
    let mut d = RoadmapDraft {
        title: "Open a second location".into(),
        target_date: "2025-01-31".into(),
        ..RoadmapDraft::default()
    };
    let item = submit_roadmap_item(&store, &owner, &mut d).unwrap();
    assert_eq!(item.priority, Priority::Medium);
    assert_eq!(item.target_date, NaiveDate::from_ymd_opt(2025, 1, 31));
    assert!(d.is_empty());

    let mut untitled = RoadmapDraft {
        priority: "high".into(),
        ..RoadmapDraft::default()
    };
    assert!(submit_roadmap_item(&store, &owner, &mut untitled).is_err());
    assert_eq!(untitled.priority, "high");
}

#[test]
fn amounts_are_bounded() {
    let limit = Decimal::from(MAX_AMOUNT);
    assert_eq!(
        draft(&MAX_AMOUNT.to_string()).validate(today()).unwrap().amount,
        limit
    );
    assert_eq!(
        draft("79228162514264337593543950335")
            .validate(today())
            .unwrap_err(),
        ValidationError::TooLarge {
            field: "amount",
            max: limit
        }
    );
    assert_eq!(
        draft("10.005").validate(today()).unwrap_err(),
        ValidationError::TooPrecise("amount")
    );
    assert_eq!(
        draft("10.500").validate(today()).unwrap().amount,
        Decimal::new(1050, 2)
    );

    let (store, owner) = setup();
    let mut huge = AssetDraft {
        name: "Everything".into(),
        value: "1000000000000.01".into(),
        ..AssetDraft::default()
    };
    let before = huge.clone();
    assert!(matches!(
        submit_asset(&store, &owner, &mut huge, today())
            .unwrap_err()
            .downcast::<ValidationError>()
            .unwrap(),
        ValidationError::TooLarge { field: "value", .. }
    ));
    assert_eq!(huge, before);
}

#[test]
fn rejected_insert_keeps_every_draft() {
    let store = ReadOnlyStore(SqliteStore::open_in_memory().unwrap());
    let owner = Owner::new("acme").unwrap();

    let mut tx = draft("250");
    let tx_before = tx.clone();
    assert!(submit_transaction(&store, &owner, &mut tx, today()).is_err());
    assert_eq!(tx, tx_before);

    let mut asset = AssetDraft {
        name: "Delivery van".into(),
        value: "18000".into(),
        category: "Vehicle".into(),
        acquired_date: "2023-09-01".into(),
    };
    let asset_before = asset.clone();
    assert!(submit_asset(&store, &owner, &mut asset, today()).is_err());
    assert_eq!(asset, asset_before);

    let mut item = RoadmapDraft {
        title: "Open a second location".into(),
        priority: "high".into(),
        ..RoadmapDraft::default()
    };
    let item_before = item.clone();
    assert!(submit_roadmap_item(&store, &owner, &mut item).is_err());
    assert_eq!(item, item_before);
}
