// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Table-scoped record store.
//!
//! Every call takes the [`Owner`] explicitly; nothing here reads or writes
//! rows belonging to another owner. [`SqliteStore`] is the shipped backend.

use crate::models::{
    Asset, NewAsset, NewTransaction, Owner, RoadmapItem, RoadmapStatus, Transaction, TxKind,
};
use crate::roadmap::NewRoadmapItem;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, Row, params};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(#[from] rusqlite::Error),
    #[error("corrupt value '{value}' in {table}.{column}")]
    Corrupt {
        table: &'static str,
        column: &'static str,
        value: String,
    },
    #[error("no {table} row with id {id}")]
    NotFound { table: &'static str, id: i64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrder {
    #[default]
    Ascending,
    Descending,
}

/// Filter for [`RecordStore::select_transactions`]. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub kind: Option<TxKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub order: DateOrder,
    pub limit: Option<usize>,
}

impl TransactionQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        TransactionQuery {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    /// Newest first, at most `limit` rows.
    pub fn recent(limit: usize) -> Self {
        TransactionQuery {
            order: DateOrder::Descending,
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: TxKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

pub trait RecordStore: Send + Sync {
    fn insert_transaction(
        &self,
        owner: &Owner,
        new: &NewTransaction,
    ) -> Result<Transaction, StoreError>;
    fn select_transactions(
        &self,
        owner: &Owner,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, StoreError>;
    fn delete_transaction(&self, owner: &Owner, id: i64) -> Result<(), StoreError>;

    fn insert_asset(&self, owner: &Owner, new: &NewAsset) -> Result<Asset, StoreError>;
    /// Largest value first.
    fn select_assets(&self, owner: &Owner) -> Result<Vec<Asset>, StoreError>;
    fn delete_asset(&self, owner: &Owner, id: i64) -> Result<(), StoreError>;

    fn insert_roadmap_item(
        &self,
        owner: &Owner,
        new: &NewRoadmapItem,
    ) -> Result<RoadmapItem, StoreError>;
    /// Newest first.
    fn select_roadmap_items(&self, owner: &Owner) -> Result<Vec<RoadmapItem>, StoreError>;
    fn update_roadmap_status(
        &self,
        owner: &Owner,
        id: i64,
        status: RoadmapStatus,
    ) -> Result<RoadmapItem, StoreError>;
    fn delete_roadmap_item(&self, owner: &Owner, id: i64) -> Result<(), StoreError>;

    /// Removes every row the owner has in every table.
    fn purge_owner(&self, owner: &Owner) -> Result<(), StoreError>;
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wraps a connection whose schema is already initialised.
    pub fn new(conn: Connection) -> Self {
        SqliteStore {
            conn: Mutex::new(conn),
        }
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        Ok(Self::new(crate::db::open_in_memory()?))
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_column<T: FromStr>(
    table: &'static str,
    column: &'static str,
    raw: String,
) -> Result<T, StoreError> {
    match raw.parse::<T>() {
        Ok(v) => Ok(v),
        Err(_) => Err(StoreError::Corrupt {
            table,
            column,
            value: raw,
        }),
    }
}

const TX_COLUMNS: &str = "id, label, type, amount, category, date, created_at";
const ASSET_COLUMNS: &str = "id, name, value, category, acquired_date, created_at";
const ROADMAP_COLUMNS: &str =
    "id, title, description, type, status, priority, target_date, created_at";

fn read_transaction(r: &Row<'_>, owner: &Owner) -> Result<Transaction, StoreError> {
    Ok(Transaction {
        id: r.get(0)?,
        label: r.get(1)?,
        kind: parse_column("transactions", "type", r.get(2)?)?,
        amount: parse_column("transactions", "amount", r.get(3)?)?,
        category: r.get(4)?,
        date: r.get(5)?,
        created_at: r.get(6)?,
        owner: owner.clone(),
    })
}

fn read_asset(r: &Row<'_>, owner: &Owner) -> Result<Asset, StoreError> {
    Ok(Asset {
        id: r.get(0)?,
        name: r.get(1)?,
        value: parse_column("assets", "value", r.get(2)?)?,
        category: r.get(3)?,
        acquired_date: r.get(4)?,
        created_at: r.get(5)?,
        owner: owner.clone(),
    })
}

fn read_roadmap_item(r: &Row<'_>, owner: &Owner) -> Result<RoadmapItem, StoreError> {
    Ok(RoadmapItem {
        id: r.get(0)?,
        title: r.get(1)?,
        description: r.get(2)?,
        kind: parse_column("roadmap_items", "type", r.get(3)?)?,
        status: parse_column("roadmap_items", "status", r.get(4)?)?,
        priority: parse_column("roadmap_items", "priority", r.get(5)?)?,
        target_date: r.get(6)?,
        created_at: r.get(7)?,
        owner: owner.clone(),
    })
}

fn fetch_one<T>(
    conn: &Connection,
    table: &'static str,
    columns: &str,
    owner: &Owner,
    id: i64,
    read: fn(&Row<'_>, &Owner) -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let sql = format!("SELECT {columns} FROM {table} WHERE owner=?1 AND id=?2");
    let mut stmt = conn.prepare_cached(&sql)?;
    let mut rows = stmt.query(params![owner.as_str(), id])?;
    match rows.next()? {
        Some(r) => read(r, owner),
        None => Err(StoreError::NotFound { table, id }),
    }
}

fn delete_one(
    conn: &Connection,
    table: &'static str,
    owner: &Owner,
    id: i64,
) -> Result<(), StoreError> {
    let sql = format!("DELETE FROM {table} WHERE owner=?1 AND id=?2");
    let changed = conn.execute(&sql, params![owner.as_str(), id])?;
    if changed == 0 {
        return Err(StoreError::NotFound { table, id });
    }
    Ok(())
}

impl RecordStore for SqliteStore {
    fn insert_transaction(
        &self,
        owner: &Owner,
        new: &NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO transactions(owner, label, type, amount, category, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                owner.as_str(),
                new.label,
                new.kind.as_str(),
                new.amount.to_string(),
                new.category,
                new.date,
                Utc::now()
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch_one(&conn, "transactions", TX_COLUMNS, owner, id, read_transaction)
    }

    fn select_transactions(
        &self,
        owner: &Owner,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut sql = format!("SELECT {TX_COLUMNS} FROM transactions WHERE owner=?");
        let mut params_vec: Vec<String> = vec![owner.as_str().to_string()];

        if let Some(kind) = query.kind {
            sql.push_str(" AND type=?");
            params_vec.push(kind.as_str().into());
        }
        if let Some(from) = query.from {
            sql.push_str(" AND date>=?");
            params_vec.push(from.to_string());
        }
        if let Some(to) = query.to {
            sql.push_str(" AND date<=?");
            params_vec.push(to.to_string());
        }
        match query.order {
            DateOrder::Ascending => sql.push_str(" ORDER BY date ASC, id ASC"),
            DateOrder::Descending => sql.push_str(" ORDER BY date DESC, id DESC"),
        }
        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(read_transaction(r, owner)?);
        }
        Ok(data)
    }

    fn delete_transaction(&self, owner: &Owner, id: i64) -> Result<(), StoreError> {
        delete_one(&self.conn(), "transactions", owner, id)
    }

    fn insert_asset(&self, owner: &Owner, new: &NewAsset) -> Result<Asset, StoreError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO assets(owner, name, value, category, acquired_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                owner.as_str(),
                new.name,
                new.value.to_string(),
                new.category,
                new.acquired_date,
                Utc::now()
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch_one(&conn, "assets", ASSET_COLUMNS, owner, id, read_asset)
    }

    fn select_assets(&self, owner: &Owner) -> Result<Vec<Asset>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets WHERE owner=?1 ORDER BY id"
        ))?;
        let mut rows = stmt.query(params![owner.as_str()])?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(read_asset(r, owner)?);
        }
        // TEXT decimals do not sort numerically in SQL.
        data.sort_by(|a, b| b.value.cmp(&a.value));
        Ok(data)
    }

    fn delete_asset(&self, owner: &Owner, id: i64) -> Result<(), StoreError> {
        delete_one(&self.conn(), "assets", owner, id)
    }

    fn insert_roadmap_item(
        &self,
        owner: &Owner,
        new: &NewRoadmapItem,
    ) -> Result<RoadmapItem, StoreError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO roadmap_items(owner, title, description, type, status, priority, target_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                owner.as_str(),
                new.title,
                new.description,
                new.kind.as_str(),
                RoadmapStatus::default().as_str(),
                new.priority.as_str(),
                new.target_date,
                Utc::now()
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch_one(
            &conn,
            "roadmap_items",
            ROADMAP_COLUMNS,
            owner,
            id,
            read_roadmap_item,
        )
    }

    fn select_roadmap_items(&self, owner: &Owner) -> Result<Vec<RoadmapItem>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {ROADMAP_COLUMNS} FROM roadmap_items WHERE owner=?1
             ORDER BY created_at DESC, id DESC"
        ))?;
        let mut rows = stmt.query(params![owner.as_str()])?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(read_roadmap_item(r, owner)?);
        }
        Ok(data)
    }

    fn update_roadmap_status(
        &self,
        owner: &Owner,
        id: i64,
        status: RoadmapStatus,
    ) -> Result<RoadmapItem, StoreError> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE roadmap_items SET status=?3 WHERE owner=?1 AND id=?2",
            params![owner.as_str(), id, status.as_str()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                table: "roadmap_items",
                id,
            });
        }
        fetch_one(
            &conn,
            "roadmap_items",
            ROADMAP_COLUMNS,
            owner,
            id,
            read_roadmap_item,
        )
    }

    fn delete_roadmap_item(&self, owner: &Owner, id: i64) -> Result<(), StoreError> {
        delete_one(&self.conn(), "roadmap_items", owner, id)
    }

    fn purge_owner(&self, owner: &Owner) -> Result<(), StoreError> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        for table in ["transactions", "assets", "roadmap_items"] {
            tx.execute(
                &format!("DELETE FROM {table} WHERE owner=?1"),
                params![owner.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
