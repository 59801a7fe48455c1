// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("owner id must not be empty")]
    EmptyOwner,
    #[error("invalid {field} '{value}', expected one of: {expected}")]
    UnknownValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Tenant key. Every record and every store call is scoped by one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owner(String);

impl Owner {
    pub fn new(id: &str) -> Result<Self, ModelError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ModelError::EmptyOwner);
        }
        Ok(Owner(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Revenue,
    Expense,
    Budget,
}

impl TxKind {
    pub const ALL: [TxKind; 3] = [TxKind::Revenue, TxKind::Expense, TxKind::Budget];

    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Revenue => "revenue",
            TxKind::Expense => "expense",
            TxKind::Budget => "budget",
        }
    }
}

impl FromStr for TxKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "revenue" => Ok(TxKind::Revenue),
            "expense" => Ok(TxKind::Expense),
            "budget" => Ok(TxKind::Budget),
            other => Err(ModelError::UnknownValue {
                field: "transaction type",
                value: other.to_string(),
                expected: "revenue, expense, budget",
            }),
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub owner: Owner,
}

/// Insert payload; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub label: String,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub value: Decimal,
    pub category: String,
    pub acquired_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub name: String,
    pub value: Decimal,
    pub category: String,
    pub acquired_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapKind {
    UserDefined,
    Suggested,
}

impl RoadmapKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RoadmapKind::UserDefined => "user_defined",
            RoadmapKind::Suggested => "suggested",
        }
    }
}

impl FromStr for RoadmapKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user_defined" => Ok(RoadmapKind::UserDefined),
            "suggested" => Ok(RoadmapKind::Suggested),
            other => Err(ModelError::UnknownValue {
                field: "roadmap type",
                value: other.to_string(),
                expected: "user_defined, suggested",
            }),
        }
    }
}

impl fmt::Display for RoadmapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
}

impl RoadmapStatus {
    pub const ALL: [RoadmapStatus; 3] = [
        RoadmapStatus::Planned,
        RoadmapStatus::InProgress,
        RoadmapStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoadmapStatus::Planned => "planned",
            RoadmapStatus::InProgress => "in_progress",
            RoadmapStatus::Completed => "completed",
        }
    }
}

impl FromStr for RoadmapStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "planned" => Ok(RoadmapStatus::Planned),
            "in_progress" => Ok(RoadmapStatus::InProgress),
            "completed" => Ok(RoadmapStatus::Completed),
            other => Err(ModelError::UnknownValue {
                field: "status",
                value: other.to_string(),
                expected: "planned, in_progress, completed",
            }),
        }
    }
}

impl fmt::Display for RoadmapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ModelError::UnknownValue {
                field: "priority",
                value: other.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: RoadmapKind,
    pub status: RoadmapStatus,
    pub priority: Priority,
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub owner: Owner,
}
