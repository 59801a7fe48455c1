// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Demo company data. Output depends only on the owner and the reference
//! date, so two seeds on the same day produce identical figures.

use crate::models::{NewAsset, NewTransaction, Owner, Priority, RoadmapStatus, TxKind};
use crate::roadmap::{NewRoadmapItem, set_status};
use crate::store::RecordStore;
use crate::utils::{fmt_money, today};
use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

const ASSETS: [(&str, i64, &str); 5] = [
    ("Equipment & Machinery", 185_000, "Equipment"),
    ("Real Estate & Property", 425_000, "Property"),
    ("Cash & Investments", 127_500, "Cash"),
    ("Inventory", 65_000, "Inventory"),
    ("Vehicles", 45_000, "Vehicle"),
];

/// Calendar anchor for a milestone, relative to the reference date.
enum Anchor {
    YearsAgo(u32, i64),
    MonthsAhead(u32),
}

struct Milestone {
    title: &'static str,
    description: &'static str,
    status: RoadmapStatus,
    priority: Priority,
    anchor: Anchor,
}

const MILESTONES: [Milestone; 8] = [
    Milestone {
        title: "Company Foundation & Setup",
        description: "Incorporated the company and set up initial operations",
        status: RoadmapStatus::Completed,
        priority: Priority::High,
        anchor: Anchor::YearsAgo(2, 0),
    },
    Milestone {
        title: "First Product Launch",
        description: "Launched the initial product offering to market",
        status: RoadmapStatus::Completed,
        priority: Priority::High,
        anchor: Anchor::YearsAgo(2, 90),
    },
    Milestone {
        title: "Revenue Hit $40K/Month",
        description: "Reached consistent monthly revenue of $40,000",
        status: RoadmapStatus::Completed,
        priority: Priority::Medium,
        anchor: Anchor::YearsAgo(1, 180),
    },
    Milestone {
        title: "Team Expansion to 8 Members",
        description: "Hired and onboarded five new team members",
        status: RoadmapStatus::Completed,
        priority: Priority::Medium,
        anchor: Anchor::YearsAgo(1, 0),
    },
    Milestone {
        title: "Market Expansion to 3 Regions",
        description: "Expand operations into two new regional markets",
        status: RoadmapStatus::InProgress,
        priority: Priority::High,
        anchor: Anchor::MonthsAhead(4),
    },
    Milestone {
        title: "Enterprise Product Development",
        description: "Build an enterprise tier of the product",
        status: RoadmapStatus::InProgress,
        priority: Priority::Medium,
        anchor: Anchor::MonthsAhead(6),
    },
    Milestone {
        title: "Series A Funding Round",
        description: "Raise a Series A round to accelerate growth",
        status: RoadmapStatus::Planned,
        priority: Priority::High,
        anchor: Anchor::MonthsAhead(10),
    },
    Milestone {
        title: "Revenue Target $100K/Month",
        description: "Reach a monthly revenue milestone of $100,000",
        status: RoadmapStatus::Planned,
        priority: Priority::Low,
        anchor: Anchor::MonthsAhead(14),
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub assets: usize,
    pub transactions: usize,
    pub roadmap_items: usize,
    pub revenue: Decimal,
}

pub fn handle(store: &dyn RecordStore, owner: &Owner, m: &clap::ArgMatches) -> Result<()> {
    let months = *m.get_one::<usize>("months").unwrap_or(&24);
    let report = seed_demo(store, owner, today(), months)?;
    println!(
        "Seeded {} assets, {} transactions ({} revenue) and {} roadmap items for {}",
        report.assets,
        report.transactions,
        fmt_money(&report.revenue),
        report.roadmap_items,
        owner
    );
    Ok(())
}

/// Replaces everything `owner` has with `months` months of demo history
/// ending in the month of `today`.
pub fn seed_demo(
    store: &dyn RecordStore,
    owner: &Owner,
    today: NaiveDate,
    months: usize,
) -> Result<SeedReport> {
    store
        .purge_owner(owner)
        .with_context(|| format!("Clear existing data for {}", owner))?;

    for (name, value, category) in ASSETS {
        store.insert_asset(
            owner,
            &NewAsset {
                name: name.to_string(),
                value: Decimal::from(value),
                category: category.to_string(),
                acquired_date: shift_years(today, 2),
            },
        )?;
    }

    let mut transactions = 0;
    let mut revenue = Decimal::ZERO;
    for back in (0..months).rev() {
        let mb = back as i64;
        let Some(date) = today.checked_sub_months(Months::new(back as u32)) else {
            continue;
        };
        // Cheap deterministic wobble so the trend is not a straight line.
        let rev = Decimal::from(35_000 + mb * 400 + (mb * 37 % 80) * 100);
        let exp = Decimal::from(18_000 + mb * 200 + (mb * 53 % 40) * 100);
        store.insert_transaction(owner, &tx("Monthly service revenue", TxKind::Revenue, rev, "Sales", date))?;
        store.insert_transaction(owner, &tx("Operating expenses", TxKind::Expense, exp, "Operations", date))?;
        transactions += 2;
        revenue += rev;
        if back % 3 == 0 {
            store.insert_transaction(
                owner,
                &tx(
                    "Quarterly budget allocation",
                    TxKind::Budget,
                    Decimal::from(25_000),
                    "Planning",
                    date,
                ),
            )?;
            transactions += 1;
        }
    }

    for m in &MILESTONES {
        let target = match m.anchor {
            Anchor::YearsAgo(years, days) => shift_years(today, years) + Duration::days(days),
            Anchor::MonthsAhead(n) => today.checked_add_months(Months::new(n)).unwrap_or(today),
        };
        let new = NewRoadmapItem::user_defined(m.title, m.description, m.priority, Some(target))?;
        let item = store.insert_roadmap_item(owner, &new)?;
        if m.status != item.status {
            set_status(store, owner, item.id, m.status)?;
        }
    }

    tracing::info!(owner = %owner, months, transactions, "demo data seeded");
    Ok(SeedReport {
        assets: ASSETS.len(),
        transactions,
        roadmap_items: MILESTONES.len(),
        revenue,
    })
}

fn tx(label: &str, kind: TxKind, amount: Decimal, category: &str, date: NaiveDate) -> NewTransaction {
    NewTransaction {
        label: label.to_string(),
        kind,
        amount,
        category: category.to_string(),
        date,
    }
}

fn shift_years(date: NaiveDate, years: u32) -> NaiveDate {
    date.with_year(date.year() - years as i32)
        .or_else(|| date.checked_sub_months(Months::new(12 * years)))
        .unwrap_or(date)
}
