// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::Owner;

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_id(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid id '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn fmt_percent(d: &Decimal) -> String {
    let sign = if *d >= Decimal::ZERO { "+" } else { "" };
    format!("{}{:.2}%", sign, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn get_default_owner(conn: &Connection) -> Result<Option<Owner>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='default_owner'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => Ok(Some(Owner::new(&s)?)),
        None => Ok(None),
    }
}

pub fn set_default_owner(conn: &Connection, owner: &Owner) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('default_owner', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![owner.as_str()],
    )?;
    Ok(())
}

/// `--owner` (or `BIZDASH_OWNER`) first, then the stored default.
pub fn resolve_owner(conn: &Connection, flag: Option<&str>) -> Result<Owner> {
    if let Some(raw) = flag {
        return Ok(Owner::new(raw)?);
    }
    get_default_owner(conn)?.context(
        "No owner given: pass --owner, set BIZDASH_OWNER, or run `bizdash owner set-default <id>`",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_stored_default() {
        let conn = crate::db::open_in_memory().unwrap();
        assert!(resolve_owner(&conn, None).is_err());

        set_default_owner(&conn, &Owner::new("acme").unwrap()).unwrap();
        assert_eq!(resolve_owner(&conn, None).unwrap().as_str(), "acme");
        assert_eq!(resolve_owner(&conn, Some("globex")).unwrap().as_str(), "globex");
        assert!(resolve_owner(&conn, Some("  ")).is_err());

        set_default_owner(&conn, &Owner::new("initech").unwrap()).unwrap();
        assert_eq!(get_default_owner(&conn).unwrap().unwrap().as_str(), "initech");
    }

    #[test]
    fn money_and_percent_formatting() {
        assert_eq!(fmt_money(&Decimal::new(12345, 3)), "12.35");
        assert_eq!(fmt_percent(&Decimal::new(25, 0)), "+25.00%");
        assert_eq!(fmt_percent(&Decimal::new(-125, 1)), "-12.50%");
    }
}
