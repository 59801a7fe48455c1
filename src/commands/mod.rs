// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod owner;
pub mod transactions;
pub mod assets;
pub mod roadmap;
pub mod reports;
pub mod exporter;
pub mod seed;

use anyhow::Result;
use rusqlite::Connection;

/// Runs the commands that read no owner-scoped data. Returns `false` when
/// `matches` names a command that needs an owner.
pub fn run_without_owner(conn: &Connection, matches: &clap::ArgMatches) -> Result<bool> {
    match matches.subcommand() {
        Some(("owner", sub)) => owner::handle(conn, sub)?,
        Some(("roadmap", sub)) => match sub.subcommand() {
            Some(("suggestions", sub)) => roadmap::suggestions(sub)?,
            _ => return Ok(false),
        },
        _ => return Ok(false),
    }
    Ok(true)
}
