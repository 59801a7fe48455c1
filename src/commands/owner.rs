// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Owner;
use crate::utils::{get_default_owner, set_default_owner};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-default", sub)) => {
            let raw = sub.get_one::<String>("id").map(String::as_str).unwrap_or_default();
            let owner = Owner::new(raw)?;
            set_default_owner(conn, &owner)?;
            tracing::info!(owner = %owner, "default owner set");
            println!("Default owner set to {}", owner);
        }
        Some(("show", _)) => match get_default_owner(conn)? {
            Some(owner) => println!("{}", owner),
            None => println!("No default owner configured"),
        },
        _ => {}
    }
    Ok(())
}
