// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use bizdash::store::SqliteStore;
use bizdash::{cli, commands, db, logging, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));

    let db_arg = matches.get_one::<PathBuf>("db");
    let conn = db::open_or_init(db_arg.map(PathBuf::as_path))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let path = match db_arg {
                Some(p) => p.clone(),
                None => db::db_path()?,
            };
            println!("Database initialized at {}", path.display());
            return Ok(());
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
        Some(_) => {}
    }
    if commands::run_without_owner(&conn, &matches)? {
        return Ok(());
    }

    let owner = utils::resolve_owner(&conn, matches.get_one::<String>("owner").map(String::as_str))?;
    let store = SqliteStore::new(conn);

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&store, &owner, sub)?,
        Some(("asset", sub)) => commands::assets::handle(&store, &owner, sub)?,
        Some(("roadmap", sub)) => commands::roadmap::handle(&store, &owner, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, &owner, sub)?,
        Some(("dashboard", sub)) => commands::reports::dashboard(&store, &owner, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, &owner, sub)?,
        Some(("seed", sub)) => commands::seed::handle(&store, &owner, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
