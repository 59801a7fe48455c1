// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use std::path::PathBuf;

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print as pretty JSON")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print as JSON lines")
            .action(ArgAction::SetTrue),
    )
}

fn as_of(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("as_of")
            .long("as-of")
            .value_name("YYYY-MM-DD")
            .help("Reference date for month windows (default: today, UTC)"),
    )
}

fn report(name: &'static str, about: &'static str) -> Command {
    as_of(output_flags(Command::new(name).about(about)))
}

fn catalog_arg() -> Arg {
    Arg::new("catalog")
        .long("catalog")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("JSON suggestion catalog (default: built-in)")
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true)
}

pub fn build_cli() -> Command {
    Command::new("bizdash")
        .version(crate_version!())
        .about("Business metrics dashboard: transactions, assets, KPIs and roadmap")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("BIZDASH_DB")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("SQLite file (default: platform data dir)"),
        )
        .arg(
            Arg::new("owner")
                .long("owner")
                .global(true)
                .env("BIZDASH_OWNER")
                .help("Owner id all records are scoped to"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("owner")
                .about("Default owner")
                .subcommand(
                    Command::new("set-default").arg(Arg::new("id").required(true)),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("label").long("label").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["revenue", "expense", "budget"])
                                .default_value("revenue"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD (default: today)"),
                        ),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .default_value("10"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["revenue", "expense", "budget"]),
                        )
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD, inclusive"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD, inclusive")),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("asset")
                .about("Assets")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("value").long("value").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("acquired")
                                .long("acquired")
                                .help("YYYY-MM-DD (default: today)"),
                        ),
                )
                .subcommand(output_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("roadmap")
                .about("Business roadmap")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("priority")
                                .long("priority")
                                .value_parser(["low", "medium", "high"])
                                .default_value("medium"),
                        )
                        .arg(Arg::new("target").long("target").help("YYYY-MM-DD")),
                )
                .subcommand(output_flags(
                    Command::new("suggestions")
                        .about("Show the suggestion catalog")
                        .arg(catalog_arg()),
                ))
                .subcommand(
                    Command::new("adopt")
                        .about("Add a catalog suggestion to the roadmap")
                        .arg(
                            Arg::new("index")
                                .long("index")
                                .required(true)
                                .value_parser(value_parser!(usize))
                                .help("1-based position in `roadmap suggestions`"),
                        )
                        .arg(catalog_arg()),
                )
                .subcommand(output_flags(Command::new("list")))
                .subcommand(
                    Command::new("status").arg(id_arg()).arg(
                        Arg::new("set")
                            .long("set")
                            .required(true)
                            .value_parser(["planned", "in_progress", "completed"]),
                    ),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Derived metrics")
                .subcommand(report("summary", "Headline KPIs"))
                .subcommand(
                    report("trend", "Monthly revenue, expense and profit").arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(value_parser!(usize))
                            .default_value("12"),
                    ),
                )
                .subcommand(report("assets", "Asset distribution"))
                .subcommand(report("profit", "Profit analysis"))
                .subcommand(report("health", "Business evaluation")),
        )
        .subcommand(report("dashboard", "Every panel from one refresh"))
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("seed")
                .about("Replace the owner's data with a demo company")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize))
                        .default_value("24"),
                ),
        )
}
