// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .default_value("all")
        .help("Month to show (YYYY-MM) or 'all'")
}

fn today_arg() -> Arg {
    Arg::new("today")
        .long("today")
        .help("Reference date for maturity alerts (YYYY-MM-DD), defaults to the clock")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn category_type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["expense", "income", "investment"])
}

fn config_cmd() -> Command {
    Command::new("config")
        .about("Show or change settings")
        .subcommand(Command::new("get").arg(Arg::new("key").long("key").required(true)))
        .subcommand(
            Command::new("set")
                .arg(Arg::new("key").long("key").required(true))
                .arg(Arg::new("value").long("value").required(true)),
        )
        .subcommand(Command::new("list"))
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(category_type_arg().default_value("expense")),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(category_type_arg()),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record, search and reconcile transactions")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                .arg(Arg::new("description").long("description").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .default_value("")
                        .allow_hyphen_values(true),
                )
                .arg(month_arg())
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_flags(Command::new("months")))
        .subcommand(
            Command::new("set-category")
                .arg(id_arg())
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("clear")
                        .long("clear")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("category"),
                ),
        )
        .subcommand(Command::new("recategorize").about("Apply keyword rules to uncategorized rows"))
        .subcommand(Command::new("rm").arg(id_arg()))
        .subcommand(
            Command::new("clear")
                .about("Delete ALL transactions (irreversible)")
                .arg(Arg::new("yes").long("yes").action(ArgAction::SetTrue))
                .arg(Arg::new("really").long("really").action(ArgAction::SetTrue)),
        )
}

fn invest_cmd() -> Command {
    Command::new("invest")
        .about("Investment contributions, withdrawals and maturities")
        .subcommand(
            Command::new("add")
                .arg(
                    Arg::new("action")
                        .long("action")
                        .required(true)
                        .value_parser(["contribution", "withdrawal"]),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                .arg(Arg::new("description").long("description").required(true))
                .arg(Arg::new("maturity").long("maturity").help("Maturity date YYYY-MM-DD")),
        )
        .subcommand(json_flags(
            Command::new("list").arg(month_arg()).arg(today_arg()),
        ))
        .subcommand(json_flags(Command::new("alerts").arg(today_arg())))
}

fn rules_cmd() -> Command {
    Command::new("rules")
        .about("Keyword rules used for automatic categorization")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("pattern").long("pattern").required(true))
                .arg(Arg::new("category").long("category").required(true)),
        )
        .subcommand(Command::new("list"))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn export_cmd() -> Command {
    Command::new("export").about("Export data").subcommand(
        Command::new("transactions")
            .arg(
                Arg::new("format")
                    .long("format")
                    .default_value("csv")
                    .value_parser(["csv", "json"]),
            )
            .arg(Arg::new("out").long("out").required(true))
            .arg(
                Arg::new("search")
                    .long("search")
                    .default_value("")
                    .allow_hyphen_values(true),
            )
            .arg(month_arg()),
    )
}

pub fn build_cli() -> Command {
    Command::new("caixa")
        .version(crate_version!())
        .about("Household income, expense and investment tracker")
        .arg(
            Arg::new("db")
                .long("db")
                .env("CAIXA_DB")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to the SQLite database"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(config_cmd())
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(invest_cmd())
        .subcommand(rules_cmd())
        .subcommand(json_flags(
            Command::new("dashboard").about("Totals, spending by category and investment evolution"),
        ))
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Report data problems"))
}
