// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print JSON instead of a table")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print one JSON object per line")
            .action(ArgAction::SetTrue),
    )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and inspect transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("desc").long("desc").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .help("income or expense"),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(Arg::new("tags").long("tags"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .value_name("FREQUENCY")
                        .help("Also create a recurring template: weekly|monthly|yearly"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("kind").long("kind"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("from").long("from").help("YYYY-MM-DD inclusive"))
                .arg(Arg::new("to").long("to").help("YYYY-MM-DD inclusive"))
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Case-insensitive substring match on description"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(clap::value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true)),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Category budgets with month-to-date progress")
        .subcommand(
            Command::new("add")
                .about("Create a budget (one per category)")
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("limit").long("limit").required(true)),
        )
        .subcommand(
            Command::new("edit")
                .about("Change a budget's category or limit")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("limit").long("limit")),
        )
        .subcommand(json_flags(Command::new("list").about("Budgets with spend and status")))
        .subcommand(
            Command::new("rm")
                .about("Delete a budget")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(Command::new("alerts").about("Count over-budget and near-limit categories"))
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Savings goals and contributions")
        .subcommand(
            Command::new("add")
                .about("Create a savings goal")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("category").long("category").default_value(""))
                .arg(Arg::new("target").long("target").required(true))
                .arg(Arg::new("current").long("current").default_value("0"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("Target date, YYYY-MM-DD"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit a goal; the creation date is preserved")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("target").long("target"))
                .arg(Arg::new("current").long("current"))
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(json_flags(Command::new("list").about("Goals with pacing and required monthly amount")))
        .subcommand(
            Command::new("contribute")
                .about("Add to a goal's saved amount")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a goal")
                .arg(Arg::new("id").required(true)),
        )
}

fn recurring_cmd() -> Command {
    Command::new("recurring")
        .about("Recurring transaction templates")
        .subcommand(json_flags(Command::new("list").about("Templates with their next occurrence")))
        .subcommand(
            Command::new("edit")
                .about("Edit a template; changes apply to future occurrences only")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("desc").long("desc"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("kind").long("kind"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("frequency")
                        .long("frequency")
                        .help("weekly|monthly|yearly; recomputes the next occurrence"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a template")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("cascade")
                        .long("cascade")
                        .help("Also delete every transaction this template generated")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Derived statistics")
        .subcommand(json_flags(
            Command::new("cashflow")
                .about("Income, expenses and net savings per month")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("12"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("top-categories").about("This month's top expense categories"),
        ))
        .subcommand(Command::new("metrics").about("Daily average, month comparison, best month, trend"))
}

fn import_cmd() -> Command {
    Command::new("import").about("Import from CSV").subcommand(
        Command::new("transactions")
            .about("Import transactions; invalid rows are skipped, duplicates flagged")
            .arg(Arg::new("path").long("path").required(true)),
    )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export to CSV or JSON")
        .subcommand(
            Command::new("transactions")
                .arg(Arg::new("out").long("out").required(true))
                .arg(Arg::new("format").long("format").default_value("csv")),
        )
        .subcommand(
            Command::new("budgets")
                .about("Budgets with month-to-date spend and remainder")
                .arg(Arg::new("out").long("out").required(true)),
        )
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Display settings")
        .subcommand(Command::new("show"))
        .subcommand(
            Command::new("set")
                .arg(Arg::new("currency").long("currency"))
                .arg(
                    Arg::new("date-format")
                        .long("date-format")
                        .help("MM/DD/YYYY or DD/MM/YYYY"),
                )
                .arg(Arg::new("week-start").long("week-start").help("sunday|monday")),
        )
}

pub fn build_cli() -> Command {
    Command::new("billfold")
        .version(crate_version!())
        .about("Billfold: transactions, budgets, savings goals, and recurring templates")
        .subcommand(Command::new("init").about("Initialize the data store"))
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(goal_cmd())
        .subcommand(recurring_cmd())
        .subcommand(report_cmd())
        .subcommand(import_cmd())
        .subcommand(export_cmd())
        .subcommand(settings_cmd())
        .subcommand(
            Command::new("reset")
                .about("Delete all stored data")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .help("Confirm the reset")
                        .action(ArgAction::SetTrue),
                ),
        )
}
