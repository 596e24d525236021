// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{DateFormat, WeekStart, currency_symbol};
use crate::store::Store;
use crate::utils::pretty_table;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) | None => show(store),
        Some(("set", sub)) => set(store, sub),
        _ => Ok(()),
    }
}

fn show(store: &Store) -> Result<()> {
    let s = store.settings();
    let rows = vec![
        vec![
            "Currency".to_string(),
            format!("{} ({})", s.currency, currency_symbol(&s.currency)),
        ],
        vec!["Date format".to_string(), s.date_format.to_string()],
        vec!["Week starts on".to_string(), s.week_start.to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

fn set(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let mut settings = store.settings();
    if let Some(currency) = sub.get_one::<String>("currency") {
        settings.currency = currency.trim().to_uppercase();
    }
    if let Some(fmt) = sub.get_one::<String>("date-format") {
        settings.date_format = fmt.parse::<DateFormat>()?;
    }
    if let Some(ws) = sub.get_one::<String>("week-start") {
        settings.week_start = ws.parse::<WeekStart>()?;
    }
    store.save_settings(&settings)?;
    println!("Settings saved");
    Ok(())
}

/// Deletes every stored collection. Refuses to run without --yes.
pub fn reset(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        println!("This deletes all transactions, budgets, goals, templates and settings.");
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }
    store.clear()?;
    println!("All data cleared");
    Ok(())
}
