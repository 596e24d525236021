// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::progress::spent_this_month;
use crate::store::Store;
use crate::utils::today;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let out = sub.get_one::<String>("out").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            match format.as_str() {
                "csv" => export_transactions_csv(store, out),
                "json" => export_transactions_json(store, out),
                other => anyhow::bail!("Unknown format '{}', expected csv or json", other),
            }
        }
        Some(("budgets", sub)) => {
            let out = sub.get_one::<String>("out").unwrap();
            export_budgets_csv(store, out)
        }
        _ => Ok(()),
    }
}

fn export_transactions_csv(store: &Store, out: &str) -> Result<()> {
    let mut transactions = store.transactions();
    transactions.sort_by_key(|t| t.date);

    let mut writer = csv::Writer::from_path(out)
        .with_context(|| format!("Failed to create {}", out))?;
    writer.write_record(["Date", "Type", "Category", "Amount", "Description", "Tags"])?;
    for t in &transactions {
        writer.write_record([
            t.date.format("%Y-%m-%d").to_string(),
            t.kind.to_string(),
            t.category.clone(),
            format!("{:.2}", t.amount),
            t.desc.clone(),
            t.tags.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    println!("Exported {} transaction(s) to {}", transactions.len(), out);
    Ok(())
}

fn export_transactions_json(store: &Store, out: &str) -> Result<()> {
    let mut transactions = store.transactions();
    transactions.sort_by_key(|t| t.date);
    let body = serde_json::to_vec_pretty(&transactions)?;
    std::fs::write(out, body).with_context(|| format!("Failed to write {}", out))?;
    println!("Exported {} transaction(s) to {}", transactions.len(), out);
    Ok(())
}

fn export_budgets_csv(store: &Store, out: &str) -> Result<()> {
    let transactions = store.transactions();
    let budgets = store.budgets();
    let today = today();

    let mut writer = csv::Writer::from_path(out)
        .with_context(|| format!("Failed to create {}", out))?;
    writer.write_record(["Category", "Budget Limit", "Spent", "Remaining"])?;
    for b in &budgets {
        let spent = spent_this_month(&transactions, &b.category, today);
        writer.write_record([
            b.category.clone(),
            format!("{:.2}", b.limit),
            format!("{:.2}", spent),
            format!("{:.2}", b.limit - spent),
        ])?;
    }
    writer.flush()?;
    println!("Exported {} budget(s) to {}", budgets.len(), out);
    Ok(())
}
