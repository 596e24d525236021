// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Transaction, TxKind};
use crate::store::Store;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            import_transactions(store, path)
        }
        _ => Ok(()),
    }
}

/// Accepted import date shapes, tried in order.
fn parse_import_date(s: &str) -> Option<NaiveDate> {
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Lowercased header -> column index. Both "description" and "desc" map to
/// the description column.
fn column_map(headers: &csv::StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (i, h) in headers.iter().enumerate() {
        let key = match h.trim().to_lowercase().as_str() {
            "desc" => "description".to_string(),
            other => other.to_string(),
        };
        map.entry(key).or_insert(i);
    }
    map
}

fn field<'r>(record: &'r csv::StringRecord, map: &HashMap<String, usize>, name: &str) -> Option<&'r str> {
    map.get(name).and_then(|&i| record.get(i)).map(str::trim)
}

fn import_transactions(store: &Store, path: &str) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path))?;
    let map = column_map(reader.headers()?);

    // "type" and "description" are optional; type defaults to Expense.
    for required in ["date", "amount", "category"] {
        if !map.contains_key(required) {
            anyhow::bail!("Missing column '{}' in {}", required, path);
        }
    }

    // Duplicates are checked against what was on disk before this import,
    // not against earlier rows of the same file.
    let mut transactions = store.transactions();
    let existing: HashSet<(NaiveDate, Decimal, String)> = transactions
        .iter()
        .map(|t| (t.date, t.amount, t.desc.to_lowercase()))
        .collect();

    let mut imported = 0usize;
    let mut duplicates = 0usize;
    let mut skipped: Vec<(usize, String)> = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let line = i + 2; // 1-based, after the header row
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                skipped.push((line, e.to_string()));
                continue;
            }
        };

        let Some(date) = field(&record, &map, "date").and_then(parse_import_date) else {
            skipped.push((line, "invalid date".to_string()));
            continue;
        };
        let Some(amount) = field(&record, &map, "amount").and_then(|s| s.parse::<Decimal>().ok())
        else {
            skipped.push((line, "invalid amount".to_string()));
            continue;
        };
        if amount == Decimal::ZERO {
            skipped.push((line, "amount must be non-zero".to_string()));
            continue;
        }
        let kind = field(&record, &map, "type")
            .and_then(|s| s.parse::<TxKind>().ok())
            .unwrap_or(TxKind::Expense);
        let desc = field(&record, &map, "description").unwrap_or("").to_string();
        let category = field(&record, &map, "category").unwrap_or("").to_string();
        if category.is_empty() {
            skipped.push((line, "empty category".to_string()));
            continue;
        }
        let tags = field(&record, &map, "tags")
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let amount = amount.abs();
        if existing.contains(&(date, amount, desc.to_lowercase())) {
            duplicates += 1;
        }
        transactions.push(Transaction {
            id: Uuid::new_v4(),
            desc,
            amount,
            kind,
            category,
            date,
            tags,
            is_recurring: false,
            frequency: None,
            template_id: None,
        });
        imported += 1;
    }

    store.save_transactions(&transactions)?;

    println!(
        "Imported {} transaction(s), {} possible duplicate(s), {} row(s) skipped",
        imported,
        duplicates,
        skipped.len()
    );
    for (line, reason) in &skipped {
        println!("  line {}: {}", line, reason);
    }
    Ok(())
}
