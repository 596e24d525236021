// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Frequency, Transaction, TxKind, ValidationError};
use crate::recurring::template_from_transaction;
use crate::store::Store;
use crate::utils::{
    find_id, fmt_display_date, fmt_money, maybe_print_json, parse_date, parse_decimal,
    pretty_table, today,
};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub),
        Some(("list", sub)) => list(store, sub),
        Some(("rm", sub)) => rm(store, sub),
        _ => Ok(()),
    }
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let desc = sub.get_one::<String>("desc").unwrap().trim().to_string();
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind: TxKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let tags = sub.get_one::<String>("tags").map(|s| s.trim().to_string());
    let frequency = sub
        .get_one::<String>("recurring")
        .map(|s| s.parse::<Frequency>())
        .transpose()?;

    if desc.is_empty() {
        return Err(ValidationError::EmptyDescription.into());
    }
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory.into());
    }
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount.into());
    }

    let mut tx = Transaction {
        id: Uuid::new_v4(),
        desc,
        amount,
        kind,
        category,
        date,
        tags,
        is_recurring: frequency.is_some(),
        frequency,
        template_id: None,
    };

    if let Some(freq) = frequency {
        let template = template_from_transaction(&tx, freq);
        tx.template_id = Some(template.id);
        let mut templates = store.templates();
        templates.push(template);
        store.save_templates(&templates)?;
    }

    let settings = store.settings();
    let summary = format!(
        "Recorded {} {} '{}' in {} on {}",
        tx.kind,
        fmt_money(&tx.amount, &settings),
        tx.desc,
        tx.category,
        fmt_display_date(tx.date, &settings)
    );

    let mut transactions = store.transactions();
    transactions.push(tx);
    store.save_transactions(&transactions)?;
    println!("{}", summary);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub desc: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub recurring: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let kind = sub
        .get_one::<String>("kind")
        .map(|s| s.parse::<TxKind>())
        .transpose()?;
    let category = sub.get_one::<String>("category");
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    let search = sub.get_one::<String>("search").map(|s| s.to_lowercase());
    let limit = sub.get_one::<usize>("limit").copied();

    let settings = store.settings();
    let mut transactions = store.transactions();
    transactions.retain(|t| {
        kind.is_none_or(|k| t.kind == k)
            && category.is_none_or(|c| &t.category == c)
            && from.is_none_or(|d| t.date >= d)
            && to.is_none_or(|d| t.date <= d)
            && search
                .as_deref()
                .is_none_or(|q| t.desc.to_lowercase().contains(q))
    });
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = limit {
        transactions.truncate(limit);
    }

    let data: Vec<TransactionRow> = transactions
        .iter()
        .map(|t| TransactionRow {
            id: t.id.to_string()[..8].to_string(),
            date: fmt_display_date(t.date, &settings),
            desc: t.desc.clone(),
            kind: t.kind.to_string(),
            category: t.category.clone(),
            amount: fmt_money(&t.amount, &settings),
            recurring: match t.frequency {
                Some(f) if t.is_recurring => f.to_string(),
                _ => String::new(),
            },
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.desc.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.recurring.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Kind", "Category", "Amount", "Recurring"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let wanted = sub.get_one::<String>("id").unwrap();
    let mut transactions = store.transactions();
    let id = find_id(transactions.iter().map(|t| t.id), wanted)?;
    transactions.retain(|t| t.id != id);
    store.save_transactions(&transactions)?;
    println!("Deleted transaction {}", id);
    Ok(())
}
