// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Frequency, TxKind, ValidationError};
use crate::recurring::{catch_up, next_occurrence};
use crate::store::Store;
use crate::utils::{
    find_id, fmt_display_date, fmt_money, maybe_print_json, parse_decimal, pretty_table, today,
};

/// Runs the catch-up pass before any command executes. Transactions are
/// saved before templates; a crash between the two writes duplicates an
/// occurrence on the next run rather than dropping one. The notice goes to
/// stderr so stdout stays parseable for --json/--jsonl consumers.
pub fn catch_up_on_start(store: &Store) -> Result<()> {
    let mut templates = store.templates();
    if templates.is_empty() {
        return Ok(());
    }
    let mut transactions = store.transactions();
    let generated = catch_up(&mut templates, &mut transactions, today());
    if generated > 0 {
        store.save_transactions(&transactions)?;
        store.save_templates(&templates)?;
        tracing::info!(generated, "materialized recurring transactions");
        eprintln!("Generated {} recurring transaction(s)", generated);
    }
    Ok(())
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub),
        Some(("edit", sub)) => edit(store, sub),
        Some(("rm", sub)) => rm(store, sub),
        _ => Ok(()),
    }
}

#[derive(Serialize)]
pub struct TemplateRow {
    pub id: String,
    pub desc: String,
    pub amount: String,
    pub kind: String,
    pub category: String,
    pub frequency: String,
    pub next: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let settings = store.settings();

    let data: Vec<TemplateRow> = store
        .templates()
        .iter()
        .map(|t| TemplateRow {
            id: t.id.to_string()[..8].to_string(),
            desc: t.desc.clone(),
            amount: fmt_money(&t.amount, &settings),
            kind: t.kind.to_string(),
            category: t.category.clone(),
            frequency: t.frequency.to_string(),
            next: fmt_display_date(t.next_occurrence, &settings),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.desc.clone(),
                    r.amount.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.frequency.clone(),
                    r.next.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Description", "Amount", "Kind", "Category", "Frequency", "Next"],
                rows,
            )
        );
    }
    Ok(())
}

/// Edits never rewrite already-materialized transactions. A frequency change
/// recomputes the next occurrence from the last one.
fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let wanted = sub.get_one::<String>("id").unwrap();
    let mut templates = store.templates();
    let id = find_id(templates.iter().map(|t| t.id), wanted)?;

    let desc = sub.get_one::<String>("desc").map(|s| s.trim().to_string());
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let kind = sub
        .get_one::<String>("kind")
        .map(|s| s.parse::<TxKind>())
        .transpose()?;
    let category = sub.get_one::<String>("category").map(|s| s.trim().to_string());
    let frequency = sub
        .get_one::<String>("frequency")
        .map(|s| s.parse::<Frequency>())
        .transpose()?;

    if let Some(desc) = &desc {
        if desc.is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }
    }
    if let Some(amount) = amount {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount.into());
        }
    }
    if let Some(category) = &category {
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory.into());
        }
    }

    let template = templates
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow::anyhow!("No template matches id '{}'", wanted))?;
    if let Some(desc) = desc {
        template.desc = desc;
    }
    if let Some(amount) = amount {
        template.amount = amount;
    }
    if let Some(kind) = kind {
        template.kind = kind;
    }
    if let Some(category) = category {
        template.category = category;
    }
    if let Some(frequency) = frequency {
        template.frequency = frequency;
        template.next_occurrence = next_occurrence(template.last_occurrence, frequency);
    }
    store.save_templates(&templates)?;
    println!("Updated template {}", id);
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let wanted = sub.get_one::<String>("id").unwrap();
    let cascade = sub.get_flag("cascade");
    let mut templates = store.templates();
    let id = find_id(templates.iter().map(|t| t.id), wanted)?;
    templates.retain(|t| t.id != id);
    store.save_templates(&templates)?;

    if cascade {
        let mut transactions = store.transactions();
        let before = transactions.len();
        transactions.retain(|t| t.template_id != Some(id));
        let removed = before - transactions.len();
        store.save_transactions(&transactions)?;
        println!("Deleted template {} and {} generated transaction(s)", id, removed);
    } else {
        println!("Deleted template {}", id);
    }
    Ok(())
}
