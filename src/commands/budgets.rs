// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Budget, ValidationError};
use crate::progress::{budget_percentage, budget_status, check_budget_category, spent_this_month, BudgetStatus};
use crate::store::Store;
use crate::utils::{find_id, fmt_money, maybe_print_json, parse_decimal, pretty_table, today};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub),
        Some(("edit", sub)) => edit(store, sub),
        Some(("list", sub)) => list(store, sub),
        Some(("rm", sub)) => rm(store, sub),
        Some(("alerts", _)) => alerts(store),
        _ => Ok(()),
    }
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    if limit <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount.into());
    }

    let mut budgets = store.budgets();
    check_budget_category(&budgets, &store.transactions(), &category, None)?;

    let budget = Budget {
        id: Uuid::new_v4(),
        category,
        limit,
        created_at: Utc::now(),
    };
    let summary = format!(
        "Budget set for {}: {}",
        budget.category,
        fmt_money(&budget.limit, &store.settings())
    );
    budgets.push(budget);
    store.save_budgets(&budgets)?;
    println!("{}", summary);
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let wanted = sub.get_one::<String>("id").unwrap();
    let mut budgets = store.budgets();
    let id = find_id(budgets.iter().map(|b| b.id), wanted)?;

    let category = sub.get_one::<String>("category").map(|s| s.trim().to_string());
    let limit = sub
        .get_one::<String>("limit")
        .map(|s| parse_decimal(s))
        .transpose()?;
    if let Some(limit) = limit {
        if limit <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount.into());
        }
    }
    if let Some(category) = &category {
        check_budget_category(&budgets, &store.transactions(), category, Some(id))?;
    }

    let budget = budgets
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| anyhow::anyhow!("No budget matches id '{}'", wanted))?;
    if let Some(category) = category {
        budget.category = category;
    }
    if let Some(limit) = limit {
        budget.limit = limit;
    }
    store.save_budgets(&budgets)?;
    println!("Updated budget {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetRow {
    pub id: String,
    pub category: String,
    pub limit: String,
    pub spent: String,
    pub percentage: String,
    pub status: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let settings = store.settings();
    let transactions = store.transactions();
    let today = today();

    let data: Vec<BudgetRow> = store
        .budgets()
        .iter()
        .map(|b| {
            let spent = spent_this_month(&transactions, &b.category, today);
            let pct = budget_percentage(spent, b.limit);
            BudgetRow {
                id: b.id.to_string()[..8].to_string(),
                category: b.category.clone(),
                limit: fmt_money(&b.limit, &settings),
                spent: fmt_money(&spent, &settings),
                percentage: format!("{:.0}%", pct),
                status: budget_status(pct).to_string(),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.category.clone(),
                    r.limit.clone(),
                    r.spent.clone(),
                    r.percentage.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Category", "Limit", "Spent", "%", "Status"], rows)
        );
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let wanted = sub.get_one::<String>("id").unwrap();
    let mut budgets = store.budgets();
    let id = find_id(budgets.iter().map(|b| b.id), wanted)?;
    budgets.retain(|b| b.id != id);
    store.save_budgets(&budgets)?;
    println!("Deleted budget {}", id);
    Ok(())
}

fn alerts(store: &Store) -> Result<()> {
    let transactions = store.transactions();
    let today = today();
    let mut over = 0usize;
    let mut near = 0usize;
    for b in store.budgets() {
        let pct = budget_percentage(spent_this_month(&transactions, &b.category, today), b.limit);
        match budget_status(pct) {
            BudgetStatus::OverBudget => over += 1,
            BudgetStatus::NearLimit => near += 1,
            BudgetStatus::Ok => {}
        }
    }
    if over == 0 && near == 0 {
        println!("All budgets within limits");
    } else {
        println!("{} over budget, {} near limit", over, near);
    }
    Ok(())
}
