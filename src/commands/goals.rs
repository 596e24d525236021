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

use crate::models::{Goal, ValidationError};
use crate::progress::{
    contribute, days_remaining, months_remaining, pacing_status, percent_complete,
    required_monthly,
};
use crate::store::Store;
use crate::utils::{
    find_id, fmt_display_date, fmt_money, maybe_print_json, parse_date, parse_decimal,
    pretty_table, today,
};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub),
        Some(("edit", sub)) => edit(store, sub),
        Some(("list", sub)) => list(store, sub),
        Some(("contribute", sub)) => contribute_cmd(store, sub),
        Some(("rm", sub)) => rm(store, sub),
        _ => Ok(()),
    }
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let current = parse_decimal(sub.get_one::<String>("current").unwrap())?;
    let target_date = parse_date(sub.get_one::<String>("date").unwrap())?;

    if name.is_empty() {
        return Err(ValidationError::EmptyGoalName.into());
    }
    if target <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveTarget.into());
    }

    let goal = Goal {
        id: Uuid::new_v4(),
        name,
        category,
        target,
        current,
        target_date,
        created_at: Utc::now(),
    };
    let settings = store.settings();
    let summary = format!(
        "Goal '{}': {} by {}",
        goal.name,
        fmt_money(&goal.target, &settings),
        fmt_display_date(goal.target_date, &settings)
    );
    let mut goals = store.goals();
    goals.push(goal);
    store.save_goals(&goals)?;
    println!("{}", summary);
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let wanted = sub.get_one::<String>("id").unwrap();
    let mut goals = store.goals();
    let id = find_id(goals.iter().map(|g| g.id), wanted)?;

    let name = sub.get_one::<String>("name").map(|s| s.trim().to_string());
    let category = sub.get_one::<String>("category").map(|s| s.trim().to_string());
    let target = sub
        .get_one::<String>("target")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let current = sub
        .get_one::<String>("current")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let target_date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?;

    if let Some(name) = &name {
        if name.is_empty() {
            return Err(ValidationError::EmptyGoalName.into());
        }
    }
    if let Some(target) = target {
        if target <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveTarget.into());
        }
    }

    let goal = goals
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| anyhow::anyhow!("No goal matches id '{}'", wanted))?;
    if let Some(name) = name {
        goal.name = name;
    }
    if let Some(category) = category {
        goal.category = category;
    }
    if let Some(target) = target {
        goal.target = target;
    }
    if let Some(current) = current {
        goal.current = current;
    }
    if let Some(target_date) = target_date {
        goal.target_date = target_date;
    }
    store.save_goals(&goals)?;
    println!("Updated goal {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct GoalRow {
    pub id: String,
    pub name: String,
    pub saved: String,
    pub target: String,
    pub progress: String,
    pub due: String,
    pub required: String,
    pub pacing: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let settings = store.settings();
    let today = today();

    let data: Vec<GoalRow> = store
        .goals()
        .iter()
        .map(|g| {
            let days = days_remaining(g.target_date, today);
            let due = if g.current >= g.target {
                "reached".to_string()
            } else if days < 0 {
                format!("{} days overdue", -days)
            } else if days == 0 {
                "due today".to_string()
            } else {
                format!("{} days", days)
            };
            let required = match required_monthly(g, today) {
                Some(amount) if amount == Decimal::ZERO => "-".to_string(),
                Some(amount) if months_remaining(g.target_date, today) == 0 => {
                    format!("{} still needed", fmt_money(&amount, &settings))
                }
                Some(amount) => format!("{}/mo", fmt_money(&amount, &settings)),
                None => "-".to_string(),
            };
            GoalRow {
                id: g.id.to_string()[..8].to_string(),
                name: g.name.clone(),
                saved: fmt_money(&g.current, &settings),
                target: fmt_money(&g.target, &settings),
                progress: format!("{:.0}%", percent_complete(g.current, g.target)),
                due,
                required,
                pacing: pacing_status(g, today).to_string(),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.name.clone(),
                    r.saved.clone(),
                    r.target.clone(),
                    r.progress.clone(),
                    r.due.clone(),
                    r.required.clone(),
                    r.pacing.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Saved", "Target", "Progress", "Due", "Required", "Pacing"],
                rows,
            )
        );
    }
    Ok(())
}

fn contribute_cmd(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let wanted = sub.get_one::<String>("id").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let mut goals = store.goals();
    let id = find_id(goals.iter().map(|g| g.id), wanted)?;
    let goal = goals
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| anyhow::anyhow!("No goal matches id '{}'", wanted))?;

    let reached = contribute(goal, amount)?;
    let (name, current, target) = (goal.name.clone(), goal.current, goal.target);
    store.save_goals(&goals)?;

    let settings = store.settings();
    println!(
        "{} now at {} of {}",
        name,
        fmt_money(&current, &settings),
        fmt_money(&target, &settings)
    );
    if reached {
        println!("🎉 Goal '{}' reached!", name);
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let wanted = sub.get_one::<String>("id").unwrap();
    let mut goals = store.goals();
    let id = find_id(goals.iter().map(|g| g.id), wanted)?;
    goals.retain(|g| g.id != id);
    store.save_goals(&goals)?;
    println!("Deleted goal {}", id);
    Ok(())
}
