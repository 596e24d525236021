// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TxKind};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, today};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(store, sub),
        Some(("top-categories", sub)) => top_categories(store, sub),
        Some(("metrics", _)) => metrics(store),
        _ => Ok(()),
    }
}

/// (income, expenses) for one calendar month.
pub fn month_totals(transactions: &[Transaction], year: i32, month: u32) -> (Decimal, Decimal) {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for t in transactions {
        if t.date.year() == year && t.date.month() == month {
            match t.kind {
                TxKind::Income => income += t.amount,
                TxKind::Expense => expenses += t.amount,
            }
        }
    }
    (income, expenses)
}

/// Steps back `n` whole months from (year, month), wrapping across years.
fn months_back(year: i32, month: u32, n: u32) -> (i32, u32) {
    let total = year as i64 * 12 + (month as i64 - 1) - n as i64;
    ((total.div_euclid(12)) as i32, (total.rem_euclid(12) + 1) as u32)
}

#[derive(Serialize)]
pub struct CashflowRow {
    pub month: String,
    pub income: String,
    pub expenses: String,
    pub net: String,
}

fn cashflow(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months = *sub.get_one::<usize>("months").unwrap();
    let settings = store.settings();
    let transactions = store.transactions();

    // Only months that have at least one transaction appear.
    let mut by_month: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in &transactions {
        let entry = by_month
            .entry(t.date.format("%Y-%m").to_string())
            .or_default();
        match t.kind {
            TxKind::Income => entry.0 += t.amount,
            TxKind::Expense => entry.1 += t.amount,
        }
    }

    let mut data: Vec<CashflowRow> = by_month
        .iter()
        .rev()
        .take(months)
        .map(|(month, (income, expenses))| CashflowRow {
            month: month.clone(),
            income: fmt_money(income, &settings),
            expenses: fmt_money(expenses, &settings),
            net: fmt_money(&(income - expenses), &settings),
        })
        .collect();
    data.reverse();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.month.clone(),
                    r.income.clone(),
                    r.expenses.clone(),
                    r.net.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub spent: String,
}

fn top_categories(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let settings = store.settings();
    let today = today();

    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in store.transactions() {
        if t.kind == TxKind::Expense
            && t.date.year() == today.year()
            && t.date.month() == today.month()
        {
            *by_category.entry(t.category).or_default() += t.amount;
        }
    }
    let mut totals: Vec<(String, Decimal)> = by_category.into_iter().collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.truncate(5);

    let data: Vec<CategoryRow> = totals
        .into_iter()
        .map(|(category, spent)| CategoryRow {
            category,
            spent: fmt_money(&spent, &settings),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.category.clone(), r.spent.clone()])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn metrics(store: &Store) -> Result<()> {
    let settings = store.settings();
    let transactions = store.transactions();
    let today = today();

    let (_, this_expenses) = month_totals(&transactions, today.year(), today.month());
    let avg_daily = this_expenses / Decimal::from(today.day());
    println!("Average daily spend: {}", fmt_money(&avg_daily, &settings));

    let (py, pm) = months_back(today.year(), today.month(), 1);
    let (_, prev_expenses) = month_totals(&transactions, py, pm);
    if prev_expenses > Decimal::ZERO {
        let change = (this_expenses - prev_expenses) / prev_expenses * Decimal::ONE_HUNDRED;
        let direction = if change >= Decimal::ZERO { "up" } else { "down" };
        println!(
            "Spending {} {:.0}% vs last month ({} -> {})",
            direction,
            change.abs(),
            fmt_money(&prev_expenses, &settings),
            fmt_money(&this_expenses, &settings)
        );
    } else {
        println!("No expenses last month to compare against");
    }

    if let Some((month, net)) = best_saving_month(&transactions, today) {
        println!("Best saving month: {} ({})", month, fmt_money(&net, &settings));
    } else {
        println!("Not enough history for a best saving month");
    }

    match spending_trend(&transactions, today) {
        Some(trend) => println!("Spending trend: {}", trend),
        None => println!("Not enough history for a spending trend"),
    }
    Ok(())
}

/// Highest net month of the last six that have any activity.
fn best_saving_month(transactions: &[Transaction], today: NaiveDate) -> Option<(String, Decimal)> {
    let mut best: Option<(String, Decimal)> = None;
    for n in 0..6u32 {
        let (y, m) = months_back(today.year(), today.month(), n);
        let (income, expenses) = month_totals(transactions, y, m);
        if income == Decimal::ZERO && expenses == Decimal::ZERO {
            continue;
        }
        let net = income - expenses;
        if best.as_ref().is_none_or(|(_, b)| net > *b) {
            best = Some((format!("{:04}-{:02}", y, m), net));
        }
    }
    best
}

/// Current month vs the one before; needs expenses in at least two of the
/// last three months to say anything.
fn spending_trend(transactions: &[Transaction], today: NaiveDate) -> Option<&'static str> {
    let mut with_expenses = 0;
    for n in 0..3u32 {
        let (y, m) = months_back(today.year(), today.month(), n);
        let (_, expenses) = month_totals(transactions, y, m);
        if expenses > Decimal::ZERO {
            with_expenses += 1;
        }
    }
    if with_expenses < 2 {
        return None;
    }
    let (_, current) = month_totals(transactions, today.year(), today.month());
    let (py, pm) = months_back(today.year(), today.month(), 1);
    let (_, previous) = month_totals(transactions, py, pm);
    if current > previous {
        Some("increasing")
    } else if current < previous {
        Some("decreasing")
    } else {
        Some("stable")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::{best_saving_month, month_totals, months_back, spending_trend};
    use crate::models::{Transaction, TxKind};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn tx(amount: &str, kind: TxKind, y: i32, m: u32, d: u32) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            desc: "entry".to_string(),
            amount: dec(amount),
            kind,
            category: "Misc".to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            tags: None,
            is_recurring: false,
            frequency: None,
            template_id: None,
        }
    }

    #[test]
    fn months_back_wraps_across_years() {
        assert_eq!(months_back(2024, 1, 1), (2023, 12));
        assert_eq!(months_back(2024, 3, 3), (2023, 12));
        assert_eq!(months_back(2024, 6, 0), (2024, 6));
        assert_eq!(months_back(2024, 2, 14), (2022, 12));
    }

    #[test]
    fn month_totals_splits_income_and_expenses_per_month() {
        let txs = vec![
            tx("2000", TxKind::Income, 2023, 10, 1),
            tx("500", TxKind::Expense, 2023, 10, 12),
            tx("100", TxKind::Expense, 2023, 9, 30),
        ];
        assert_eq!(month_totals(&txs, 2023, 10), (dec("2000"), dec("500")));
        assert_eq!(month_totals(&txs, 2023, 9), (Decimal::ZERO, dec("100")));
        assert_eq!(month_totals(&txs, 2023, 8), (Decimal::ZERO, Decimal::ZERO));
    }

    #[test]
    fn best_saving_month_picks_the_highest_net_with_activity() {
        let today = NaiveDate::from_ymd_opt(2023, 10, 15).unwrap();
        let txs = vec![
            tx("100", TxKind::Income, 2023, 10, 1),
            tx("50", TxKind::Expense, 2023, 10, 2),
            tx("500", TxKind::Income, 2023, 9, 1),
            tx("100", TxKind::Expense, 2023, 9, 2),
            tx("10", TxKind::Income, 2023, 6, 1),
            // Outside the six-month window.
            tx("9999", TxKind::Income, 2023, 3, 1),
        ];
        assert_eq!(
            best_saving_month(&txs, today),
            Some(("2023-09".to_string(), dec("400")))
        );
        assert_eq!(best_saving_month(&[], today), None);
    }

    #[test]
    fn spending_trend_needs_expenses_in_two_recent_months() {
        let today = NaiveDate::from_ymd_opt(2023, 10, 15).unwrap();

        let only_one = vec![tx("300", TxKind::Expense, 2023, 10, 1)];
        assert_eq!(spending_trend(&only_one, today), None);

        let rising = vec![
            tx("300", TxKind::Expense, 2023, 10, 1),
            tx("200", TxKind::Expense, 2023, 9, 1),
        ];
        assert_eq!(spending_trend(&rising, today), Some("increasing"));

        let falling = vec![
            tx("100", TxKind::Expense, 2023, 10, 1),
            tx("200", TxKind::Expense, 2023, 9, 1),
        ];
        assert_eq!(spending_trend(&falling, today), Some("decreasing"));

        let level = vec![
            tx("200", TxKind::Expense, 2023, 10, 1),
            tx("200", TxKind::Expense, 2023, 9, 1),
        ];
        assert_eq!(spending_trend(&level, today), Some("stable"));
    }
}
