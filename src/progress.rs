// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::models::{Budget, Goal, Transaction, TxKind, ValidationError};

// --- Budget progress ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Ok,
    NearLimit,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Ok => write!(f, "ok"),
            BudgetStatus::NearLimit => write!(f, "near limit"),
            BudgetStatus::OverBudget => write!(f, "over budget"),
        }
    }
}

/// Sum of Expense amounts in `category` dated within today's calendar month.
pub fn spent_this_month(transactions: &[Transaction], category: &str, today: NaiveDate) -> Decimal {
    transactions
        .iter()
        .filter(|t| {
            t.kind == TxKind::Expense
                && t.category == category
                && t.date.year() == today.year()
                && t.date.month() == today.month()
        })
        .map(|t| t.amount)
        .sum()
}

/// Unbounded above; callers cap at 100 for progress-bar display only.
pub fn budget_percentage(spent: Decimal, limit: Decimal) -> Decimal {
    if limit <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    spent / limit * Decimal::ONE_HUNDRED
}

pub fn budget_status(percentage: Decimal) -> BudgetStatus {
    if percentage >= Decimal::ONE_HUNDRED {
        BudgetStatus::OverBudget
    } else if percentage >= Decimal::from(80) {
        BudgetStatus::NearLimit
    } else {
        BudgetStatus::Ok
    }
}

/// Write-time budget validation: at most one budget per category, and the
/// category must have at least one expense transaction. `editing` excludes
/// that budget from the uniqueness check.
pub fn check_budget_category(
    budgets: &[Budget],
    transactions: &[Transaction],
    category: &str,
    editing: Option<Uuid>,
) -> Result<(), ValidationError> {
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    let duplicate = budgets
        .iter()
        .any(|b| b.category == category && Some(b.id) != editing);
    if duplicate {
        return Err(ValidationError::DuplicateBudgetCategory(category.to_string()));
    }
    let has_expense = transactions
        .iter()
        .any(|t| t.kind == TxKind::Expense && t.category == category);
    if !has_expense {
        return Err(ValidationError::NoExpensesInCategory(category.to_string()));
    }
    Ok(())
}

// --- Goal progress ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingStatus {
    OnTrack,
    AtRisk,
    Behind,
    Overdue,
    Complete,
}

impl fmt::Display for PacingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacingStatus::OnTrack => write!(f, "On Track"),
            PacingStatus::AtRisk => write!(f, "At Risk"),
            PacingStatus::Behind => write!(f, "Behind"),
            PacingStatus::Overdue => write!(f, "Overdue"),
            PacingStatus::Complete => write!(f, "Complete"),
        }
    }
}

/// Capped at 100; a non-positive target is defined as 0%.
pub fn percent_complete(current: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (current / target * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
}

/// Whole days until the target date, date-only; negative means overdue.
pub fn days_remaining(target_date: NaiveDate, today: NaiveDate) -> i64 {
    (target_date - today).num_days()
}

/// Compares actual percent complete against the linear schedule implied by
/// the creation and target dates. Any gap of 10 points or less, including a
/// negative gap (ahead of schedule), reports OnTrack.
pub fn pacing_status(goal: &Goal, today: NaiveDate) -> PacingStatus {
    let actual = percent_complete(goal.current, goal.target);
    if actual >= Decimal::ONE_HUNDRED {
        return PacingStatus::Complete;
    }
    if days_remaining(goal.target_date, today) < 0 {
        return PacingStatus::Overdue;
    }

    let start = goal.created_at.date_naive();
    let total = (goal.target_date - start).num_days();
    let elapsed = (today - start).num_days();
    if total <= 0 || elapsed <= 0 {
        return PacingStatus::OnTrack;
    }

    let expected = elapsed as f64 / total as f64 * 100.0;
    let diff = expected - actual.to_f64().unwrap_or(0.0);
    if diff <= 10.0 {
        PacingStatus::OnTrack
    } else if diff <= 30.0 {
        PacingStatus::AtRisk
    } else {
        PacingStatus::Behind
    }
}

/// Calendar months between now and the target month, floored at 0.
pub fn months_remaining(target_date: NaiveDate, today: NaiveDate) -> i64 {
    let months = (target_date.year() as i64 - today.year() as i64) * 12
        + (target_date.month() as i64 - today.month() as i64);
    months.max(0)
}

/// Monthly amount needed to hit the target on time. `None` means the target
/// date is already past and no monthly figure is meaningful; callers show the
/// raw remaining amount instead. A target due later this calendar month
/// requires the whole remainder at once.
pub fn required_monthly(goal: &Goal, today: NaiveDate) -> Option<Decimal> {
    let remaining = goal.target - goal.current;
    if remaining <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    let months = months_remaining(goal.target_date, today);
    if months > 0 {
        return Some(remaining / Decimal::from(months));
    }
    if days_remaining(goal.target_date, today) > 0 {
        return Some(remaining);
    }
    None
}

/// Adds a positive contribution. Returns true exactly when this contribution
/// crosses `current` from below the target to at or above it; the completion
/// celebration is edge-triggered on that crossing, never re-fired.
pub fn contribute(goal: &mut Goal, amount: Decimal) -> Result<bool, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    let was_complete = goal.current >= goal.target;
    goal.current += amount;
    let now_complete = goal.current >= goal.target;
    Ok(!was_complete && now_complete)
}
