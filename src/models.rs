// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    Income,
    Expense,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Income => write!(f, "Income"),
            TxKind::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TxKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::Monthly => write!(f, "Monthly"),
            Frequency::Yearly => write!(f, "Yearly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(ValidationError::UnknownFrequency(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub desc: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    /// Weak back-reference to the template that materialized this
    /// transaction; not ownership.
    #[serde(default)]
    pub template_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTemplate {
    pub id: Uuid,
    pub desc: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: String,
    pub frequency: Frequency,
    /// Date of the most recently materialized occurrence.
    pub last_occurrence: NaiveDate,
    /// Always exactly one frequency step after `last_occurrence`.
    pub next_occurrence: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    /// Monthly limit; month-to-date spend and status are derived, not stored.
    pub limit: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub target: Decimal,
    pub current: Decimal,
    pub target_date: NaiveDate,
    /// Start of the pacing window.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormat::MonthDayYear => write!(f, "MM/DD/YYYY"),
            DateFormat::DayMonthYear => write!(f, "DD/MM/YYYY"),
        }
    }
}

impl FromStr for DateFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MM/DD/YYYY" => Ok(DateFormat::MonthDayYear),
            "DD/MM/YYYY" => Ok(DateFormat::DayMonthYear),
            _ => Err(ValidationError::UnknownDateFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekStart {
    Sunday,
    Monday,
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "Sunday"),
            WeekStart::Monday => write!(f, "Monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sunday" => Ok(WeekStart::Sunday),
            "monday" => Ok(WeekStart::Monday),
            _ => Err(ValidationError::UnknownWeekStart(s.to_string())),
        }
    }
}

/// Process-wide display configuration. `week_start` is persisted and
/// editable but read by no computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_date_format")]
    pub date_format: DateFormat,
    #[serde(default = "default_week_start")]
    pub week_start: WeekStart,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_date_format() -> DateFormat {
    DateFormat::MonthDayYear
}

fn default_week_start() -> WeekStart {
    WeekStart::Sunday
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: default_currency(),
            date_format: default_date_format(),
            week_start: default_week_start(),
        }
    }
}

/// Display symbol only; there is no conversion anywhere.
pub fn currency_symbol(code: &str) -> &'static str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CAD" => "C$",
        "AUD" => "A$",
        "INR" => "₹",
        _ => "$",
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("amount must be greater than 0")]
    NonPositiveAmount,
    #[error("target amount must be greater than 0")]
    NonPositiveTarget,
    #[error("goal name must not be empty")]
    EmptyGoalName,
    #[error("a budget for category '{0}' already exists")]
    DuplicateBudgetCategory(String),
    #[error("category '{0}' has no expense transactions")]
    NoExpensesInCategory(String),
    #[error("unknown kind '{0}', expected income|expense")]
    UnknownKind(String),
    #[error("unknown frequency '{0}', expected weekly|monthly|yearly")]
    UnknownFrequency(String),
    #[error("unknown date format '{0}', expected MM/DD/YYYY or DD/MM/YYYY")]
    UnknownDateFormat(String),
    #[error("unknown week start '{0}', expected sunday|monday")]
    UnknownWeekStart(String),
}
