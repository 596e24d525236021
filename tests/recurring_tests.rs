// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use billfold::models::{Frequency, RecurringTemplate, Transaction, TxKind};
use billfold::recurring::{catch_up, next_occurrence, template_from_transaction};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn template(last: NaiveDate, frequency: Frequency) -> RecurringTemplate {
    RecurringTemplate {
        id: Uuid::new_v4(),
        desc: "Rent".to_string(),
        amount: "1200".parse::<Decimal>().unwrap(),
        kind: TxKind::Expense,
        category: "Housing".to_string(),
        frequency,
        last_occurrence: last,
        next_occurrence: next_occurrence(last, frequency),
        created_at: Utc::now(),
    }
}

#[test]
fn weekly_step_adds_seven_days() {
    assert_eq!(
        next_occurrence(date(2023, 8, 1), Frequency::Weekly),
        date(2023, 8, 8)
    );
}

#[test]
fn monthly_step_clamps_to_short_months() {
    assert_eq!(
        next_occurrence(date(2023, 1, 31), Frequency::Monthly),
        date(2023, 2, 28)
    );
    assert_eq!(
        next_occurrence(date(2024, 1, 31), Frequency::Monthly),
        date(2024, 2, 29)
    );
}

#[test]
fn yearly_step_clamps_leap_day() {
    assert_eq!(
        next_occurrence(date(2024, 2, 29), Frequency::Yearly),
        date(2025, 2, 28)
    );
    assert_eq!(
        next_occurrence(date(2023, 6, 15), Frequency::Yearly),
        date(2024, 6, 15)
    );
}

#[test]
fn step_is_always_strictly_later() {
    for freq in [Frequency::Weekly, Frequency::Monthly, Frequency::Yearly] {
        let d = date(2023, 12, 31);
        assert!(next_occurrence(d, freq) > d);
    }
}

#[test]
fn template_is_anchored_at_the_source_transaction() {
    let tx = Transaction {
        id: Uuid::new_v4(),
        desc: "Gym".to_string(),
        amount: "40".parse::<Decimal>().unwrap(),
        kind: TxKind::Expense,
        category: "Health".to_string(),
        date: date(2023, 8, 1),
        tags: None,
        is_recurring: true,
        frequency: Some(Frequency::Monthly),
        template_id: None,
    };
    let t = template_from_transaction(&tx, Frequency::Monthly);
    assert_eq!(t.last_occurrence, date(2023, 8, 1));
    assert_eq!(t.next_occurrence, date(2023, 9, 1));
    assert_eq!(t.desc, "Gym");
    assert_eq!(t.kind, TxKind::Expense);
}

#[test]
fn catch_up_materializes_every_missed_occurrence() {
    let mut templates = vec![template(date(2023, 8, 1), Frequency::Monthly)];
    let mut transactions = Vec::new();

    let generated = catch_up(&mut templates, &mut transactions, date(2023, 10, 15));

    assert_eq!(generated, 2);
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].date, date(2023, 9, 1));
    assert_eq!(transactions[1].date, date(2023, 10, 1));
    assert_eq!(templates[0].last_occurrence, date(2023, 10, 1));
    assert_eq!(templates[0].next_occurrence, date(2023, 11, 1));
    for tx in &transactions {
        assert!(tx.is_recurring);
        assert_eq!(tx.template_id, Some(templates[0].id));
        assert_eq!(tx.amount, templates[0].amount);
    }
}

#[test]
fn catch_up_drains_everything_due_through_today() {
    // next_occurrence starts at 2023-08-01.
    let mut templates = vec![template(date(2023, 7, 1), Frequency::Monthly)];
    let mut transactions = Vec::new();

    let today = date(2023, 10, 15);
    let generated = catch_up(&mut templates, &mut transactions, today);

    assert_eq!(generated, 3);
    let dates: Vec<NaiveDate> = transactions.iter().map(|t| t.date).collect();
    assert_eq!(dates, vec![date(2023, 8, 1), date(2023, 9, 1), date(2023, 10, 1)]);
    assert!(templates[0].next_occurrence > today);
    assert_eq!(templates[0].next_occurrence, date(2023, 11, 1));
}

#[test]
fn catch_up_is_a_noop_when_nothing_is_due() {
    let mut templates = vec![template(date(2023, 10, 10), Frequency::Monthly)];
    let mut transactions = Vec::new();

    let generated = catch_up(&mut templates, &mut transactions, date(2023, 10, 15));

    assert_eq!(generated, 0);
    assert!(transactions.is_empty());
    assert_eq!(templates[0].next_occurrence, date(2023, 11, 10));
}

#[test]
fn catch_up_due_today_fires_and_advances_past_today() {
    let mut templates = vec![template(date(2023, 10, 8), Frequency::Weekly)];
    let mut transactions = Vec::new();

    let today = date(2023, 10, 15);
    let generated = catch_up(&mut templates, &mut transactions, today);

    assert_eq!(generated, 1);
    assert_eq!(transactions[0].date, today);
    assert!(templates[0].next_occurrence > today);
}

#[test]
fn catch_up_handles_many_missed_weekly_occurrences() {
    let mut templates = vec![template(date(2023, 1, 1), Frequency::Weekly)];
    let mut transactions = Vec::new();

    let generated = catch_up(&mut templates, &mut transactions, date(2023, 3, 1));

    // 2023-01-08 through 2023-02-26 inclusive.
    assert_eq!(generated, 8);
    assert!(templates[0].next_occurrence > date(2023, 3, 1));
    for pair in transactions.windows(2) {
        assert_eq!((pair[1].date - pair[0].date).num_days(), 7);
    }
}

#[test]
fn adding_a_recurring_transaction_creates_a_template() {
    let dir = tempfile::tempdir().unwrap();
    let store = billfold::store::Store::open(dir.path()).unwrap();

    let cli = billfold::cli::build_cli();
    let matches = cli.get_matches_from([
        "billfold", "tx", "add", "--desc", "Netflix", "--amount", "15.99", "--kind", "expense",
        "--category", "Entertainment", "--date", "2023-08-01", "--recurring", "monthly",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        billfold::commands::transactions::handle(&store, tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }

    let transactions = store.transactions();
    let templates = store.templates();
    assert_eq!(transactions.len(), 1);
    assert_eq!(templates.len(), 1);
    assert_eq!(transactions[0].template_id, Some(templates[0].id));
    assert!(transactions[0].is_recurring);
    assert_eq!(templates[0].next_occurrence, date(2023, 9, 1));
}

#[test]
fn cascade_delete_removes_generated_transactions_only() {
    let dir = tempfile::tempdir().unwrap();
    let store = billfold::store::Store::open(dir.path()).unwrap();

    let mut templates = vec![template(date(2023, 8, 1), Frequency::Monthly)];
    let mut transactions = vec![Transaction {
        id: Uuid::new_v4(),
        desc: "Coffee".to_string(),
        amount: "4.50".parse::<Decimal>().unwrap(),
        kind: TxKind::Expense,
        category: "Dining".to_string(),
        date: date(2023, 9, 2),
        tags: None,
        is_recurring: false,
        frequency: None,
        template_id: None,
    }];
    catch_up(&mut templates, &mut transactions, date(2023, 10, 15));
    store.save_templates(&templates).unwrap();
    store.save_transactions(&transactions).unwrap();

    let id = templates[0].id.to_string();
    let cli = billfold::cli::build_cli();
    let matches =
        cli.get_matches_from(["billfold", "recurring", "rm", &id, "--cascade"]);
    if let Some(("recurring", rec_m)) = matches.subcommand() {
        billfold::commands::recurring::handle(&store, rec_m).unwrap();
    } else {
        panic!("no recurring subcommand");
    }

    assert!(store.templates().is_empty());
    let remaining = store.transactions();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].desc, "Coffee");
}

#[test]
fn frequency_edit_recomputes_next_from_last_occurrence() {
    let dir = tempfile::tempdir().unwrap();
    let store = billfold::store::Store::open(dir.path()).unwrap();

    let t = template(date(2023, 8, 1), Frequency::Monthly);
    let id = t.id.to_string();
    store.save_templates(&[t]).unwrap();

    let cli = billfold::cli::build_cli();
    let matches =
        cli.get_matches_from(["billfold", "recurring", "edit", &id, "--frequency", "weekly"]);
    if let Some(("recurring", rec_m)) = matches.subcommand() {
        billfold::commands::recurring::handle(&store, rec_m).unwrap();
    } else {
        panic!("no recurring subcommand");
    }

    let templates = store.templates();
    assert_eq!(templates[0].frequency, Frequency::Weekly);
    assert_eq!(templates[0].last_occurrence, date(2023, 8, 1));
    assert_eq!(templates[0].next_occurrence, date(2023, 8, 8));
}
