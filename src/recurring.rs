// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, Months, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{Frequency, RecurringTemplate, Transaction};

/// One frequency step forward from `date`. Month and year addition clamp the
/// day-of-month to the end of a shorter target month (Jan 31 -> Feb 28), so
/// the result is always strictly later than `date`.
pub fn next_occurrence(date: NaiveDate, frequency: Frequency) -> NaiveDate {
    match frequency {
        Frequency::Weekly => date + Days::new(7),
        Frequency::Monthly => date + Months::new(1),
        Frequency::Yearly => date + Months::new(12),
    }
}

/// Creates a template anchored at `transaction.date`: that date becomes the
/// last occurrence and the next one is a single step ahead.
pub fn template_from_transaction(
    transaction: &Transaction,
    frequency: Frequency,
) -> RecurringTemplate {
    RecurringTemplate {
        id: Uuid::new_v4(),
        desc: transaction.desc.clone(),
        amount: transaction.amount,
        kind: transaction.kind,
        category: transaction.category.clone(),
        frequency,
        last_occurrence: transaction.date,
        next_occurrence: next_occurrence(transaction.date, frequency),
        created_at: Utc::now(),
    }
}

fn materialize(template: &RecurringTemplate, date: NaiveDate) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        desc: template.desc.clone(),
        amount: template.amount,
        kind: template.kind,
        category: template.category.clone(),
        date,
        tags: None,
        is_recurring: true,
        frequency: Some(template.frequency),
        template_id: Some(template.id),
    }
}

/// Catch-up pass, run once per program start: materializes every due
/// occurrence of every template, however many steps were missed. Each step
/// advances from the previous occurrence date (not from today), so gaps never
/// drift relative to the template's anchor. Post-condition: every template
/// has `next_occurrence > today`. Returns how many transactions were
/// generated.
pub fn catch_up(
    templates: &mut [RecurringTemplate],
    transactions: &mut Vec<Transaction>,
    today: NaiveDate,
) -> usize {
    let mut generated = 0;
    for template in templates.iter_mut() {
        while template.next_occurrence <= today {
            transactions.push(materialize(template, template.next_occurrence));
            generated += 1;
            template.last_occurrence = template.next_occurrence;
            template.next_occurrence = next_occurrence(template.next_occurrence, template.frequency);
        }
    }
    generated
}
