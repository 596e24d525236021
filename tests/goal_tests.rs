// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use billfold::models::{Goal, ValidationError};
use billfold::progress::{
    contribute, days_remaining, months_remaining, pacing_status, percent_complete,
    required_monthly, PacingStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn goal(current: &str, target: &str, created: NaiveDate, due: NaiveDate) -> Goal {
    Goal {
        id: Uuid::new_v4(),
        name: "Emergency fund".to_string(),
        category: String::new(),
        target: dec(target),
        current: dec(current),
        target_date: due,
        created_at: created.and_hms_opt(0, 0, 0).unwrap().and_utc(),
    }
}

#[test]
fn percent_complete_caps_at_one_hundred() {
    assert_eq!(percent_complete(dec("50"), dec("200")), dec("25"));
    assert_eq!(percent_complete(dec("250"), dec("200")), dec("100"));
    assert_eq!(percent_complete(dec("50"), dec("0")), Decimal::ZERO);
}

#[test]
fn contribution_crossing_the_target_fires_once() {
    let mut g = goal("950", "1000", date(2023, 1, 1), date(2024, 1, 1));

    assert!(contribute(&mut g, dec("60")).unwrap());
    assert_eq!(g.current, dec("1010"));

    // Already complete, no second celebration.
    assert!(!contribute(&mut g, dec("10")).unwrap());
    assert_eq!(g.current, dec("1020"));
}

#[test]
fn contribution_short_of_the_target_does_not_fire() {
    let mut g = goal("950", "1000", date(2023, 1, 1), date(2024, 1, 1));
    assert!(!contribute(&mut g, dec("40")).unwrap());
    assert_eq!(g.current, dec("990"));
}

#[test]
fn contribution_must_be_positive() {
    let mut g = goal("0", "1000", date(2023, 1, 1), date(2024, 1, 1));
    assert_eq!(
        contribute(&mut g, dec("0")).unwrap_err(),
        ValidationError::NonPositiveAmount
    );
    assert_eq!(g.current, Decimal::ZERO);
}

#[test]
fn pacing_complete_wins_over_overdue() {
    let g = goal("1000", "1000", date(2023, 1, 1), date(2023, 6, 1));
    assert_eq!(pacing_status(&g, date(2023, 12, 1)), PacingStatus::Complete);
}

#[test]
fn pacing_overdue_when_past_due_and_incomplete() {
    let g = goal("100", "1000", date(2023, 1, 1), date(2023, 6, 1));
    assert_eq!(pacing_status(&g, date(2023, 6, 2)), PacingStatus::Overdue);
}

#[test]
fn pacing_thresholds_against_the_linear_schedule() {
    // One-year window, checked halfway through: expected 50%.
    let created = date(2023, 1, 1);
    let due = date(2024, 1, 1);
    let halfway = date(2023, 7, 2);

    // 45% actual, 5 points behind: on track.
    let g = goal("450", "1000", created, due);
    assert_eq!(pacing_status(&g, halfway), PacingStatus::OnTrack);

    // 60% actual, ahead of schedule: still on track.
    let g = goal("600", "1000", created, due);
    assert_eq!(pacing_status(&g, halfway), PacingStatus::OnTrack);

    // 30% actual, about 20 points behind: at risk.
    let g = goal("300", "1000", created, due);
    assert_eq!(pacing_status(&g, halfway), PacingStatus::AtRisk);

    // 10% actual, about 40 points behind: behind.
    let g = goal("100", "1000", created, due);
    assert_eq!(pacing_status(&g, halfway), PacingStatus::Behind);
}

#[test]
fn pacing_degenerate_windows_read_on_track() {
    // Checked on the creation day itself.
    let g = goal("0", "1000", date(2023, 6, 1), date(2024, 1, 1));
    assert_eq!(pacing_status(&g, date(2023, 6, 1)), PacingStatus::OnTrack);

    // Target date not after creation.
    let g = goal("0", "1000", date(2023, 6, 1), date(2023, 6, 1));
    assert_eq!(pacing_status(&g, date(2023, 6, 1)), PacingStatus::OnTrack);
}

#[test]
fn days_remaining_is_signed() {
    assert_eq!(days_remaining(date(2023, 10, 20), date(2023, 10, 15)), 5);
    assert_eq!(days_remaining(date(2023, 10, 15), date(2023, 10, 15)), 0);
    assert_eq!(days_remaining(date(2023, 10, 10), date(2023, 10, 15)), -5);
}

#[test]
fn months_remaining_counts_calendar_months() {
    assert_eq!(months_remaining(date(2024, 1, 1), date(2023, 10, 15)), 3);
    assert_eq!(months_remaining(date(2023, 10, 31), date(2023, 10, 1)), 0);
    assert_eq!(months_remaining(date(2023, 1, 1), date(2023, 10, 15)), 0);
}

#[test]
fn required_monthly_divides_over_remaining_months() {
    let g = goal("400", "1000", date(2023, 1, 1), date(2024, 1, 15));
    // 600 remaining over 3 calendar months.
    assert_eq!(required_monthly(&g, date(2023, 10, 20)), Some(dec("200")));
}

#[test]
fn required_monthly_due_this_month_needs_the_full_remainder() {
    let g = goal("400", "1000", date(2023, 1, 1), date(2023, 10, 25));
    assert_eq!(required_monthly(&g, date(2023, 10, 20)), Some(dec("600")));
}

#[test]
fn required_monthly_past_due_has_no_answer() {
    let g = goal("400", "1000", date(2023, 1, 1), date(2023, 9, 1));
    assert_eq!(required_monthly(&g, date(2023, 10, 20)), None);
}

#[test]
fn required_monthly_complete_goal_needs_nothing() {
    let g = goal("1000", "1000", date(2023, 1, 1), date(2023, 9, 1));
    assert_eq!(required_monthly(&g, date(2023, 10, 20)), Some(Decimal::ZERO));
}

#[test]
fn goal_edit_preserves_created_at() {
    let dir = tempfile::tempdir().unwrap();
    let store = billfold::store::Store::open(dir.path()).unwrap();

    let g = goal("100", "1000", date(2023, 1, 1), date(2024, 1, 1));
    let id = g.id.to_string();
    let created_at = g.created_at;
    store.save_goals(&[g]).unwrap();

    let cli = billfold::cli::build_cli();
    let matches =
        cli.get_matches_from(["billfold", "goal", "edit", &id, "--target", "2000"]);
    if let Some(("goal", goal_m)) = matches.subcommand() {
        billfold::commands::goals::handle(&store, goal_m).unwrap();
    } else {
        panic!("no goal subcommand");
    }

    let goals = store.goals();
    assert_eq!(goals[0].target, dec("2000"));
    assert_eq!(goals[0].created_at, created_at);
}
