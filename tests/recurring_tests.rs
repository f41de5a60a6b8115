// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use solarledger::errors::StoreError;
use solarledger::models::{
    CompletedProject, FinanceRecord, Frequency, ProjectAssignment, RecordCategory, RecurringExpense,
};
use solarledger::recurring::{due_occurrences, process_recurring, OutcomeStatus, SkipReason};
use solarledger::store::{FinanceStore, SqliteStore};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    solarledger::db::init_schema(&mut conn).unwrap();
    conn
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add_def(conn: &Connection, name: &str, frequency: &str, start: &str, active: bool) {
    conn.execute(
        "INSERT INTO recurring_expenses(name, category, amount, frequency, is_active, start_date)
         VALUES (?1, 'subscription', '50', ?2, ?3, ?4)",
        params![name, frequency, active, start],
    )
    .unwrap();
}

fn record_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM finance_records", [], |r| r.get(0))
        .unwrap()
}

fn last_processed(conn: &Connection, name: &str) -> Option<String> {
    conn.query_row(
        "SELECT last_processed_date FROM recurring_expenses WHERE name=?1",
        params![name],
        |r| r.get(0),
    )
    .unwrap()
}

#[test]
fn monthly_backlog_is_materialized_from_start() {
    let conn = setup();
    add_def(&conn, "CRM subscription", "monthly", "2024-01-15", true);

    let mut store = SqliteStore::new(&conn);
    let report = process_recurring(&mut store, d("2024-04-20")).unwrap();
    assert_eq!(report.created, 4);
    assert_eq!(report.skipped, 0);

    let mut stmt = conn
        .prepare("SELECT record_date, amount, is_recurring, notes FROM finance_records ORDER BY record_date")
        .unwrap();
    let rows: Vec<(String, String, bool, String)> = stmt
        .query_map([], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
        })
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    let dates: Vec<&str> = rows.iter().map(|r| r.0.as_str()).collect();
    assert_eq!(dates, ["2024-01-15", "2024-02-15", "2024-03-15", "2024-04-15"]);
    for (_, amount, is_recurring, notes) in &rows {
        assert_eq!(amount, "50");
        assert!(is_recurring);
        assert_eq!(notes, "CRM subscription");
    }
    assert_eq!(last_processed(&conn, "CRM subscription").unwrap(), "2024-04-15");
}

#[test]
fn second_run_with_same_today_creates_nothing() {
    let conn = setup();
    add_def(&conn, "CRM subscription", "monthly", "2024-01-15", true);

    let mut store = SqliteStore::new(&conn);
    let first = process_recurring(&mut store, d("2024-04-20")).unwrap();
    assert_eq!(first.created, 4);
    let second = process_recurring(&mut store, d("2024-04-20")).unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(record_count(&conn), 4);
    assert_eq!(last_processed(&conn, "CRM subscription").unwrap(), "2024-04-15");
}

#[test]
fn marker_never_moves_backwards() {
    let conn = setup();
    add_def(&conn, "Hosting", "weekly", "2024-01-01", true);

    let mut store = SqliteStore::new(&conn);
    process_recurring(&mut store, d("2024-01-15")).unwrap();
    let before = last_processed(&conn, "Hosting").unwrap();
    assert_eq!(before, "2024-01-15");

    // nothing due yet; the marker stays put
    process_recurring(&mut store, d("2024-01-20")).unwrap();
    assert_eq!(last_processed(&conn, "Hosting").unwrap(), before);

    process_recurring(&mut store, d("2024-02-01")).unwrap();
    let after = last_processed(&conn, "Hosting").unwrap();
    assert!(after.as_str() > before.as_str());
}

#[test]
fn inactive_definition_is_skipped_without_catchup() {
    let conn = setup();
    add_def(&conn, "Paused insurance", "monthly", "2024-01-01", false);

    let mut store = SqliteStore::new(&conn);
    let report = process_recurring(&mut store, d("2024-06-01")).unwrap();
    assert_eq!(report.created, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        report.outcomes[0].status,
        OutcomeStatus::Skipped(SkipReason::Inactive)
    );
    assert_eq!(record_count(&conn), 0);
    assert_eq!(last_processed(&conn, "Paused insurance"), None);
}

#[test]
fn ended_definition_is_skipped() {
    let conn = setup();
    conn.execute(
        "INSERT INTO recurring_expenses(name, category, amount, frequency, start_date, end_date)
         VALUES ('Old lease', 'rent', '900', 'monthly', '2023-01-01', '2023-12-31')",
        [],
    )
    .unwrap();

    let mut store = SqliteStore::new(&conn);
    let report = process_recurring(&mut store, d("2024-02-01")).unwrap();
    assert_eq!(report.created, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        report.outcomes[0].status,
        OutcomeStatus::Skipped(SkipReason::Ended)
    );
}

#[test]
fn future_start_produces_nothing_yet() {
    let conn = setup();
    add_def(&conn, "New tool", "weekly", "2024-06-01", true);

    let mut store = SqliteStore::new(&conn);
    let report = process_recurring(&mut store, d("2024-05-01")).unwrap();
    assert_eq!(report.created, 0);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.outcomes[0].status, OutcomeStatus::Created(0));
    assert_eq!(last_processed(&conn, "New tool"), None);
}

#[test]
fn weekly_steps_by_seven_days() {
    let def = RecurringExpense {
        id: 1,
        name: "Hosting".into(),
        category: RecordCategory::Subscription,
        amount: "10".parse().unwrap(),
        frequency: Frequency::Weekly,
        is_active: true,
        start_date: d("2024-01-01"),
        end_date: None,
        last_processed_date: None,
        notes: None,
    };
    let due = due_occurrences(&def, d("2024-01-15"));
    assert_eq!(due, vec![d("2024-01-01"), d("2024-01-08"), d("2024-01-15")]);
}

#[test]
fn monthly_day_clamps_into_short_months() {
    let def = RecurringExpense {
        id: 1,
        name: "Lease".into(),
        category: RecordCategory::Rent,
        amount: "900".parse().unwrap(),
        frequency: Frequency::Monthly,
        is_active: true,
        start_date: d("2024-01-31"),
        end_date: None,
        last_processed_date: None,
        notes: None,
    };
    let due = due_occurrences(&def, d("2024-03-01"));
    assert_eq!(due, vec![d("2024-01-31"), d("2024-02-29")]);
}

#[test]
fn yearly_leap_anchor_clamps_in_common_years() {
    let def = RecurringExpense {
        id: 1,
        name: "License".into(),
        category: RecordCategory::Subscription,
        amount: "500".parse().unwrap(),
        frequency: Frequency::Yearly,
        is_active: true,
        start_date: d("2024-02-29"),
        end_date: None,
        last_processed_date: None,
        notes: None,
    };
    let due = due_occurrences(&def, d("2025-03-01"));
    assert_eq!(due, vec![d("2024-02-29"), d("2025-02-28")]);
}

/// Store that refuses to persist one definition, to prove failures stay
/// isolated per definition.
struct FlakyStore {
    defs: Vec<RecurringExpense>,
    applied: Vec<(i64, usize)>,
}

impl FinanceStore for FlakyStore {
    fn projects_completed_between(
        &self,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<CompletedProject>, StoreError> {
        Ok(Vec::new())
    }
    fn assignments_completed_between(
        &self,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<ProjectAssignment>, StoreError> {
        Ok(Vec::new())
    }
    fn finance_records_between(
        &self,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<FinanceRecord>, StoreError> {
        Ok(Vec::new())
    }
    fn recurring_expenses(&self) -> Result<Vec<RecurringExpense>, StoreError> {
        Ok(self.defs.clone())
    }
    fn apply_occurrences(
        &mut self,
        def: &RecurringExpense,
        dates: &[NaiveDate],
    ) -> Result<(), StoreError> {
        if def.name == "Broken" {
            return Err(StoreError::new("disk full"));
        }
        self.applied.push((def.id, dates.len()));
        Ok(())
    }
}

#[test]
fn one_failing_definition_does_not_abort_the_rest() {
    let template = RecurringExpense {
        id: 0,
        name: String::new(),
        category: RecordCategory::Subscription,
        amount: "10".parse().unwrap(),
        frequency: Frequency::Monthly,
        is_active: true,
        start_date: d("2024-01-01"),
        end_date: None,
        last_processed_date: None,
        notes: None,
    };
    let mut store = FlakyStore {
        defs: vec![
            RecurringExpense {
                id: 1,
                name: "Broken".into(),
                ..template.clone()
            },
            RecurringExpense {
                id: 2,
                name: "Fine".into(),
                ..template
            },
        ],
        applied: Vec::new(),
    };

    let report = process_recurring(&mut store, d("2024-03-01")).unwrap();
    assert_eq!(report.outcomes.len(), 2);
    assert!(matches!(report.outcomes[0].status, OutcomeStatus::Failed(_)));
    assert_eq!(report.outcomes[1].status, OutcomeStatus::Created(3));
    assert_eq!(report.created, 3);
    assert_eq!(store.applied, vec![(2, 3)]);
}
