// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use solarledger::errors::CoreError;
use solarledger::store::SqliteStore;
use solarledger::summary::{summarize, Period};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    solarledger::db::init_schema(&mut conn).unwrap();
    conn
}

fn add_client(conn: &Connection, name: &str, rate: &str) -> i64 {
    conn.execute(
        "INSERT INTO clients(company_name, rate_per_watt) VALUES (?1, ?2)",
        params![name, rate],
    )
    .unwrap();
    conn.last_insert_rowid()
}

fn add_completed_project(
    conn: &Connection,
    client_id: i64,
    panel_watt: i64,
    panel_qty: i64,
    completed_at: &str,
) -> i64 {
    conn.execute(
        "INSERT INTO projects(client_id, site, panel_watt, panel_quantity, status, completed_at)
         VALUES (?1, 'Site', ?2, ?3, 'completed', ?4)",
        params![client_id, panel_watt, panel_qty, completed_at],
    )
    .unwrap();
    conn.last_insert_rowid()
}

#[test]
fn empty_period_yields_all_zero_summary() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let s = summarize(&store, &Period::Month { year: 2024, month: 6 }).unwrap();
    assert_eq!(s.income.total, Decimal::ZERO);
    assert_eq!(s.expense.total, Decimal::ZERO);
    assert_eq!(s.profit, Decimal::ZERO);
    assert_eq!(s.projects.completed, 0);
    assert_eq!(s.projects.total_watt_installed, 0);
}

#[test]
fn invalid_month_is_rejected() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let err = summarize(&store, &Period::Month { year: 2024, month: 13 }).unwrap_err();
    assert!(matches!(err, CoreError::InvalidPeriod(_)));
}

#[test]
fn completed_project_and_labor_summary() {
    let conn = setup();
    // 5000 W at 0.5/W, one assignment worth 200
    let client = add_client(&conn, "Acme Farms", "0.5");
    let project = add_completed_project(&conn, client, 500, 10, "2024-02-20");
    conn.execute(
        "INSERT INTO staff(name, role, pay_type, pay_rate) VALUES ('Ana','installer','per_project','200')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO project_assignments(project_id, staff_id, role_in_project, calculated_pay)
         VALUES (?1, 1, 'installer', '200')",
        params![project],
    )
    .unwrap();

    let store = SqliteStore::new(&conn);
    let s = summarize(&store, &Period::Month { year: 2024, month: 2 }).unwrap();
    assert_eq!(s.income.project_income, Decimal::from(2500));
    assert_eq!(s.expense.labor_cost, Decimal::from(200));
    assert_eq!(s.profit, Decimal::from(2300));
    assert_eq!(s.projects.completed, 1);
    assert_eq!(s.projects.total_watt_installed, 5000);
}

#[test]
fn project_outside_period_is_not_counted() {
    let conn = setup();
    let client = add_client(&conn, "Acme Farms", "0.5");
    add_completed_project(&conn, client, 500, 10, "2024-03-01");

    let store = SqliteStore::new(&conn);
    let s = summarize(&store, &Period::Month { year: 2024, month: 2 }).unwrap();
    assert_eq!(s.income.project_income, Decimal::ZERO);

    // but a year summary picks it up
    let y = summarize(&store, &Period::Year { year: 2024 }).unwrap();
    assert_eq!(y.income.project_income, Decimal::from(2500));
}

#[test]
fn vehicle_categories_bucket_separately() {
    let conn = setup();
    for (cat, amt) in [
        ("fuel", "30.00"),
        ("vehicle_maintenance", "120.00"),
        ("rent", "800.00"),
    ] {
        conn.execute(
            "INSERT INTO finance_records(record_date, record_type, category, amount)
             VALUES ('2024-02-10', 'expense', ?1, ?2)",
            params![cat, amt],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO finance_records(record_date, record_type, category, amount)
         VALUES ('2024-02-11', 'income', 'other', '55.50')",
        [],
    )
    .unwrap();

    let store = SqliteStore::new(&conn);
    let s = summarize(&store, &Period::Month { year: 2024, month: 2 }).unwrap();
    assert_eq!(s.expense.vehicle_cost, "150.00".parse::<Decimal>().unwrap());
    assert_eq!(s.expense.other_expenses, "800.00".parse::<Decimal>().unwrap());
    assert_eq!(s.income.other_income, "55.50".parse::<Decimal>().unwrap());
    assert_eq!(s.profit, "-894.50".parse::<Decimal>().unwrap());
}

#[test]
fn cent_sums_stay_exact_over_many_records() {
    let conn = setup();
    {
        let mut stmt = conn
            .prepare(
                "INSERT INTO finance_records(record_date, record_type, category, amount)
                 VALUES ('2024-05-01', ?1, 'other', ?2)",
            )
            .unwrap();
        for _ in 0..10_000 {
            stmt.execute(params!["expense", "0.01"]).unwrap();
            stmt.execute(params!["income", "0.03"]).unwrap();
        }
    }

    let store = SqliteStore::new(&conn);
    let s = summarize(&store, &Period::Month { year: 2024, month: 5 }).unwrap();
    assert_eq!(s.expense.total, "100.00".parse::<Decimal>().unwrap());
    assert_eq!(s.income.total, "300.00".parse::<Decimal>().unwrap());
    assert_eq!(s.profit, s.income.total - s.expense.total);
    assert_eq!(s.profit, "200.00".parse::<Decimal>().unwrap());
}
