// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection};
use solarledger::{cli, commands};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    solarledger::db::init_schema(&mut conn).unwrap();
    conn
}

fn dispatch(conn: &Connection, argv: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("finance", sub)) => commands::finance::handle(conn, sub),
        Some(("client", sub)) => commands::clients::handle(conn, sub),
        Some(("project", sub)) => commands::projects::handle(conn, sub),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn manual_record_can_be_removed() {
    let conn = setup();
    conn.execute(
        "INSERT INTO finance_records(record_date, record_type, category, amount)
         VALUES ('2024-03-01', 'expense', 'materials', '75.00')",
        [],
    )
    .unwrap();
    dispatch(&conn, &["solarledger", "finance", "rm", "1"]).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM finance_records", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn recurring_born_record_refuses_manual_removal() {
    let conn = setup();
    conn.execute(
        "INSERT INTO finance_records(record_date, record_type, category, amount, is_recurring)
         VALUES ('2024-03-01', 'expense', 'subscription', '50', 1)",
        [],
    )
    .unwrap();
    let err = dispatch(&conn, &["solarledger", "finance", "rm", "1"]).unwrap_err();
    assert!(err.to_string().contains("cannot be removed"));
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM finance_records", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 1);
}

#[test]
fn unknown_category_is_rejected_at_the_boundary() {
    let conn = setup();
    let err = dispatch(
        &conn,
        &[
            "solarledger", "finance", "add", "--date", "2024-03-01", "--type", "expense",
            "--category", "snacks", "--amount", "5",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("snacks"));
}

#[test]
fn deactivating_a_client_keeps_its_projects() {
    let conn = setup();
    conn.execute(
        "INSERT INTO clients(company_name, rate_per_watt) VALUES ('Acme Farms', '0.5')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO projects(client_id, site, panel_watt, panel_quantity) VALUES (1, 'Barn', 450, 20)",
        [],
    )
    .unwrap();

    dispatch(&conn, &["solarledger", "client", "rm", "Acme Farms"]).unwrap();

    let active: bool = conn
        .query_row(
            "SELECT is_active FROM clients WHERE company_name='Acme Farms'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(!active);
    let projects: i64 = conn
        .query_row("SELECT COUNT(*) FROM projects", [], |r| r.get(0))
        .unwrap();
    assert_eq!(projects, 1);
}

#[test]
fn assigning_staff_computes_pay_from_panel_count() {
    let conn = setup();
    conn.execute(
        "INSERT INTO clients(company_name, rate_per_watt) VALUES ('Acme Farms', '0.5')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO projects(client_id, site, panel_watt, panel_quantity) VALUES (1, 'Barn', 450, 20)",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO staff(name, role, pay_type, pay_rate) VALUES ('Ana', 'installer', 'per_panel', '12.50')",
        [],
    )
    .unwrap();

    dispatch(
        &conn,
        &[
            "solarledger", "project", "assign", "--project", "1", "--staff", "Ana", "--role",
            "installer",
        ],
    )
    .unwrap();

    let pay: String = conn
        .query_row(
            "SELECT calculated_pay FROM project_assignments WHERE project_id=1",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(pay, "250.00");
}
