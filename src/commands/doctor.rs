// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Recurring definitions whose marker precedes their start date
    let mut stmt = conn.prepare(
        "SELECT name FROM recurring_expenses
         WHERE last_processed_date IS NOT NULL AND last_processed_date < start_date",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let name: String = r.get(0)?;
        rows.push(vec!["recurring_marker_before_start".into(), name]);
    }

    // 2) Completed projects missing a completion date
    let mut stmt2 = conn.prepare(
        "SELECT id FROM projects WHERE status='completed' AND completed_at IS NULL",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["completed_without_date".into(), format!("project {}", id)]);
    }

    // 3) Assignments pointing at deactivated staff
    let mut stmt3 = conn.prepare(
        "SELECT a.project_id, s.name
         FROM project_assignments a JOIN staff s ON a.staff_id=s.id
         WHERE s.is_active=0",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let pid: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        rows.push(vec![
            "assignment_on_inactive_staff".into(),
            format!("project {} / {}", pid, name),
        ]);
    }

    // 4) Finance records referencing vehicles that no longer exist
    let mut stmt4 = conn.prepare(
        "SELECT f.id FROM finance_records f
         LEFT JOIN vehicles v ON f.vehicle_id=v.id
         WHERE f.vehicle_id IS NOT NULL AND v.id IS NULL",
    )?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["unknown_vehicle".into(), format!("record {}", id)]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
