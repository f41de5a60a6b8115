// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CrewRole, ProjectStatus};
use crate::pay::calculate_pay;
use crate::utils::{
    id_for_client, maybe_print_json, parse_date, pretty_table, project_by_id, staff_by_name,
};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("assign", sub)) => assign(conn, sub)?,
        Some(("crew", sub)) => crew(conn, sub)?,
        Some(("start", sub)) => start(conn, sub)?,
        Some(("complete", sub)) => complete(conn, sub)?,
        Some(("file", sub)) => files(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let client = sub.get_one::<String>("client").unwrap();
    let site = sub.get_one::<String>("site").unwrap();
    let panel_watt = *sub.get_one::<i64>("panel-watt").unwrap();
    let panel_qty = *sub.get_one::<i64>("panel-qty").unwrap();
    if panel_watt <= 0 || panel_qty <= 0 {
        anyhow::bail!("panel watt and quantity must be positive");
    }
    let inverter_model = sub.get_one::<String>("inverter-model").map(|s| s.to_string());
    let inverter_qty = sub.get_one::<i64>("inverter-qty").copied().unwrap_or(0);
    let client_id = id_for_client(conn, client)?;
    conn.execute(
        "INSERT INTO projects(client_id, site, panel_watt, panel_quantity, inverter_model, inverter_quantity)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![client_id, site, panel_watt, panel_qty, inverter_model, inverter_qty],
    )?;
    let id = conn.last_insert_rowid();
    println!(
        "Added project {} at '{}' for {} ({} x {} W = {} W)",
        id,
        site,
        client,
        panel_qty,
        panel_watt,
        panel_watt * panel_qty
    );
    Ok(())
}

#[derive(Serialize)]
struct ProjectRow {
    id: i64,
    client: String,
    site: String,
    total_watt: i64,
    status: String,
    installed: String,
    completed: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut sql = String::from(
        "SELECT p.id, c.company_name, p.site, p.panel_watt * p.panel_quantity,
                p.status, p.installation_date, p.completed_at
         FROM projects p JOIN clients c ON p.client_id = c.id",
    );
    let status = sub.get_one::<String>("status");
    if let Some(s) = status {
        // validate before splicing into the query
        let st: ProjectStatus = s.parse()?;
        sql.push_str(&format!(" WHERE p.status='{}'", st.as_str()));
    }
    sql.push_str(" ORDER BY p.id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |r| {
        Ok(ProjectRow {
            id: r.get(0)?,
            client: r.get(1)?,
            site: r.get(2)?,
            total_watt: r.get(3)?,
            status: r.get(4)?,
            installed: r.get::<_, Option<String>>(5)?.unwrap_or_default(),
            completed: r.get::<_, Option<String>>(6)?.unwrap_or_default(),
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|p| {
                vec![
                    p.id.to_string(),
                    p.client,
                    p.site,
                    p.total_watt.to_string(),
                    p.status,
                    p.installed,
                    p.completed,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Client", "Site", "Watt", "Status", "Installed", "Completed"],
                rows
            )
        );
    }
    Ok(())
}

fn assign(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let project_id = *sub.get_one::<i64>("project").unwrap();
    let staff_name = sub.get_one::<String>("staff").unwrap();
    let role: CrewRole = sub.get_one::<String>("role").unwrap().parse()?;

    let staff = staff_by_name(conn, staff_name)?;
    if !staff.is_active {
        anyhow::bail!("Staff '{}' is deactivated", staff_name);
    }
    let project = project_by_id(conn, project_id)?;
    let pay = calculate_pay(&staff, &project)?;

    conn.execute(
        "INSERT INTO project_assignments(project_id, staff_id, role_in_project, calculated_pay)
         VALUES (?1, ?2, ?3, ?4)",
        params![project.id, staff.id, role.as_str(), pay.to_string()],
    )?;
    println!(
        "Assigned '{}' to project {} as {} (pay: {})",
        staff.name, project.id, role, pay
    );
    Ok(())
}

#[derive(Serialize)]
struct CrewRow {
    staff: String,
    role: String,
    calculated_pay: String,
    paid_amount: String,
}

fn crew(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let project_id = *sub.get_one::<i64>("project").unwrap();
    let mut stmt = conn.prepare(
        "SELECT s.name, a.role_in_project, a.calculated_pay, a.paid_amount
         FROM project_assignments a JOIN staff s ON a.staff_id = s.id
         WHERE a.project_id = ?1 ORDER BY a.id",
    )?;
    let rows = stmt.query_map(params![project_id], |r| {
        Ok(CrewRow {
            staff: r.get(0)?,
            role: r.get(1)?,
            calculated_pay: r.get(2)?,
            paid_amount: r.get(3)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|c| vec![c.staff, c.role, c.calculated_pay, c.paid_amount])
            .collect();
        println!("{}", pretty_table(&["Staff", "Role", "Pay", "Paid"], rows));
    }
    Ok(())
}

fn start(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let n = conn.execute(
        "UPDATE projects SET status='in_progress', installation_date=?1 WHERE id=?2",
        params![date.to_string(), id],
    )?;
    if n == 0 {
        anyhow::bail!("Project {} not found", id);
    }
    println!("Project {} started on {}", id, date);
    Ok(())
}

fn complete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let n = conn.execute(
        "UPDATE projects SET status='completed', completed_at=?1 WHERE id=?2",
        params![date.to_string(), id],
    )?;
    if n == 0 {
        anyhow::bail!("Project {} not found", id);
    }
    println!("Project {} completed on {}", id, date);
    Ok(())
}

fn files(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let project_id = *sub.get_one::<i64>("project").unwrap();
            let path = sub.get_one::<String>("path").unwrap();
            let label = sub.get_one::<String>("label").map(|s| s.to_string());
            project_by_id(conn, project_id)?;
            conn.execute(
                "INSERT INTO project_files(project_id, path, label) VALUES (?1, ?2, ?3)",
                params![project_id, path, label],
            )?;
            println!("Attached '{}' to project {}", path, project_id);
        }
        Some(("list", sub)) => {
            let project_id = *sub.get_one::<i64>("project").unwrap();
            let mut stmt = conn.prepare(
                "SELECT path, label, added_at FROM project_files WHERE project_id=?1 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![project_id], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, Option<String>>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (path, label, added) = row?;
                data.push(vec![path, label.unwrap_or_default(), added]);
            }
            println!("{}", pretty_table(&["Path", "Label", "Added"], data));
        }
        _ => {}
    }
    Ok(())
}
