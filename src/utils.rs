// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::models::{PayType, Project, ProjectStatus, Staff};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Non-negative decimal, for amounts and rates.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d < Decimal::ZERO {
        anyhow::bail!("Amount '{}' must not be negative", s);
    }
    Ok(d)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_client(conn: &Connection, company: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM clients WHERE company_name=?1")?;
    let id: i64 = stmt
        .query_row(params![company], |r| r.get(0))
        .with_context(|| format!("Client '{}' not found", company))?;
    Ok(id)
}

pub fn id_for_vehicle(conn: &Connection, plate: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM vehicles WHERE plate=?1")?;
    let id: i64 = stmt
        .query_row(params![plate], |r| r.get(0))
        .with_context(|| format!("Vehicle '{}' not found", plate))?;
    Ok(id)
}

pub fn staff_by_name(conn: &Connection, name: &str) -> Result<Staff> {
    let mut stmt = conn.prepare(
        "SELECT id, name, role, pay_type, pay_rate, is_active FROM staff WHERE name=?1",
    )?;
    let row = stmt
        .query_row(params![name], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, bool>(5)?,
            ))
        })
        .with_context(|| format!("Staff '{}' not found", name))?;
    let (id, name, role, pay_type_s, pay_rate_s, is_active) = row;
    Ok(Staff {
        id,
        name,
        role,
        pay_type: pay_type_s
            .parse::<PayType>()
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        pay_rate: parse_decimal(&pay_rate_s)?,
        is_active,
    })
}

pub fn project_by_id(conn: &Connection, id: i64) -> Result<Project> {
    let mut stmt = conn.prepare(
        "SELECT id, client_id, site, panel_watt, panel_quantity, inverter_model,
                inverter_quantity, status, installation_date, completed_at
         FROM projects WHERE id=?1",
    )?;
    let row = stmt
        .query_row(params![id], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, i64>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, i64>(3)?,
                r.get::<_, i64>(4)?,
                r.get::<_, Option<String>>(5)?,
                r.get::<_, i64>(6)?,
                r.get::<_, String>(7)?,
                r.get::<_, Option<NaiveDate>>(8)?,
                r.get::<_, Option<NaiveDate>>(9)?,
            ))
        })
        .with_context(|| format!("Project {} not found", id))?;
    let (id, client_id, site, panel_watt, panel_quantity, inverter_model, inverter_quantity, status_s, installation_date, completed_at) =
        row;
    Ok(Project {
        id,
        client_id,
        site,
        panel_watt,
        panel_quantity,
        inverter_model,
        inverter_quantity,
        status: status_s
            .parse::<ProjectStatus>()
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        installation_date,
        completed_at,
    })
}
