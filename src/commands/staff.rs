// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::PayType;
use crate::utils::{maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let role = sub.get_one::<String>("role").unwrap();
            let pay_type: PayType = sub.get_one::<String>("pay-type").unwrap().parse()?;
            let rate = parse_amount(sub.get_one::<String>("rate").unwrap())?;
            conn.execute(
                "INSERT INTO staff(name, role, pay_type, pay_rate) VALUES (?1, ?2, ?3, ?4)",
                params![name, role, pay_type.as_str(), rate.to_string()],
            )?;
            println!("Added staff '{}' ({}, {} @ {})", name, role, pay_type, rate);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute("UPDATE staff SET is_active=0 WHERE name=?1", params![name])?;
            if n == 0 {
                anyhow::bail!("Staff '{}' not found", name);
            }
            println!("Deactivated staff '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct StaffRow {
    name: String,
    role: String,
    pay_type: String,
    pay_rate: String,
    active: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let all = sub.get_flag("all");
    let mut sql = String::from("SELECT name, role, pay_type, pay_rate, is_active FROM staff");
    if !all {
        sql.push_str(" WHERE is_active=1");
    }
    sql.push_str(" ORDER BY name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |r| {
        Ok(StaffRow {
            name: r.get(0)?,
            role: r.get(1)?,
            pay_type: r.get(2)?,
            pay_rate: r.get(3)?,
            active: r.get(4)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|s| {
                vec![
                    s.name,
                    s.role,
                    s.pay_type,
                    s.pay_rate,
                    if s.active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Role", "Pay type", "Rate", "Active"], rows)
        );
    }
    Ok(())
}
