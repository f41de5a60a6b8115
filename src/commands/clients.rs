// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let rate = parse_amount(sub.get_one::<String>("rate").unwrap())?;
            if rate == Decimal::ZERO {
                anyhow::bail!("rate_per_watt must be greater than zero");
            }
            let contact = sub.get_one::<String>("contact").map(|s| s.to_string());
            conn.execute(
                "INSERT INTO clients(company_name, rate_per_watt, contact) VALUES (?1, ?2, ?3)",
                params![name, rate.to_string(), contact],
            )?;
            println!("Added client '{}' at {}/W", name, rate);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            // soft delete keeps project history intact
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute(
                "UPDATE clients SET is_active=0 WHERE company_name=?1",
                params![name],
            )?;
            if n == 0 {
                anyhow::bail!("Client '{}' not found", name);
            }
            println!("Deactivated client '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct ClientRow {
    company: String,
    rate_per_watt: String,
    contact: String,
    active: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let all = sub.get_flag("all");
    let mut sql = String::from(
        "SELECT company_name, rate_per_watt, contact, is_active FROM clients",
    );
    if !all {
        sql.push_str(" WHERE is_active=1");
    }
    sql.push_str(" ORDER BY company_name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |r| {
        Ok(ClientRow {
            company: r.get(0)?,
            rate_per_watt: r.get(1)?,
            contact: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            active: r.get(3)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|c| {
                vec![
                    c.company,
                    c.rate_per_watt,
                    c.contact,
                    if c.active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Company", "Rate/W", "Contact", "Active"], rows)
        );
    }
    Ok(())
}
