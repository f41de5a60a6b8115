// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let plate = sub.get_one::<String>("plate").unwrap().to_uppercase();
            let model = sub.get_one::<String>("model").map(|s| s.to_string());
            conn.execute(
                "INSERT INTO vehicles(name, plate, model) VALUES (?1, ?2, ?3)",
                params![name, plate, model],
            )?;
            println!("Added vehicle '{}' ({})", name, plate);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let plate = sub.get_one::<String>("plate").unwrap().to_uppercase();
            let n = conn.execute(
                "UPDATE vehicles SET is_active=0 WHERE plate=?1",
                params![plate],
            )?;
            if n == 0 {
                anyhow::bail!("Vehicle '{}' not found", plate);
            }
            println!("Deactivated vehicle '{}'", plate);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct VehicleRow {
    name: String,
    plate: String,
    model: String,
    active: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt =
        conn.prepare("SELECT name, plate, model, is_active FROM vehicles ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok(VehicleRow {
            name: r.get(0)?,
            plate: r.get(1)?,
            model: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
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
            .map(|v| {
                vec![
                    v.name,
                    v.plate,
                    v.model,
                    if v.active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Plate", "Model", "Active"], rows)
        );
    }
    Ok(())
}
