// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let category = sub.get_one::<String>("category").unwrap();
            let date = sub
                .get_one::<String>("date")
                .map(|s| parse_date(s))
                .transpose()?;
            let price = sub
                .get_one::<String>("price")
                .map(|s| parse_amount(s))
                .transpose()?;
            let notes = sub.get_one::<String>("notes").map(|s| s.to_string());
            conn.execute(
                "INSERT INTO assets(name, category, purchase_date, purchase_price, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    name,
                    category,
                    date.map(|d| d.to_string()),
                    price.map(|p| p.to_string()),
                    notes
                ],
            )?;
            println!("Added asset '{}' ({})", name, category);
        }
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct AssetRow {
    name: String,
    category: String,
    purchased: String,
    price: String,
    notes: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT name, category, purchase_date, purchase_price, notes FROM assets ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(AssetRow {
            name: r.get(0)?,
            category: r.get(1)?,
            purchased: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            price: r.get::<_, Option<String>>(3)?.unwrap_or_default(),
            notes: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|a| vec![a.name, a.category, a.purchased, a.price, a.notes])
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Category", "Purchased", "Price", "Notes"], rows)
        );
    }
    Ok(())
}
