// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("finance", sub)) => export_finance(conn, sub),
        _ => Ok(()),
    }
}

fn export_finance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT f.record_date, f.record_type, f.category, f.amount,
                v.plate, f.is_recurring, f.notes
         FROM finance_records f
         LEFT JOIN vehicles v ON f.vehicle_id=v.id
         ORDER BY f.record_date, f.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, Option<String>>(4)?,
            r.get::<_, bool>(5)?,
            r.get::<_, Option<String>>(6)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date", "type", "category", "amount", "vehicle", "recurring", "notes",
            ])?;
            for row in rows {
                let (d, t, cat, amt, plate, rec, notes) = row?;
                wtr.write_record([
                    d,
                    t,
                    cat,
                    amt,
                    plate.unwrap_or_default(),
                    if rec { "1".into() } else { "0".into() },
                    notes.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, t, cat, amt, plate, rec, notes) = row?;
                items.push(json!({
                    "date": d, "type": t, "category": cat, "amount": amt,
                    "vehicle": plate, "recurring": rec, "notes": notes
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported finance records to {}", out);
    Ok(())
}
