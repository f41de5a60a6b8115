// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Frequency, RecordCategory};
use crate::recurring::{process_recurring, OutcomeStatus};
use crate::store::SqliteStore;
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("enable", sub)) => set_active(conn, sub, true)?,
        Some(("disable", sub)) => set_active(conn, sub, false)?,
        Some(("process", sub)) => process(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let category: RecordCategory = sub.get_one::<String>("category").unwrap().parse()?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let frequency: Frequency = sub.get_one::<String>("frequency").unwrap().parse()?;
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = sub
        .get_one::<String>("end")
        .map(|s| parse_date(s))
        .transpose()?;
    if let Some(end) = end {
        if end < start {
            anyhow::bail!("end date {} is before start date {}", end, start);
        }
    }
    let notes = sub.get_one::<String>("notes").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO recurring_expenses(name, category, amount, frequency, start_date, end_date, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            name,
            category.as_str(),
            amount.to_string(),
            frequency.as_str(),
            start.to_string(),
            end.map(|d| d.to_string()),
            notes
        ],
    )?;
    println!("Added {} recurring expense '{}' of {}", frequency, name, amount);
    Ok(())
}

#[derive(Serialize)]
struct RecurringRow {
    name: String,
    category: String,
    amount: String,
    frequency: String,
    active: bool,
    start: String,
    end: String,
    last_processed: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT name, category, amount, frequency, is_active, start_date, end_date, last_processed_date
         FROM recurring_expenses ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(RecurringRow {
            name: r.get(0)?,
            category: r.get(1)?,
            amount: r.get(2)?,
            frequency: r.get(3)?,
            active: r.get(4)?,
            start: r.get(5)?,
            end: r.get::<_, Option<String>>(6)?.unwrap_or_default(),
            last_processed: r.get::<_, Option<String>>(7)?.unwrap_or_default(),
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|d| {
                vec![
                    d.name,
                    d.category,
                    d.amount,
                    d.frequency,
                    if d.active { "yes".into() } else { "no".into() },
                    d.start,
                    d.end,
                    d.last_processed,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Name", "Category", "Amount", "Freq", "Active", "Start", "End", "Last processed"],
                rows
            )
        );
    }
    Ok(())
}

fn set_active(conn: &Connection, sub: &clap::ArgMatches, active: bool) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let n = conn.execute(
        "UPDATE recurring_expenses SET is_active=?1 WHERE name=?2",
        params![active, name],
    )?;
    if n == 0 {
        anyhow::bail!("Recurring expense '{}' not found", name);
    }
    println!(
        "{} recurring expense '{}'",
        if active { "Enabled" } else { "Disabled" },
        name
    );
    Ok(())
}

fn process(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = match sub.get_one::<String>("today") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };

    let mut store = SqliteStore::new(conn);
    let report = process_recurring(&mut store, today)?;

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let rows: Vec<Vec<String>> = report
            .outcomes
            .iter()
            .map(|o| {
                let status = match &o.status {
                    OutcomeStatus::Created(n) => format!("created {}", n),
                    OutcomeStatus::Skipped(reason) => {
                        format!("skipped ({:?})", reason).to_lowercase()
                    }
                    OutcomeStatus::Failed(msg) => format!("failed: {}", msg),
                };
                vec![o.name.clone(), status]
            })
            .collect();
        println!("{}", pretty_table(&["Definition", "Outcome"], rows));
        println!(
            "Processed as of {}: {} record(s) created, {} definition(s) skipped",
            today, report.created, report.skipped
        );
    }
    Ok(())
}
