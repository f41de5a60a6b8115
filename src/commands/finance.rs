// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{RecordCategory, RecordType};
use crate::store::SqliteStore;
use crate::summary::{summarize, Period};
use crate::utils::{
    fmt_money, id_for_vehicle, maybe_print_json, parse_amount, parse_date, pretty_table,
};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let record_type: RecordType = sub.get_one::<String>("type").unwrap().parse()?;
    let category: RecordCategory = sub.get_one::<String>("category").unwrap().parse()?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let vehicle_id = sub
        .get_one::<String>("vehicle")
        .map(|p| id_for_vehicle(conn, &p.to_uppercase()))
        .transpose()?;
    let notes = sub.get_one::<String>("notes").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO finance_records(record_date, record_type, category, amount, vehicle_id, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            date.to_string(),
            record_type.as_str(),
            category.as_str(),
            amount.to_string(),
            vehicle_id,
            notes
        ],
    )?;
    println!("Recorded {} {} of {} on {}", category, record_type, amount, date);
    Ok(())
}

#[derive(Serialize)]
struct FinanceRow {
    id: i64,
    date: String,
    record_type: String,
    category: String,
    amount: String,
    recurring: bool,
    notes: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut sql = String::from(
        "SELECT id, record_date, record_type, category, amount, is_recurring, notes
         FROM finance_records WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(year) = sub.get_one::<i32>("year") {
        if let Some(month) = sub.get_one::<u32>("month") {
            sql.push_str(" AND substr(record_date,1,7)=?");
            params_vec.push(format!("{:04}-{:02}", year, month));
        } else {
            sql.push_str(" AND substr(record_date,1,4)=?");
            params_vec.push(format!("{:04}", year));
        }
    }
    sql.push_str(" ORDER BY record_date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(FinanceRow {
            id: r.get(0)?,
            date: r.get(1)?,
            record_type: r.get(2)?,
            category: r.get(3)?,
            amount: r.get(4)?,
            recurring: r.get(5)?,
            notes: r.get::<_, Option<String>>(6)?.unwrap_or_default(),
        });
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|f| {
                vec![
                    f.id.to_string(),
                    f.date,
                    f.record_type,
                    f.category,
                    f.amount,
                    if f.recurring { "yes".into() } else { "".into() },
                    f.notes,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Recurring", "Notes"],
                rows
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let is_recurring: Option<bool> = conn
        .query_row(
            "SELECT is_recurring FROM finance_records WHERE id=?1",
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    match is_recurring {
        None => anyhow::bail!("Finance record {} not found", id),
        Some(true) => anyhow::bail!(
            "Record {} was created by recurring processing and cannot be removed manually",
            id
        ),
        Some(false) => {
            conn.execute("DELETE FROM finance_records WHERE id=?1", params![id])?;
            println!("Removed finance record {}", id);
        }
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").unwrap();
    let period = match sub.get_one::<u32>("month") {
        Some(&month) => Period::Month { year, month },
        None => Period::Year { year },
    };

    let store = SqliteStore::new(conn);
    let s = summarize(&store, &period)?;

    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![
            vec!["Project income".into(), fmt_money(&s.income.project_income)],
            vec!["Other income".into(), fmt_money(&s.income.other_income)],
            vec!["Income total".into(), fmt_money(&s.income.total)],
            vec!["Labor cost".into(), fmt_money(&s.expense.labor_cost)],
            vec!["Vehicle cost".into(), fmt_money(&s.expense.vehicle_cost)],
            vec!["Other expenses".into(), fmt_money(&s.expense.other_expenses)],
            vec!["Expense total".into(), fmt_money(&s.expense.total)],
            vec!["Profit".into(), fmt_money(&s.profit)],
            vec!["Projects completed".into(), s.projects.completed.to_string()],
            vec![
                "Watt installed".into(),
                s.projects.total_watt_installed.to_string(),
            ],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}
