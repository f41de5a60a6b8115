// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.solarledger", "Solarledger", "solarledger"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("solarledger.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS clients(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_name TEXT NOT NULL UNIQUE,
        rate_per_watt TEXT NOT NULL,
        contact TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS staff(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        role TEXT NOT NULL,
        pay_type TEXT NOT NULL CHECK(pay_type IN ('per_panel','per_project')),
        pay_rate TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS projects(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        client_id INTEGER NOT NULL,
        site TEXT NOT NULL,
        panel_watt INTEGER NOT NULL,
        panel_quantity INTEGER NOT NULL,
        inverter_model TEXT,
        inverter_quantity INTEGER NOT NULL DEFAULT 0,
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK(status IN ('pending','in_progress','completed')),
        installation_date TEXT,
        completed_at TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(client_id) REFERENCES clients(id)
    );
    CREATE INDEX IF NOT EXISTS idx_projects_completed_at ON projects(completed_at);

    CREATE TABLE IF NOT EXISTS project_assignments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_id INTEGER NOT NULL,
        staff_id INTEGER NOT NULL,
        role_in_project TEXT NOT NULL
            CHECK(role_in_project IN ('leader','installer','electrician')),
        calculated_pay TEXT NOT NULL,
        paid_amount TEXT NOT NULL DEFAULT '0',
        is_notified INTEGER NOT NULL DEFAULT 0,
        UNIQUE(project_id, staff_id),
        FOREIGN KEY(project_id) REFERENCES projects(id) ON DELETE CASCADE,
        FOREIGN KEY(staff_id) REFERENCES staff(id)
    );

    -- attachment metadata only; the files themselves live outside the DB
    CREATE TABLE IF NOT EXISTS project_files(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_id INTEGER NOT NULL,
        path TEXT NOT NULL,
        label TEXT,
        added_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(project_id) REFERENCES projects(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS vehicles(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        plate TEXT NOT NULL UNIQUE,
        model TEXT,
        is_active INTEGER NOT NULL DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS assets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        category TEXT NOT NULL,
        purchase_date TEXT,
        purchase_price TEXT,
        notes TEXT
    );

    CREATE TABLE IF NOT EXISTS finance_records(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        record_date TEXT NOT NULL,
        record_type TEXT NOT NULL CHECK(record_type IN ('income','expense')),
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        vehicle_id INTEGER,
        is_recurring INTEGER NOT NULL DEFAULT 0,
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(vehicle_id) REFERENCES vehicles(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_finance_records_date ON finance_records(record_date);

    CREATE TABLE IF NOT EXISTS recurring_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        frequency TEXT NOT NULL CHECK(frequency IN ('weekly','monthly','yearly')),
        is_active INTEGER NOT NULL DEFAULT 1,
        start_date TEXT NOT NULL,
        end_date TEXT,
        last_processed_date TEXT,
        notes TEXT
    );
    "#,
    )?;
    Ok(())
}
