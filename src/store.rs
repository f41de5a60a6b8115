// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::errors::StoreError;
use crate::models::{CompletedProject, FinanceRecord, ProjectAssignment, RecurringExpense};

/// Narrow persistence interface the bookkeeping core works against. The CLI
/// hands it a SQLite-backed implementation; tests may substitute their own.
pub trait FinanceStore {
    /// Projects whose completed_at falls within [from, to], revenue priced
    /// against the owning client's rate_per_watt.
    fn projects_completed_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CompletedProject>, StoreError>;

    /// Crew assignments on projects completed within [from, to].
    fn assignments_completed_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ProjectAssignment>, StoreError>;

    /// Manual and recurring-born finance records dated within [from, to].
    fn finance_records_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FinanceRecord>, StoreError>;

    /// Every recurring expense definition, active or not.
    fn recurring_expenses(&self) -> Result<Vec<RecurringExpense>, StoreError>;

    /// Materialize one expense record per due date and advance the
    /// definition's last_processed_date to the latest of them, atomically.
    /// A no-op when `dates` is empty.
    fn apply_occurrences(
        &mut self,
        def: &RecurringExpense,
        dates: &[NaiveDate],
    ) -> Result<(), StoreError>;
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

fn parse_amount(s: &str, what: &str) -> Result<Decimal, StoreError> {
    s.parse::<Decimal>()
        .map_err(|_| StoreError::new(format!("Invalid {} '{}'", what, s)))
}

impl FinanceStore for SqliteStore<'_> {
    fn projects_completed_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CompletedProject>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.panel_watt * p.panel_quantity, c.rate_per_watt
             FROM projects p JOIN clients c ON p.client_id = c.id
             WHERE p.status = 'completed'
               AND p.completed_at IS NOT NULL
               AND p.completed_at >= ?1 AND p.completed_at <= ?2
             ORDER BY p.completed_at, p.id",
        )?;
        let rows = stmt.query_map(params![from.to_string(), to.to_string()], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, i64>(1)?,
                r.get::<_, String>(2)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, total_watt, rate_s) = row?;
            let rate = parse_amount(&rate_s, "rate_per_watt")?;
            out.push(CompletedProject {
                id,
                total_watt,
                revenue: Decimal::from(total_watt) * rate,
            });
        }
        Ok(out)
    }

    fn assignments_completed_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ProjectAssignment>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.project_id, a.staff_id, a.role_in_project,
                    a.calculated_pay, a.paid_amount, a.is_notified
             FROM project_assignments a
             JOIN projects p ON a.project_id = p.id
             WHERE p.status = 'completed'
               AND p.completed_at IS NOT NULL
               AND p.completed_at >= ?1 AND p.completed_at <= ?2
             ORDER BY a.id",
        )?;
        let rows = stmt.query_map(params![from.to_string(), to.to_string()], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, i64>(1)?,
                r.get::<_, i64>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, String>(5)?,
                r.get::<_, bool>(6)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, project_id, staff_id, role_s, pay_s, paid_s, is_notified) = row?;
            out.push(ProjectAssignment {
                id,
                project_id,
                staff_id,
                role_in_project: role_s
                    .parse()
                    .map_err(|_| StoreError::new(format!("Unknown crew role '{}'", role_s)))?,
                calculated_pay: parse_amount(&pay_s, "calculated_pay")?,
                paid_amount: parse_amount(&paid_s, "paid_amount")?,
                is_notified,
            });
        }
        Ok(out)
    }

    fn finance_records_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FinanceRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, record_date, record_type, category, amount,
                    vehicle_id, is_recurring, notes
             FROM finance_records
             WHERE record_date >= ?1 AND record_date <= ?2
             ORDER BY record_date, id",
        )?;
        let rows = stmt.query_map(params![from.to_string(), to.to_string()], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, NaiveDate>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, Option<i64>>(5)?,
                r.get::<_, bool>(6)?,
                r.get::<_, Option<String>>(7)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, record_date, type_s, cat_s, amount_s, vehicle_id, is_recurring, notes) = row?;
            out.push(FinanceRecord {
                id,
                record_date,
                record_type: type_s
                    .parse()
                    .map_err(|_| StoreError::new(format!("Unknown record type '{}'", type_s)))?,
                category: cat_s
                    .parse()
                    .map_err(|_| StoreError::new(format!("Unknown category '{}'", cat_s)))?,
                amount: parse_amount(&amount_s, "amount")?,
                vehicle_id,
                is_recurring,
                notes,
            });
        }
        Ok(out)
    }

    fn recurring_expenses(&self) -> Result<Vec<RecurringExpense>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category, amount, frequency, is_active,
                    start_date, end_date, last_processed_date, notes
             FROM recurring_expenses ORDER BY id",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, bool>(5)?,
                r.get::<_, NaiveDate>(6)?,
                r.get::<_, Option<NaiveDate>>(7)?,
                r.get::<_, Option<NaiveDate>>(8)?,
                r.get::<_, Option<String>>(9)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, name, cat_s, amount_s, freq_s, is_active, start, end, last, notes) = row?;
            out.push(RecurringExpense {
                id,
                name,
                category: cat_s
                    .parse()
                    .map_err(|_| StoreError::new(format!("Unknown category '{}'", cat_s)))?,
                amount: parse_amount(&amount_s, "amount")?,
                frequency: freq_s
                    .parse()
                    .map_err(|_| StoreError::new(format!("Unknown frequency '{}'", freq_s)))?,
                is_active,
                start_date: start,
                end_date: end,
                last_processed_date: last,
                notes,
            });
        }
        Ok(out)
    }

    fn apply_occurrences(
        &mut self,
        def: &RecurringExpense,
        dates: &[NaiveDate],
    ) -> Result<(), StoreError> {
        let Some(latest) = dates.iter().max().copied() else {
            return Ok(());
        };
        // record inserts and the marker advance must land together
        let tx = self.conn.unchecked_transaction()?;
        for date in dates {
            tx.execute(
                "INSERT INTO finance_records(record_date, record_type, category, amount, is_recurring, notes)
                 VALUES (?1, 'expense', ?2, ?3, 1, ?4)",
                params![
                    date.to_string(),
                    def.category.as_str(),
                    def.amount.to_string(),
                    def.name
                ],
            )?;
        }
        tx.execute(
            "UPDATE recurring_expenses SET last_processed_date=?1 WHERE id=?2",
            params![latest.to_string(), def.id],
        )?;
        tx.commit()?;
        Ok(())
    }
}
