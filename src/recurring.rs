// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::errors::CoreError;
use crate::models::{Frequency, RecurringExpense};
use crate::store::FinanceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Inactive,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Records materialized for this run; zero means the definition was
    /// already up to date.
    Created(usize),
    Skipped(SkipReason),
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct DefinitionOutcome {
    pub id: i64,
    pub name: String,
    pub status: OutcomeStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessReport {
    pub created: usize,
    pub skipped: usize,
    pub outcomes: Vec<DefinitionOutcome>,
}

/// The nth occurrence of a schedule anchored at `start`. Monthly and yearly
/// steps keep the anchor's day-of-month, clamped into shorter months
/// (Jan 31 -> Feb 29/28).
fn nth_occurrence(start: NaiveDate, frequency: Frequency, n: u32) -> NaiveDate {
    match frequency {
        Frequency::Weekly => start + Duration::days(7 * i64::from(n)),
        Frequency::Monthly => add_months_clamped(start, n),
        Frequency::Yearly => add_months_clamped(start, 12 * n),
    }
}

fn add_months_clamped(start: NaiveDate, months: u32) -> NaiveDate {
    let total = start.year() * 12 + start.month0() as i32 + months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let mut day = start.day();
    loop {
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, day) {
            return d;
        }
        day -= 1;
    }
}

/// Occurrence dates of `def` that are due at `today`: strictly after the
/// last processed marker (when present) and not in the future. A start date
/// beyond `today` yields nothing.
pub fn due_occurrences(def: &RecurringExpense, today: NaiveDate) -> Vec<NaiveDate> {
    let mut due = Vec::new();
    for n in 0.. {
        let date = nth_occurrence(def.start_date, def.frequency, n);
        if date > today {
            break;
        }
        if let Some(last) = def.last_processed_date {
            if date <= last {
                continue;
            }
        }
        due.push(date);
    }
    due
}

/// Walk every recurring definition and materialize whatever is due at
/// `today`. Inactive and ended definitions are skipped without catch-up;
/// one definition failing to persist never aborts the rest. Running twice
/// with the same `today` creates nothing on the second pass.
pub fn process_recurring<S: FinanceStore + ?Sized>(
    store: &mut S,
    today: NaiveDate,
) -> Result<ProcessReport, CoreError> {
    let defs = store.recurring_expenses()?;
    let mut report = ProcessReport::default();

    for def in defs {
        let status = if !def.is_active {
            report.skipped += 1;
            OutcomeStatus::Skipped(SkipReason::Inactive)
        } else if def.end_date.is_some_and(|end| end < today) {
            report.skipped += 1;
            OutcomeStatus::Skipped(SkipReason::Ended)
        } else {
            let due = due_occurrences(&def, today);
            match store.apply_occurrences(&def, &due) {
                Ok(()) => {
                    report.created += due.len();
                    OutcomeStatus::Created(due.len())
                }
                Err(e) => OutcomeStatus::Failed(e.to_string()),
            }
        };
        report.outcomes.push(DefinitionOutcome {
            id: def.id,
            name: def.name,
            status,
        });
    }
    Ok(report)
}
