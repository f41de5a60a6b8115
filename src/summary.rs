// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::CoreError;
use crate::models::RecordType;
use crate::store::FinanceStore;

/// Reporting window for a financial summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month { year: i32, month: u32 },
    Year { year: i32 },
}

impl Period {
    /// First and last calendar day covered by the period.
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate), CoreError> {
        match *self {
            Period::Month { year, month } => {
                let from = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
                    CoreError::InvalidPeriod(format!("no such month {}-{:02}", year, month))
                })?;
                let to = last_day_of_month(year, month)
                    .ok_or_else(|| CoreError::InvalidPeriod(format!("no such month {}", month)))?;
                Ok((from, to))
            }
            Period::Year { year } => {
                let from = NaiveDate::from_ymd_opt(year, 1, 1)
                    .ok_or_else(|| CoreError::InvalidPeriod(format!("no such year {}", year)))?;
                let to = NaiveDate::from_ymd_opt(year, 12, 31)
                    .ok_or_else(|| CoreError::InvalidPeriod(format!("no such year {}", year)))?;
                Ok((from, to))
            }
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    Some(NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()?)
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IncomeBreakdown {
    pub total: Decimal,
    pub project_income: Decimal,
    pub other_income: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExpenseBreakdown {
    pub total: Decimal,
    pub labor_cost: Decimal,
    pub vehicle_cost: Decimal,
    pub other_expenses: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProjectStats {
    pub completed: usize,
    pub total_watt_installed: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub income: IncomeBreakdown,
    pub expense: ExpenseBreakdown,
    pub profit: Decimal,
    pub projects: ProjectStats,
}

/// Compute the income/expense/profit summary for one period. Read-only; a
/// period with no matching rows yields an all-zero summary. Project revenue
/// is recognized on completed_at.
pub fn summarize<S: FinanceStore + ?Sized>(store: &S, period: &Period) -> Result<Summary, CoreError> {
    let (from, to) = period.date_range()?;

    let projects = store.projects_completed_between(from, to)?;
    let assignments = store.assignments_completed_between(from, to)?;
    let records = store.finance_records_between(from, to)?;

    let mut project_income = Decimal::ZERO;
    let mut total_watt_installed = 0i64;
    for p in &projects {
        project_income += p.revenue;
        total_watt_installed += p.total_watt;
    }

    let mut labor_cost = Decimal::ZERO;
    for a in &assignments {
        labor_cost += a.calculated_pay;
    }

    let mut other_income = Decimal::ZERO;
    let mut vehicle_cost = Decimal::ZERO;
    let mut other_expenses = Decimal::ZERO;
    for r in &records {
        match r.record_type {
            RecordType::Income => other_income += r.amount,
            RecordType::Expense => {
                if r.category.is_vehicle_cost() {
                    vehicle_cost += r.amount;
                } else {
                    other_expenses += r.amount;
                }
            }
        }
    }

    let income_total = project_income + other_income;
    let expense_total = labor_cost + vehicle_cost + other_expenses;

    Ok(Summary {
        profit: income_total - expense_total,
        income: IncomeBreakdown {
            total: income_total,
            project_income,
            other_income,
        },
        expense: ExpenseBreakdown {
            total: expense_total,
            labor_cost,
            vehicle_cost,
            other_expenses,
        },
        projects: ProjectStats {
            completed: projects.len(),
            total_watt_installed,
        },
    })
}
