// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

macro_rules! closed_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(CoreError::InvalidInput(format!(
                        "unknown {} '{}'",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum!(RecordType {
    Income => "income",
    Expense => "expense",
});

closed_enum!(RecordCategory {
    Fuel => "fuel",
    VehicleMaintenance => "vehicle_maintenance",
    Materials => "materials",
    Equipment => "equipment",
    Rent => "rent",
    Utilities => "utilities",
    Insurance => "insurance",
    Subscription => "subscription",
    Salary => "salary",
    ProjectPayment => "project_payment",
    Other => "other",
});

impl RecordCategory {
    /// Categories rolled into the vehicle_cost bucket of a summary.
    pub fn is_vehicle_cost(&self) -> bool {
        matches!(self, Self::Fuel | Self::VehicleMaintenance)
    }
}

closed_enum!(Frequency {
    Weekly => "weekly",
    Monthly => "monthly",
    Yearly => "yearly",
});

closed_enum!(PayType {
    PerPanel => "per_panel",
    PerProject => "per_project",
});

closed_enum!(ProjectStatus {
    Pending => "pending",
    InProgress => "in_progress",
    Completed => "completed",
});

closed_enum!(CrewRole {
    Leader => "leader",
    Installer => "installer",
    Electrician => "electrician",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub company_name: String,
    pub rate_per_watt: Decimal,
    pub contact: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub pay_type: PayType,
    pub pay_rate: Decimal,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub client_id: i64,
    pub site: String,
    pub panel_watt: i64,
    pub panel_quantity: i64,
    pub inverter_model: Option<String>,
    pub inverter_quantity: i64,
    pub status: ProjectStatus,
    pub installation_date: Option<NaiveDate>,
    pub completed_at: Option<NaiveDate>,
}

impl Project {
    pub fn total_watt(&self) -> i64 {
        self.panel_watt * self.panel_quantity
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAssignment {
    pub id: i64,
    pub project_id: i64,
    pub staff_id: i64,
    pub role_in_project: CrewRole,
    pub calculated_pay: Decimal,
    pub paid_amount: Decimal,
    pub is_notified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub plate: String,
    pub model: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceRecord {
    pub id: i64,
    pub record_date: NaiveDate,
    pub record_type: RecordType,
    pub category: RecordCategory,
    pub amount: Decimal,
    pub vehicle_id: Option<i64>,
    pub is_recurring: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: i64,
    pub name: String,
    pub category: RecordCategory,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub is_active: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub last_processed_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// A completed project as the aggregation engine sees it: revenue already
/// priced against the owning client's rate_per_watt.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedProject {
    pub id: i64,
    pub total_watt: i64,
    pub revenue: Decimal,
}
