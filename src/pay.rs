// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::{PayType, Project, Staff};

/// What a crew member is owed for one project: per-panel rates scale with
/// the panel count, per-project rates are flat. Never negative for
/// non-negative inputs; mutates nothing.
pub fn calculate_pay(staff: &Staff, project: &Project) -> Result<Decimal, CoreError> {
    if staff.pay_rate < Decimal::ZERO {
        return Err(CoreError::InvalidInput(format!(
            "negative pay_rate {} for staff '{}'",
            staff.pay_rate, staff.name
        )));
    }
    if project.panel_quantity < 0 {
        return Err(CoreError::InvalidInput(format!(
            "negative panel_quantity {} on project {}",
            project.panel_quantity, project.id
        )));
    }
    Ok(match staff.pay_type {
        PayType::PerPanel => Decimal::from(project.panel_quantity) * staff.pay_rate,
        PayType::PerProject => staff.pay_rate,
    })
}
