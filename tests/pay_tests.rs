// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use solarledger::errors::CoreError;
use solarledger::models::{PayType, Project, ProjectStatus, Staff};
use solarledger::pay::calculate_pay;

fn staff(pay_type: PayType, rate: &str) -> Staff {
    Staff {
        id: 1,
        name: "Ana".into(),
        role: "installer".into(),
        pay_type,
        pay_rate: rate.parse().unwrap(),
        is_active: true,
    }
}

fn project(panel_quantity: i64) -> Project {
    Project {
        id: 7,
        client_id: 1,
        site: "Roof A".into(),
        panel_watt: 450,
        panel_quantity,
        inverter_model: None,
        inverter_quantity: 1,
        status: ProjectStatus::InProgress,
        installation_date: None,
        completed_at: None,
    }
}

#[test]
fn per_panel_scales_linearly_with_quantity() {
    let s = staff(PayType::PerPanel, "12.50");
    let n = calculate_pay(&s, &project(8)).unwrap();
    let two_n = calculate_pay(&s, &project(16)).unwrap();
    assert_eq!(n, "100.00".parse::<Decimal>().unwrap());
    assert_eq!(two_n, n * Decimal::from(2));
}

#[test]
fn per_project_ignores_panel_quantity() {
    let s = staff(PayType::PerProject, "350");
    let a = calculate_pay(&s, &project(1)).unwrap();
    let b = calculate_pay(&s, &project(500)).unwrap();
    assert_eq!(a, Decimal::from(350));
    assert_eq!(a, b);
}

#[test]
fn zero_panels_pay_nothing_per_panel() {
    let s = staff(PayType::PerPanel, "12.50");
    assert_eq!(calculate_pay(&s, &project(0)).unwrap(), Decimal::ZERO);
}

#[test]
fn negative_inputs_are_rejected() {
    let s = staff(PayType::PerPanel, "-1");
    let err = calculate_pay(&s, &project(8)).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));

    let s = staff(PayType::PerPanel, "12.50");
    let err = calculate_pay(&s, &project(-3)).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
}
