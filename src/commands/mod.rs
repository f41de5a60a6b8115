// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod assets;
pub mod clients;
pub mod doctor;
pub mod exporter;
pub mod finance;
pub mod projects;
pub mod recurring;
pub mod staff;
pub mod vehicles;
