// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod db;
pub mod errors;
pub mod models;
pub mod pay;
pub mod recurring;
pub mod store;
pub mod summary;
pub mod utils;
pub mod commands;
