// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure inside the persistence layer, surfaced as-is to callers.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(msg: impl Into<String>) -> Self {
        StoreError(msg.into())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError(e.to_string())
    }
}

/// Errors raised by the bookkeeping core. Per-definition failures during
/// recurring processing are reported in the result list instead, never here.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),
}
