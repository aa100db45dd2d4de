// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod categorize;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod investments;
pub mod logging;
pub mod models;
pub mod settings;
pub mod store;
pub mod summary;
pub mod utils;

pub use error::{Error, Result};
