// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the StudyMatch engine.
//!
//! A single-writer `Database` (tokio-rusqlite) with embedded refinery
//! migrations, typed query modules, and a `SqliteStore` that implements
//! the store traits from `studymatch-core`.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod stores;

pub use database::Database;
pub use stores::SqliteStore;
