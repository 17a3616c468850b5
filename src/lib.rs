//! Balance service library.
//!
//! Exposes the internal modules for the server binary and integration tests.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
