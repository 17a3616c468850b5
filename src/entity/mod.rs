//! SeaORM entity definitions for the PostgreSQL database.

pub mod account;
