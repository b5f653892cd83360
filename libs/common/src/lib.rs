//! Common library for the stockpile bot
//!
//! This crate provides the functionality shared between the webhook turn
//! handler and the scheduled expiry check: the stock item data model,
//! date rules, the item store and session store abstractions with their
//! Postgres/Redis and in-memory implementations, and connection plumbing.

pub mod cache;
pub mod database;
pub mod dates;
pub mod error;
pub mod item_store;
pub mod models;
pub mod session;
