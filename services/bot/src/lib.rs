//! Stockpile bot service
//!
//! Handles LINE webhook turns (registration flow, inventory listing,
//! consume/delete) and runs the scheduled expiry check that pushes
//! notifications for items 30 days, 7 days, and 0 days from expiry.

pub mod actions;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod line;
pub mod messages;
pub mod notifications;
pub mod registration;
pub mod routes;
pub mod scheduler;
pub mod signature;
pub mod state;
pub mod validation;
