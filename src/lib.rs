//! Trip Settlement Engine
//!
//! This crate turns the expenses and settlements recorded for a shared trip
//! into a short list of payments that clears every participant's debt. It
//! aggregates the ledger into directed balances, nets them per participant
//! and matches debtors to creditors greedily.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;
