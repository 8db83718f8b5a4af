//! Core domain layer for Meter Monitor.
//!
//! Defines the meter-reading data model, tariff plan configuration, the
//! cost calculator, the error taxonomy, CLI settings, and display
//! formatting helpers shared by the data and UI layers.

pub mod costs;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod tariff;
