//! Terminal UI layer for Meter Monitor.
//!
//! Provides themes, the readings and monthly tables, the annual cost
//! comparison view, usage trend sparklines, and the tabbed application
//! event loop built on top of [`ratatui`].

pub mod app;
pub mod cost_view;
pub mod table_view;
pub mod themes;
pub mod trends_view;

pub use meter_core as core;
