//! Core domain types and the formula engine.

pub mod trade;
pub mod stock;
pub mod trade_window;
pub mod formulas;
pub mod registry;
pub mod error;
