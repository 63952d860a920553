//! Port traits between the shell and its adapters.

pub mod clock_port;
pub mod config_port;
pub mod database_port;
