//! stockscli: simulated stock trade recorder and GBCE formula calculator.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], the interactive session in
//! [`shell`] and process start-up in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod shell;
pub mod cli;
