//! YAML stock database adapter.
//!
//! File layout: a mapping of symbol to stock attributes, each stock holding
//! an optional `records` list of `[timestamp, quantity, side, price]` rows.

use crate::domain::error::StocksError;
use crate::domain::stock::{Database, Stock};
use crate::ports::database_port::DatabasePort;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlAdapter;

impl YamlAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, content: &str, origin: &str) -> Result<Database, StocksError> {
        // An empty document is an empty database, not an error.
        if content.trim().is_empty() {
            return Ok(Database::new());
        }
        serde_yaml::from_str(content).map_err(|e| StocksError::DataParse {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }
}

impl DatabasePort for YamlAdapter {
    fn load(&self, path: &Path) -> Result<Database, StocksError> {
        let content = fs::read_to_string(path).map_err(|e| StocksError::DataFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let database = self.parse(&content, &path.display().to_string())?;
        tracing::debug!(
            path = %path.display(),
            stocks = database.len(),
            trades = database.trade_count(),
            "parsed stock database"
        );
        Ok(database)
    }

    fn dump_database(&self, database: &Database) -> Result<String, StocksError> {
        serde_yaml::to_string(database).map_err(|e| StocksError::DataDump {
            reason: e.to_string(),
        })
    }

    fn dump_stock(&self, stock: &Stock) -> Result<String, StocksError> {
        serde_yaml::to_string(stock).map_err(|e| StocksError::DataDump {
            reason: e.to_string(),
        })
    }
}
