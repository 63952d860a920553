//! CSV trade import adapter.
//!
//! Expected header: `symbol,timestamp,quantity,side,price`.

use crate::domain::error::StocksError;
use crate::domain::trade::{Side, Trade};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TradeCsvRow {
    symbol: String,
    timestamp: f64,
    quantity: u64,
    side: Side,
    price: f64,
}

/// A trade tagged with the stock it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTrade {
    pub symbol: String,
    pub trade: Trade,
}

pub fn read_trades(path: &Path) -> Result<Vec<SymbolTrade>, StocksError> {
    let content = fs::read_to_string(path).map_err(|e| StocksError::DataFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_trades(&content, &path.display().to_string())
}

pub fn parse_trades(content: &str, origin: &str) -> Result<Vec<SymbolTrade>, StocksError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut trades = Vec::new();

    for (line, result) in rdr.deserialize::<TradeCsvRow>().enumerate() {
        let row = result.map_err(|e| StocksError::DataParse {
            path: origin.to_string(),
            reason: format!("row {}: {}", line + 1, e),
        })?;
        if row.quantity == 0 {
            return Err(StocksError::DataParse {
                path: origin.to_string(),
                reason: format!("row {}: quantity must be positive", line + 1),
            });
        }
        trades.push(SymbolTrade {
            symbol: row.symbol,
            trade: Trade::new(row.timestamp, row.quantity, row.side, row.price),
        });
    }

    Ok(trades)
}
