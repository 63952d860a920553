//! Stocks and the in-memory stock database.

use crate::domain::trade::Trade;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockType {
    Common,
    Preferred,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub stock_type: Option<StockType>,
    #[serde(default)]
    pub last_dividend: Option<f64>,
    /// `None` means the stock pays no fixed dividend.
    #[serde(default)]
    pub fixed_dividend: Option<f64>,
    #[serde(default)]
    pub par_value: f64,
    /// Chronological; appended only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Trade>,
}

impl Stock {
    pub fn record(&mut self, trade: Trade) {
        self.records.push(trade);
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|t| t.price)
    }
}

/// Symbol → stock mapping, iterated in symbol order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    stocks: BTreeMap<String, Stock>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, stock: Stock) {
        self.stocks.insert(symbol.into(), stock);
    }

    pub fn get(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.get(symbol)
    }

    pub fn get_mut(&mut self, symbol: &str) -> Option<&mut Stock> {
        self.stocks.get_mut(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.stocks.contains_key(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.stocks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Every trade price across every stock, stock by stock.
    pub fn all_prices(&self) -> Vec<f64> {
        self.stocks.values().flat_map(Stock::prices).collect()
    }

    pub fn trade_count(&self) -> usize {
        self.stocks.values().map(|s| s.records.len()).sum()
    }
}

impl FromIterator<(String, Stock)> for Database {
    fn from_iter<I: IntoIterator<Item = (String, Stock)>>(iter: I) -> Self {
        Self {
            stocks: iter.into_iter().collect(),
        }
    }
}
