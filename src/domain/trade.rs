//! Trade records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(format!("expected buy or sell, got '{other}'")),
        }
    }
}

/// A single executed trade.
///
/// On disk a trade is the ordered tuple `[timestamp, quantity, side, price]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TradeRow", into = "TradeRow")]
pub struct Trade {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub quantity: u64,
    pub side: Side,
    pub price: f64,
}

type TradeRow = (f64, u64, Side, f64);

impl From<TradeRow> for Trade {
    fn from((timestamp, quantity, side, price): TradeRow) -> Self {
        Self {
            timestamp,
            quantity,
            side,
            price,
        }
    }
}

impl From<Trade> for TradeRow {
    fn from(trade: Trade) -> Self {
        (trade.timestamp, trade.quantity, trade.side, trade.price)
    }
}

impl Trade {
    pub fn new(timestamp: f64, quantity: u64, side: Side, price: f64) -> Self {
        Self {
            timestamp,
            quantity,
            side,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parses_lowercase_only() {
        assert_eq!("buy".parse::<Side>(), Ok(Side::Buy));
        assert_eq!("sell".parse::<Side>(), Ok(Side::Sell));
        assert!("BUY".parse::<Side>().is_err());
        assert!("hold".parse::<Side>().is_err());
    }

    #[test]
    fn side_display_matches_parse() {
        for side in [Side::Buy, Side::Sell] {
            assert_eq!(side.to_string().parse::<Side>(), Ok(side));
        }
    }

    #[test]
    fn serializes_as_four_element_sequence() {
        let trade = Trade::new(1526575101.5, 2, Side::Buy, 200.0);
        let yaml = serde_yaml::to_string(&trade).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let seq = value.as_sequence().unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq[1].as_u64(), Some(2));
        assert_eq!(seq[2].as_str(), Some("buy"));
    }

    #[test]
    fn deserializes_from_flow_sequence() {
        let trade: Trade = serde_yaml::from_str("[1526575117.03415, 5, sell, 100.0]").unwrap();
        assert_eq!(trade, Trade::new(1526575117.03415, 5, Side::Sell, 100.0));
    }
}
