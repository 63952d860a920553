//! Static registry of the formulas reachable from the shell.

use crate::domain::formulas::{self, FormulaResult};
use crate::domain::stock::{Database, Stock};
use crate::domain::trade::Trade;

/// What a formula needs from the session, and the function that computes it.
#[derive(Clone, Copy)]
pub enum Evaluator {
    /// Selected stock plus a price argument.
    Priced(fn(&Stock, f64) -> FormulaResult),
    /// Selected stock's records, `now` and the window length in seconds.
    Windowed(fn(&[Trade], f64, f64) -> FormulaResult),
    /// The whole database.
    Market(fn(&Database) -> FormulaResult),
}

impl Evaluator {
    pub fn needs_price(&self) -> bool {
        matches!(self, Evaluator::Priced(_))
    }
}

#[derive(Clone, Copy)]
pub struct FormulaSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub summary: &'static str,
    pub evaluator: Evaluator,
}

impl std::fmt::Debug for FormulaSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormulaSpec")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .finish()
    }
}

// Names are unique within `FORMULAS`.
impl PartialEq for FormulaSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

pub const FORMULAS: &[FormulaSpec] = &[
    FormulaSpec {
        name: "dividend_yield",
        aliases: &[],
        usage: "calculate dividend_yield <price>",
        summary: "last dividend / price, for the selected stock",
        evaluator: Evaluator::Priced(formulas::calculate_dividend_yield),
    },
    FormulaSpec {
        name: "pe_ratio",
        aliases: &[],
        usage: "calculate pe_ratio <price>",
        summary: "price / fixed dividend, for the selected stock",
        evaluator: Evaluator::Priced(formulas::calculate_pe_ratio),
    },
    FormulaSpec {
        name: "volume_weighted_stock_price",
        aliases: &["volum_weighted_stock_price"],
        usage: "calculate volume_weighted_stock_price",
        summary: "quantity-weighted average price of the selected stock's recent trades",
        evaluator: Evaluator::Windowed(formulas::calculate_volume_weighted_stock_price_at),
    },
    FormulaSpec {
        name: "gbce_all_share_index",
        aliases: &[],
        usage: "calculate gbce_all_share_index",
        summary: "share index over every trade price of every stock",
        evaluator: Evaluator::Market(formulas::calculate_gbce_all_share_index),
    },
];

pub fn lookup(name: &str) -> Option<&'static FormulaSpec> {
    FORMULAS
        .iter()
        .find(|f| f.name == name || f.aliases.contains(&name))
}

pub fn names() -> impl Iterator<Item = &'static str> {
    FORMULAS.iter().map(|f| f.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves_to_itself() {
        for name in names() {
            assert_eq!(lookup(name).map(|f| f.name), Some(name));
        }
    }

    #[test]
    fn legacy_alias_resolves() {
        let spec = lookup("volum_weighted_stock_price").unwrap();
        assert_eq!(spec.name, "volume_weighted_stock_price");
    }

    #[test]
    fn unknown_name() {
        assert!(lookup("sharpe_ratio").is_none());
        assert!(lookup("calculate_pe_ratio").is_none());
    }

    #[test]
    fn argument_requirements() {
        assert!(lookup("dividend_yield").unwrap().evaluator.needs_price());
        assert!(lookup("pe_ratio").unwrap().evaluator.needs_price());
        assert!(!lookup("volume_weighted_stock_price").unwrap().evaluator.needs_price());
        assert!(!lookup("gbce_all_share_index").unwrap().evaluator.needs_price());
    }

    #[test]
    fn registry_dispatches_to_engine() {
        let stock = Stock {
            last_dividend: Some(8.0),
            ..Stock::default()
        };
        match lookup("dividend_yield").unwrap().evaluator {
            Evaluator::Priced(f) => assert_eq!(f(&stock, 60.0), Ok(0.13333333333333333)),
            _ => panic!("dividend_yield should take a price"),
        }
        match lookup("gbce_all_share_index").unwrap().evaluator {
            Evaluator::Market(f) => assert!(f(&Database::new()).is_err()),
            _ => panic!("gbce_all_share_index should take the database"),
        }
    }
}
