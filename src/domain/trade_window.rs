//! Trailing time window over a stock's trade history.

use crate::domain::trade::Trade;

pub const DEFAULT_WINDOW_SECONDS: f64 = 900.0;

/// Trades with `now - timestamp <= window_seconds`, in record order.
///
/// The boundary is inclusive: a trade exactly `window_seconds` old is kept.
pub fn last_trades(
    records: &[Trade],
    now: f64,
    window_seconds: f64,
) -> impl Iterator<Item = &Trade> + Clone {
    records
        .iter()
        .filter(move |t| now - t.timestamp <= window_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trade::Side;

    const NOW: f64 = 1_526_575_117.0;

    #[test]
    fn boundary_is_inclusive() {
        let records = vec![
            Trade::new(NOW - 900.0, 1, Side::Buy, 10.0),
            Trade::new(NOW - 901.0, 2, Side::Buy, 20.0),
            Trade::new(NOW, 3, Side::Sell, 30.0),
        ];
        let kept: Vec<_> = last_trades(&records, NOW, DEFAULT_WINDOW_SECONDS).collect();
        assert_eq!(kept, vec![&records[0], &records[2]]);
    }

    #[test]
    fn preserves_record_order() {
        let records: Vec<_> = (0..5)
            .map(|i| Trade::new(NOW - 10.0 * i as f64, 1, Side::Buy, i as f64))
            .collect();
        let prices: Vec<_> = last_trades(&records, NOW, 25.0).map(|t| t.price).collect();
        assert_eq!(prices, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn empty_records_yield_nothing() {
        assert_eq!(last_trades(&[], NOW, DEFAULT_WINDOW_SECONDS).count(), 0);
    }

    #[test]
    fn future_trades_are_kept() {
        let records = vec![Trade::new(NOW + 5.0, 1, Side::Buy, 1.0)];
        assert_eq!(last_trades(&records, NOW, DEFAULT_WINDOW_SECONDS).count(), 1);
    }

    #[test]
    fn iterator_is_restartable() {
        let records = vec![
            Trade::new(NOW - 1.0, 1, Side::Buy, 1.0),
            Trade::new(NOW - 2000.0, 1, Side::Buy, 2.0),
        ];
        let window = last_trades(&records, NOW, DEFAULT_WINDOW_SECONDS);
        assert_eq!(window.clone().count(), 1);
        assert_eq!(window.count(), 1);
    }
}
