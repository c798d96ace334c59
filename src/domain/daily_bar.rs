// One daily bar as reported by a market data provider.
// Only the close is used downstream, but providers hand back gaps (holidays,
// halted sessions, nulls in the payload) so the price stays optional here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub open_timestamp_ms: i64,
    pub close_price: Option<f64>,
}

impl DailyBar {
    pub fn new(open_timestamp_ms: i64, close_price: Option<f64>) -> Self {
        DailyBar {
            open_timestamp_ms,
            close_price,
        }
    }

    // Close price if present and usable (NaN/inf count as missing)
    pub fn valid_close(&self) -> Option<f64> {
        self.close_price.filter(|price| price.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_close_filters_missing_and_non_finite() {
        assert_eq!(DailyBar::new(0, Some(10.5)).valid_close(), Some(10.5));
        assert_eq!(DailyBar::new(0, None).valid_close(), None);
        assert_eq!(DailyBar::new(0, Some(f64::NAN)).valid_close(), None);
        assert_eq!(DailyBar::new(0, Some(f64::INFINITY)).valid_close(), None);
    }
}
