use serde::{Deserialize, Serialize};

use crate::domain::Ticker;

/// Next-day closing price estimate for one ticker. Serialized verbatim as the
/// `/predict` success body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prediction {
    pub ticker: Ticker,
    pub predicted_price: f64,
}
