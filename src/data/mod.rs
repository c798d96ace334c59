// Market data acquisition
pub mod binance;
pub mod error;
pub mod source;
pub mod window;
pub mod yahoo;

// Re-export commonly used types
pub use error::MarketDataError;
pub use source::{DailyCloseSource, MarketSource};
pub use window::PriceWindow;
