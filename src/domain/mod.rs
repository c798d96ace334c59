// Domain types and value objects
pub mod daily_bar;
pub mod prediction;
pub mod ticker;

// Re-export commonly used types
pub use daily_bar::DailyBar;
pub use prediction::Prediction;
pub use ticker::Ticker;
