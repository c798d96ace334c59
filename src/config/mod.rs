//! Configuration module for the next-close service.

pub mod binance;
pub mod model;
pub mod prediction;
pub mod server;
pub mod yahoo;

mod debug; // Private: callers go through crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use binance::BINANCE;
pub use model::MODEL;
pub use prediction::PREDICTION;
pub use server::SERVER;
pub use yahoo::YAHOO;
