//! Data models for parsed orders and pipeline configuration.

pub mod config;
pub mod order;

pub use config::MarketbirdConfig;
pub use order::{LineItem, ParsedAddress, ParsedOrder, ProcessingResult};
