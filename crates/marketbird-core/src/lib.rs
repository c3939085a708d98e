//! Core library for marketplace order PDF import.
//!
//! This crate provides:
//! - PDF text extraction (validation via lopdf, text via pdf-extract)
//! - Field extraction from the order document (shipping address, order
//!   number, date, line items, delivery cost)
//! - Country name to ISO-3166 alpha-2 resolution
//! - A Moneybird client that books each order as a sent and paid invoice

pub mod error;
pub mod extract;
pub mod models;
pub mod moneybird;
pub mod pdf;
pub mod process;

pub use error::{ApiError, ExtractionError, MarketbirdError, PdfError, Result};
pub use extract::{parse_address, parse_order, resolve_country_code};
pub use models::config::MarketbirdConfig;
pub use models::order::{LineItem, ParsedAddress, ParsedOrder, ProcessingResult};
pub use moneybird::{AccountingApi, Contact, MoneybirdClient, SalesInvoice};
pub use pdf::{PdfExtractor, PdfSource};
pub use process::{parse_order_pdf, process_order_pdf};
