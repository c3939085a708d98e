//! Moneybird accounting API integration.
//!
//! The pipeline only depends on the [`AccountingApi`] trait; the concrete
//! [`MoneybirdClient`] is one implementation. Tests substitute a recording
//! mock to verify sequencing without any network.

mod client;
pub mod types;

pub use client::MoneybirdClient;
pub use types::{Contact, SalesInvoice};

use rust_decimal::Decimal;

use crate::error::ApiError;
use crate::models::order::{ParsedAddress, ParsedOrder};

/// Result type for accounting API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// The three operations the pipeline consumes from the accounting service.
///
/// Calls are awaited strictly one after another; implementations need no
/// internal state beyond the request in flight.
pub trait AccountingApi {
    /// Look up a contact by the derived customer id, creating it when absent.
    fn find_or_create_contact(
        &self,
        address: &ParsedAddress,
    ) -> impl Future<Output = Result<Contact>>;

    /// Create a sales invoice for the contact: one line per parsed product
    /// plus an optional shipping line.
    fn create_invoice(
        &self,
        contact_id: &str,
        order: &ParsedOrder,
    ) -> impl Future<Output = Result<SalesInvoice>>;

    /// Mark the invoice as sent and record a payment covering `total`.
    fn mark_sent_and_paid(
        &self,
        invoice_id: &str,
        order: &ParsedOrder,
        total: Decimal,
    ) -> impl Future<Output = Result<()>>;
}
