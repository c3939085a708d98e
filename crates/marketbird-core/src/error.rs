//! Error types for the marketbird-core library.

use thiserror::Error;

/// Main error type for the marketbird library.
#[derive(Error, Debug)]
pub enum MarketbirdError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Order/address extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Accounting service error.
    #[error("accounting service error: {0}")]
    Api(#[from] ApiError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing. These are fatal: an unreadable
/// document cannot yield any partial result.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The input exceeds the configured maximum size.
    #[error("PDF is too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
}

/// Errors related to address/order field extraction.
///
/// Only the address section is load-bearing: order details (date format,
/// delivery cost, line items) degrade to raw or omitted values instead of
/// failing.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The mandatory "Deliver to" marker is absent.
    #[error("could not find 'Deliver to' section in document text")]
    MissingAddressSection,

    /// Fewer than the required lines follow the "Deliver to" marker.
    #[error("address section is truncated: line {missing} after the marker does not exist")]
    TruncatedAddress { missing: usize },
}

/// Errors from the downstream accounting service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The response body did not have the documented shape.
    #[error("unexpected response from {operation}: {detail}")]
    UnexpectedResponse {
        operation: &'static str,
        detail: String,
    },
}

/// Result type for the marketbird library.
pub type Result<T> = std::result::Result<T, MarketbirdError>;
