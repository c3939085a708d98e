//! End-to-end pipeline: PDF bytes in, processing result out.
//!
//! The steps run strictly in order: text extraction, address parsing, order
//! parsing, contact lookup/creation, invoice creation, send + payment. Any
//! failure short-circuits into a [`ProcessingResult::Failure`]; nothing is
//! rolled back on the accounting side.

use tracing::info;

use crate::error::Result;
use crate::extract::{parse_address, parse_order};
use crate::models::config::MarketbirdConfig;
use crate::models::order::{ParsedAddress, ParsedOrder, ProcessingResult};
use crate::moneybird::AccountingApi;
use crate::pdf::PdfExtractor;

/// Process one order PDF end to end.
///
/// Never returns an error: every failure is folded into the result payload
/// so callers can serialise it directly.
pub async fn process_order_pdf(
    bytes: &[u8],
    config: &MarketbirdConfig,
    api: &impl AccountingApi,
) -> ProcessingResult {
    match run(bytes, config, api).await {
        Ok(result) => result,
        Err(e) => ProcessingResult::failure(e.to_string()),
    }
}

async fn run(
    bytes: &[u8],
    config: &MarketbirdConfig,
    api: &impl AccountingApi,
) -> Result<ProcessingResult> {
    let text = PdfExtractor::extract_text_from_bytes(bytes, config.pdf.max_file_size)?;
    process_text(&text, api).await
}

/// Run the parsers and the three accounting calls over an extracted text
/// blob.
async fn process_text(text: &str, api: &impl AccountingApi) -> Result<ProcessingResult> {
    let address = parse_address(text)?;
    let order = parse_order(text);
    let total = order.total_amount();

    info!(
        "Parsed order {:?} for {}: total €{}",
        order.order_number,
        address.full_name(),
        total
    );

    let contact = api.find_or_create_contact(&address).await?;
    let invoice = api.create_invoice(&contact.id, &order).await?;
    api.mark_sent_and_paid(&invoice.id, &order, total).await?;

    Ok(ProcessingResult::success(
        address.full_name(),
        order.order_number.unwrap_or_default(),
        total,
        invoice.id,
        contact.id,
    ))
}

/// Parse-only variant: extract text and run both parsers without touching
/// the accounting service. Used by the dry-run path.
pub fn parse_order_pdf(
    bytes: &[u8],
    config: &MarketbirdConfig,
) -> Result<(ParsedAddress, ParsedOrder)> {
    let text = PdfExtractor::extract_text_from_bytes(bytes, config.pdf.max_file_size)?;
    let address = parse_address(&text)?;
    let order = parse_order(&text);
    Ok((address, order))
}
