//! Order detail extraction: order number, date, line items, delivery cost.
//!
//! Everything in this module is best-effort. Unlike the address block, a
//! missing or malformed order field degrades to a raw value or an omitted
//! field; it never fails the run.
//!
//! The line-item logic is anchored on the item-count banner (e.g. "2 items"),
//! then the first "SKU:" line within a short window, then a quantity/price
//! line around it. It recovers at most one line item and infers the quantity
//! from a document-wide "2 items" check rather than a per-item count. That
//! limitation is deliberate: the behaviour for true multi-item orders is
//! unverified against real documents, so the known heuristic is kept as-is.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::str::FromStr;
use tracing::debug;

use super::cursor::LineCursor;
use crate::models::order::{LineItem, ParsedOrder};

/// Marker stripped off the first line to obtain the order number.
const ORDER_NUMBER_MARKER: &str = "Order #";
/// Marker line preceding the raw date line.
const ORDER_DATE_MARKER: &str = "Order date";
/// Marker anchoring the quantity/price line.
const SKU_MARKER: &str = "SKU:";
/// Separator between quantity context and unit price on the price line.
const PRICE_SEPARATOR: &str = " x €";
/// Marker line carrying the shipping cost.
const DELIVERY_MARKER: &str = "Delivery total";

/// How far past the item-count banner the SKU line is searched for.
const SKU_SCAN_LINES: usize = 10;
/// Lines before/after the SKU line searched for the price line.
const PRICE_WINDOW: usize = 2;
/// Lines before the SKU line contributing to the product name.
const NAME_LINES: usize = 3;

/// Source date format, e.g. "21 Jun, 2025".
const SOURCE_DATE_FORMAT: &str = "%d %b, %Y";

lazy_static! {
    /// Trailing item-count banner merged into a name line ("... 2 items").
    static ref BANNER_SUFFIX: Regex = Regex::new(r"\s*\d+\s+items?$").unwrap();
    /// Lone digit left behind after stripping a merged banner.
    static ref TRAILING_DIGIT: Regex = Regex::new(r"\s\d$").unwrap();
}

/// Parse order details out of the full text blob. Never fails.
pub fn parse_order(text: &str) -> ParsedOrder {
    let cursor = LineCursor::new(text);

    let order_number = extract_order_number(&cursor);
    let invoice_date = extract_invoice_date(&cursor);
    let line_items = extract_line_items(&cursor, text);
    let delivery_cost = extract_delivery_cost(&cursor);

    debug!(
        "Parsed order: number={:?}, date={:?}, {} item(s), delivery={:?}",
        order_number,
        invoice_date,
        line_items.len(),
        delivery_cost
    );

    ParsedOrder {
        order_number,
        invoice_date,
        line_items,
        delivery_cost,
    }
}

/// The order number lives on the very first line, behind "Order #".
fn extract_order_number(cursor: &LineCursor<'_>) -> Option<String> {
    let first = cursor.get(0)?;
    if first.contains(ORDER_NUMBER_MARKER) {
        Some(first.replace(ORDER_NUMBER_MARKER, "").trim().to_string())
    } else {
        None
    }
}

/// The raw date is the line immediately after the "Order date" marker.
///
/// A parseable date is normalised to `YYYY-MM-DD`; anything else is kept
/// verbatim rather than dropped.
fn extract_invoice_date(cursor: &LineCursor<'_>) -> Option<String> {
    let marker = cursor.find(ORDER_DATE_MARKER)?;
    let raw = cursor.get_trimmed(marker + 1)?;
    Some(normalize_order_date(raw))
}

/// Normalise "21 Jun, 2025" to "2025-06-21", falling back to the input.
pub fn normalize_order_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, SOURCE_DATE_FORMAT) {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Single-item heuristic extraction. An empty result is not an error.
fn extract_line_items(cursor: &LineCursor<'_>, text: &str) -> Vec<LineItem> {
    let mut items = Vec::new();

    // Anchor: the item-count banner ("1 item" / "2 items").
    let Some(anchor) = cursor.find_from(0, |line| {
        line.contains(" item") && line.chars().any(|c| c.is_ascii_digit())
    }) else {
        return items;
    };

    // First SKU line within the scan window after the anchor.
    let sku_end = (anchor + SKU_SCAN_LINES).min(cursor.len());
    let Some(sku_idx) =
        cursor.find_from(anchor, |line| line.contains(SKU_MARKER)).filter(|&i| i < sku_end)
    else {
        return items;
    };

    // Quantity/price line in the window around the SKU line. Only the first
    // candidate is attempted; a failed parse yields no item.
    for check_idx in cursor.window(sku_idx, PRICE_WINDOW, PRICE_WINDOW) {
        let check_line = match cursor.get_trimmed(check_idx) {
            Some(line) => line,
            None => continue,
        };
        if !check_line.contains(PRICE_SEPARATOR) {
            continue;
        }

        let name = reassemble_product_name(cursor, sku_idx);

        if let Some(unit_price) = parse_unit_price(check_line) {
            // The quantity is inferred from the document-wide banner, not
            // from the matched line.
            let quantity = if text.contains("2 items") { 2 } else { 1 };
            items.push(LineItem {
                name,
                quantity,
                unit_price,
            });
        }
        break;
    }

    items
}

/// Rebuild the product name from the non-empty lines just before the SKU
/// line, skipping carrier/tracking noise and stripping merged banner text.
fn reassemble_product_name(cursor: &LineCursor<'_>, sku_idx: usize) -> String {
    let start = sku_idx.saturating_sub(NAME_LINES);
    let mut parts: Vec<String> = Vec::new();

    for j in start..sku_idx {
        let Some(line) = cursor.get_trimmed(j) else {
            continue;
        };
        if line.is_empty()
            || line.contains("via PostNL")
            || line.contains("Tracking")
            || line.contains(SKU_MARKER)
        {
            continue;
        }
        let cleaned = strip_item_banner(line);
        if !cleaned.is_empty() {
            parts.push(cleaned);
        }
    }

    parts.join(" ")
}

/// Strip a trailing item-count banner ("... 2 items") and the lone digit a
/// merged layout sometimes leaves in front of it.
///
/// The lone-digit pass only runs when a banner was actually removed; a name
/// that simply ends in a digit keeps it.
fn strip_item_banner(line: &str) -> String {
    match BANNER_SUFFIX.replace(line, "") {
        Cow::Owned(stripped) => TRAILING_DIGIT
            .replace(stripped.trim_end(), "")
            .trim()
            .to_string(),
        Cow::Borrowed(_) => line.trim().to_string(),
    }
}

/// Parse the unit price from a quantity/price line such as
/// "SKU: 123 x €11.95".
fn parse_unit_price(line: &str) -> Option<Decimal> {
    let mut split = line.splitn(2, PRICE_SEPARATOR);
    let _before = split.next()?;
    let after = split.next()?;
    Decimal::from_str(after.trim()).ok()
}

/// Delivery cost: the decimal after the first "€" on the "Delivery total"
/// line. Absent marker or unparseable value simply omits the field.
fn extract_delivery_cost(cursor: &LineCursor<'_>) -> Option<Decimal> {
    let idx = cursor.find(DELIVERY_MARKER)?;
    let line = cursor.get(idx)?;
    let after_euro = line.split('€').nth(1)?;
    Decimal::from_str(after_euro.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
Order # 3663257XXX
Buyer: anna_dv (anna@example.com)
Order date
21 Jun, 2025
Deliver to
anna de Vries
Keizersgracht 1
1015CJ Amsterdam
Netherlands
2 items
Handmade Wooden Spoon
Dispatched via PostNL
SKU: 123 x €11.95
Delivery total €4.00
";

    #[test]
    fn test_order_number_from_first_line() {
        let order = parse_order("Order # 12345\nrest");
        assert_eq!(order.order_number, Some("12345".to_string()));
    }

    #[test]
    fn test_order_number_absent_without_marker() {
        let order = parse_order("Invoice 12345\nOrder # 99 on a later line");
        assert_eq!(order.order_number, None);
    }

    #[test]
    fn test_date_normalised() {
        assert_eq!(normalize_order_date("21 Jun, 2025"), "2025-06-21");
        assert_eq!(normalize_order_date("1 Jan, 2024"), "2024-01-01");
    }

    #[test]
    fn test_date_fallback_keeps_raw_text() {
        assert_eq!(normalize_order_date("not a date"), "not a date");
    }

    #[test]
    fn test_full_sample_single_item() {
        let order = parse_order(SAMPLE);
        assert_eq!(order.order_number, Some("3663257XXX".to_string()));
        assert_eq!(order.invoice_date, Some("2025-06-21".to_string()));
        assert_eq!(order.line_items.len(), 1);

        let item = &order.line_items[0];
        assert_eq!(item.name, "Handmade Wooden Spoon");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_price, Decimal::from_str("11.95").unwrap());

        assert_eq!(order.delivery_cost, Some(Decimal::from_str("4.00").unwrap()));
        assert_eq!(order.total_amount(), Decimal::from_str("27.90").unwrap());
    }

    #[test]
    fn test_quantity_defaults_to_one_without_banner() {
        let text = "\
Order # 1
1 item
Ceramic Mug
SKU: 9 x €8.50
";
        let order = parse_order(text);
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items[0].quantity, 1);
    }

    #[test]
    fn test_no_anchor_yields_empty_items() {
        let order = parse_order("Order # 1\nno product section here");
        assert!(order.line_items.is_empty());
    }

    #[test]
    fn test_sku_outside_scan_window_yields_empty_items() {
        let mut text = String::from("2 items\n");
        for _ in 0..12 {
            text.push_str("filler line\n");
        }
        text.push_str("SKU: 1 x €2.00\n");
        let order = parse_order(&text);
        assert!(order.line_items.is_empty());
    }

    #[test]
    fn test_sku_without_price_line_yields_empty_items() {
        let text = "2 items\nProduct Name\nSKU: 123\nno price nearby";
        let order = parse_order(text);
        assert!(order.line_items.is_empty());
    }

    #[test]
    fn test_name_skips_carrier_and_tracking_lines() {
        let text = "\
2 items
Handmade Wooden Spoon
Dispatched via PostNL
Tracking: 3STEST
SKU: 123 x €11.95
";
        let order = parse_order(text);
        assert_eq!(order.line_items[0].name, "Handmade Wooden Spoon");
    }

    #[test]
    fn test_name_strips_merged_banner_and_lone_digit() {
        assert_eq!(strip_item_banner("Wooden Spoon 2 items"), "Wooden Spoon");
        assert_eq!(strip_item_banner("Wooden Spoon 2 2 items"), "Wooden Spoon");
        assert_eq!(strip_item_banner("Wooden Spoon 1 item"), "Wooden Spoon");
        assert_eq!(strip_item_banner("Wooden Spoon"), "Wooden Spoon");
    }

    #[test]
    fn test_name_keeps_trailing_digit_without_banner() {
        assert_eq!(strip_item_banner("Blue Mug Set 6"), "Blue Mug Set 6");

        let text = "2 items\nBlue Mug Set 6\nSKU: 123 x €11.95";
        let order = parse_order(text);
        assert_eq!(order.line_items[0].name, "Blue Mug Set 6");
    }

    #[test]
    fn test_delivery_cost_parse_failure_is_omitted() {
        let order = parse_order("Delivery total €free");
        assert_eq!(order.delivery_cost, None);
    }

    #[test]
    fn test_delivery_cost_absent_marker_is_omitted() {
        let order = parse_order("no totals here");
        assert_eq!(order.delivery_cost, None);
    }
}
