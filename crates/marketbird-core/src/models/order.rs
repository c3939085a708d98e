//! Value objects produced by the extraction layer.
//!
//! Everything here is immutable after construction and lives only for the
//! duration of one PDF run; there is no persistence layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shipping address and recipient recovered from the "Deliver to" block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    /// Recipient first name. Non-empty whenever parsing succeeds.
    pub first_name: String,

    /// Recipient last name (empty if the name line had a single token).
    pub last_name: String,

    /// Company name. The source layout never carries one; defaults to empty.
    #[serde(default)]
    pub company_name: String,

    /// First address line, trimmed.
    pub address_line1: String,

    /// Postal code (first token of the postal-code/city line).
    pub postal_code: String,

    /// City (remainder of the postal-code/city line).
    pub city: String,

    /// ISO-3166 alpha-2 code, always exactly two uppercase letters.
    pub country_code: String,

    /// Buyer email when one appears in the document header.
    #[serde(default)]
    pub email: String,
}

impl ParsedAddress {
    /// Derived customer identifier used to search the accounting service.
    pub fn customer_id(&self) -> String {
        format!("{}-{}-{}", self.first_name, self.last_name, self.postal_code)
    }

    /// Recipient display name ("First Last").
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A single purchased product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name reassembled from the lines preceding the SKU line.
    pub name: String,

    /// Quantity. Always positive; inferred from the order-level item banner.
    pub quantity: u32,

    /// Unit price in euro.
    pub unit_price: Decimal,
}

impl LineItem {
    /// Line total: quantity x unit price.
    pub fn total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Order details recovered from the document body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOrder {
    /// Marketplace order number, when the first line carries the marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    /// Invoice date as `YYYY-MM-DD`, or the raw source text when the date
    /// line does not parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,

    /// Purchased products. The extraction heuristic recovers at most one.
    pub line_items: Vec<LineItem>,

    /// Shipping cost from the "Delivery total" line, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_cost: Option<Decimal>,
}

impl ParsedOrder {
    /// Grand total: sum of line totals plus delivery cost (0 if absent).
    pub fn total_amount(&self) -> Decimal {
        let items: Decimal = self.line_items.iter().map(LineItem::total).sum();
        items + self.delivery_cost.unwrap_or(Decimal::ZERO)
    }
}

/// Terminal output of one processing run.
///
/// Serialises to the flat JSON payload the front end consumes:
/// `{"success": true, "contact_name": ..., ...}` or
/// `{"success": false, "error": ...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProcessingResult {
    Success {
        success: bool,
        contact_name: String,
        order_number: String,
        total_amount: Decimal,
        invoice_id: String,
        contact_id: String,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl ProcessingResult {
    pub fn success(
        contact_name: String,
        order_number: String,
        total_amount: Decimal,
        invoice_id: String,
        contact_id: String,
    ) -> Self {
        Self::Success {
            success: true,
            contact_name,
            order_number,
            total_amount,
            invoice_id,
            contact_id,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            success: false,
            error: error.into(),
        }
    }

    /// Whether the run completed end to end.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_customer_id() {
        let address = ParsedAddress {
            first_name: "Anna".to_string(),
            last_name: "de Vries".to_string(),
            company_name: String::new(),
            address_line1: "Keizersgracht 1".to_string(),
            postal_code: "1015 CJ".to_string(),
            city: "Amsterdam".to_string(),
            country_code: "NL".to_string(),
            email: String::new(),
        };
        // postal_code here is only the first token in practice; the format
        // concatenates whatever the parser produced.
        assert_eq!(address.customer_id(), "Anna-de Vries-1015 CJ");
    }

    #[test]
    fn test_total_amount_with_delivery() {
        let order = ParsedOrder {
            order_number: Some("12345".to_string()),
            invoice_date: Some("2025-06-21".to_string()),
            line_items: vec![LineItem {
                name: "Wooden spoon".to_string(),
                quantity: 2,
                unit_price: Decimal::from_str("11.95").unwrap(),
            }],
            delivery_cost: Some(Decimal::from_str("4.00").unwrap()),
        };
        assert_eq!(order.total_amount(), Decimal::from_str("27.90").unwrap());
    }

    #[test]
    fn test_total_amount_without_delivery() {
        let order = ParsedOrder {
            line_items: vec![LineItem {
                name: "Mug".to_string(),
                quantity: 1,
                unit_price: Decimal::from_str("8.50").unwrap(),
            }],
            ..Default::default()
        };
        assert_eq!(order.total_amount(), Decimal::from_str("8.50").unwrap());
    }

    #[test]
    fn test_processing_result_json_shape() {
        let ok = ProcessingResult::success(
            "Anna de Vries".to_string(),
            "12345".to_string(),
            Decimal::from_str("27.90").unwrap(),
            "900".to_string(),
            "800".to_string(),
        );
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(true));
        assert_eq!(json["contact_name"], "Anna de Vries");
        assert_eq!(json["total_amount"], "27.90");

        let err = ProcessingResult::failure("Failed to create contact");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(false));
        assert_eq!(json["error"], "Failed to create contact");
    }
}
