//! Wire types for the Moneybird REST API.
//!
//! Only the fields the pipeline reads or writes are modelled; everything
//! else in the service's responses is ignored during deserialisation.

use serde::{Deserialize, Deserializer, Serialize};

/// A contact as returned by the service. Ids arrive as strings or numbers
/// depending on endpoint; both are normalised to strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    #[serde(deserialize_with = "id_string")]
    pub id: String,

    #[serde(default)]
    pub customer_id: Option<String>,
}

/// A sales invoice as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesInvoice {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

/// Request body for contact creation.
#[derive(Debug, Serialize)]
pub struct ContactRequest {
    pub contact: ContactAttributes,
}

#[derive(Debug, Serialize)]
pub struct ContactAttributes {
    pub company_name: String,
    pub firstname: String,
    pub lastname: String,
    pub address1: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
    pub email: String,
    pub customer_id: String,
}

/// Request body for invoice creation.
#[derive(Debug, Serialize)]
pub struct SalesInvoiceRequest {
    pub sales_invoice: SalesInvoiceAttributes,
}

#[derive(Debug, Serialize)]
pub struct SalesInvoiceAttributes {
    pub contact_id: String,
    pub reference: String,
    pub invoice_date: String,
    pub document_style_id: String,
    /// Marketplace prices already include VAT.
    pub prices_are_incl_tax: bool,
    pub details_attributes: Vec<InvoiceDetail>,
    pub source: String,
}

/// One invoice line. Amounts and prices travel as strings, as the service
/// expects.
#[derive(Debug, Serialize)]
pub struct InvoiceDetail {
    pub description: String,
    pub amount: String,
    pub price: String,
    pub tax_rate_id: String,
    pub ledger_account_id: String,
    pub project_id: String,
    #[serde(rename = "_destroy")]
    pub destroy: bool,
}

/// Request body for marking an invoice sent.
#[derive(Debug, Serialize)]
pub struct SendInvoiceRequest {
    pub sales_invoice_sending: SendingAttributes,
}

#[derive(Debug, Serialize)]
pub struct SendingAttributes {
    pub delivery_method: String,
}

impl SendInvoiceRequest {
    /// Manual delivery: the marketplace already sent the buyer a receipt.
    pub fn manual() -> Self {
        Self {
            sales_invoice_sending: SendingAttributes {
                delivery_method: "Manual".to_string(),
            },
        }
    }
}

/// Request body for recording a payment.
#[derive(Debug, Serialize)]
pub struct PaymentRequest {
    pub payment: PaymentAttributes,
}

#[derive(Debug, Serialize)]
pub struct PaymentAttributes {
    pub payment_date: String,
    pub price: String,
    pub description: String,
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_id_from_number() {
        let contact: Contact = serde_json::from_str(r#"{"id": 123456789}"#).unwrap();
        assert_eq!(contact.id, "123456789");
        assert_eq!(contact.customer_id, None);
    }

    #[test]
    fn test_contact_id_from_string() {
        let contact: Contact =
            serde_json::from_str(r#"{"id": "42", "customer_id": "Anna-de Vries-1015CJ"}"#)
                .unwrap();
        assert_eq!(contact.id, "42");
        assert_eq!(contact.customer_id.as_deref(), Some("Anna-de Vries-1015CJ"));
    }

    #[test]
    fn test_invoice_detail_serialises_destroy_key() {
        let detail = InvoiceDetail {
            description: "Shipping".to_string(),
            amount: "1".to_string(),
            price: "4.00".to_string(),
            tax_rate_id: "1".to_string(),
            ledger_account_id: "2".to_string(),
            project_id: "3".to_string(),
            destroy: false,
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["_destroy"], serde_json::Value::Bool(false));
    }
}
