//! HTTP client for the Moneybird API.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::types::{
    Contact, ContactAttributes, ContactRequest, InvoiceDetail, PaymentAttributes, PaymentRequest,
    SalesInvoice, SalesInvoiceAttributes, SalesInvoiceRequest, SendInvoiceRequest,
};
use super::{AccountingApi, Result};
use crate::error::ApiError;
use crate::models::config::{InvoiceDefaults, MarketbirdConfig};
use crate::models::order::{ParsedAddress, ParsedOrder};

/// Client for one administration of the accounting service.
///
/// All endpoints live under `{base_url}/{administration_id}`; the bearer
/// token is attached to every request via default headers.
pub struct MoneybirdClient {
    http: reqwest::Client,
    base_url: String,
    administration_id: String,
    defaults: InvoiceDefaults,
}

impl MoneybirdClient {
    /// Build a client from a validated configuration.
    pub fn new(config: &MarketbirdConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", config.api.api_token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).map_err(|e| ApiError::UnexpectedResponse {
                operation: "client setup",
                detail: format!("invalid API token: {e}"),
            })?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("marketbird/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            administration_id: config.api.administration_id.clone(),
            defaults: config.invoice.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.administration_id, path)
    }

    /// Search contacts by the derived customer id. A search failure is not
    /// fatal; the caller falls through to creation.
    async fn search_contact(&self, customer_id: &str) -> Result<Option<Contact>> {
        let response = self
            .http
            .get(self.url("contacts"))
            .query(&[("query", customer_id)])
            .send()
            .await?;
        let response = check_status(response, "contact search").await?;

        let contacts: Vec<Contact> = response.json().await?;
        Ok(contacts
            .into_iter()
            .find(|c| c.customer_id.as_deref() == Some(customer_id)))
    }

    async fn create_contact(&self, address: &ParsedAddress) -> Result<Contact> {
        let request = ContactRequest {
            contact: ContactAttributes {
                company_name: address.company_name.clone(),
                firstname: address.first_name.clone(),
                lastname: address.last_name.clone(),
                address1: address.address_line1.clone(),
                zipcode: address.postal_code.clone(),
                city: address.city.clone(),
                country: address.country_code.clone(),
                email: address.email.clone(),
                customer_id: address.customer_id(),
            },
        };

        let response = self
            .http
            .post(self.url("contacts"))
            .json(&request)
            .send()
            .await?;
        let response = check_status(response, "contact creation").await?;

        let contact: Contact = response.json().await?;
        info!("Created contact {} for {}", contact.id, address.full_name());
        Ok(contact)
    }

    /// Build the invoice lines: one per product, plus a shipping line when a
    /// delivery cost was parsed.
    fn invoice_details(&self, order: &ParsedOrder) -> Vec<InvoiceDetail> {
        let mut details: Vec<InvoiceDetail> = order
            .line_items
            .iter()
            .map(|item| InvoiceDetail {
                description: item.name.clone(),
                amount: item.quantity.to_string(),
                price: item.unit_price.to_string(),
                tax_rate_id: self.defaults.tax_rate_id.clone(),
                ledger_account_id: self.defaults.ledger_account_id.clone(),
                project_id: self.defaults.project_id.clone(),
                destroy: false,
            })
            .collect();

        if let Some(delivery_cost) = order.delivery_cost {
            details.push(InvoiceDetail {
                description: "Shipping".to_string(),
                amount: "1".to_string(),
                price: delivery_cost.to_string(),
                tax_rate_id: self.defaults.tax_rate_id.clone(),
                ledger_account_id: self.defaults.ledger_account_id.clone(),
                project_id: self.defaults.project_id.clone(),
                destroy: false,
            });
        }

        details
    }
}

impl AccountingApi for MoneybirdClient {
    async fn find_or_create_contact(&self, address: &ParsedAddress) -> Result<Contact> {
        let customer_id = address.customer_id();

        match self.search_contact(&customer_id).await {
            Ok(Some(contact)) => {
                debug!("Found existing contact {} for {}", contact.id, customer_id);
                return Ok(contact);
            }
            Ok(None) => {
                debug!("No contact matches {}, creating one", customer_id);
            }
            Err(e) => {
                warn!("Contact search failed ({e}), creating a new contact");
            }
        }

        self.create_contact(address).await
    }

    async fn create_invoice(&self, contact_id: &str, order: &ParsedOrder) -> Result<SalesInvoice> {
        let request = SalesInvoiceRequest {
            sales_invoice: SalesInvoiceAttributes {
                contact_id: contact_id.to_string(),
                reference: order.order_number.clone().unwrap_or_default(),
                invoice_date: order.invoice_date.clone().unwrap_or_default(),
                document_style_id: self.defaults.document_style_id.clone(),
                prices_are_incl_tax: true,
                details_attributes: self.invoice_details(order),
                source: "marketbird".to_string(),
            },
        };

        let response = self
            .http
            .post(self.url("sales_invoices"))
            .json(&request)
            .send()
            .await?;
        let response = check_status(response, "invoice creation").await?;

        let invoice: SalesInvoice = response.json().await?;
        info!(
            "Created invoice {} for order {:?}",
            invoice.id, order.order_number
        );
        Ok(invoice)
    }

    async fn mark_sent_and_paid(
        &self,
        invoice_id: &str,
        order: &ParsedOrder,
        total: Decimal,
    ) -> Result<()> {
        let send_url = self.url(&format!("sales_invoices/{invoice_id}/send_invoice"));
        let response = self
            .http
            .patch(send_url)
            .json(&SendInvoiceRequest::manual())
            .send()
            .await?;
        check_status(response, "invoice sending").await?;
        debug!("Marked invoice {} as sent", invoice_id);

        let payment = PaymentRequest {
            payment: PaymentAttributes {
                payment_date: order.invoice_date.clone().unwrap_or_default(),
                price: total.to_string(),
                description: format!("Payment received of €{} via marketbird", total.round_dp(2)),
            },
        };
        let payment_url = self.url(&format!("sales_invoices/{invoice_id}/payments"));
        let response = self.http.post(payment_url).json(&payment).send().await?;
        check_status(response, "payment registration").await?;
        info!("Registered payment of €{} on invoice {}", total, invoice_id);

        Ok(())
    }
}

/// Turn a non-2xx response into a typed error carrying the response body.
async fn check_status(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        operation,
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::{ApiConfig, PdfConfig};
    use std::str::FromStr;

    fn config() -> MarketbirdConfig {
        MarketbirdConfig {
            api: ApiConfig {
                api_token: "token".to_string(),
                administration_id: "123".to_string(),
                base_url: "https://moneybird.example/api/v2".to_string(),
            },
            invoice: InvoiceDefaults {
                tax_rate_id: "tr".to_string(),
                ledger_account_id: "la".to_string(),
                project_id: "pr".to_string(),
                document_style_id: "ds".to_string(),
            },
            pdf: PdfConfig::default(),
        }
    }

    #[test]
    fn test_url_joins_administration_path() {
        let client = MoneybirdClient::new(&config()).unwrap();
        assert_eq!(
            client.url("contacts"),
            "https://moneybird.example/api/v2/123/contacts"
        );
    }

    #[test]
    fn test_url_strips_trailing_slash() {
        let mut config = config();
        config.api.base_url.push('/');
        let client = MoneybirdClient::new(&config).unwrap();
        assert_eq!(
            client.url("sales_invoices"),
            "https://moneybird.example/api/v2/123/sales_invoices"
        );
    }

    #[test]
    fn test_invoice_details_appends_shipping_line() {
        let client = MoneybirdClient::new(&config()).unwrap();
        let order = ParsedOrder {
            order_number: Some("1".to_string()),
            invoice_date: Some("2025-06-21".to_string()),
            line_items: vec![crate::models::order::LineItem {
                name: "Wooden spoon".to_string(),
                quantity: 2,
                unit_price: Decimal::from_str("11.95").unwrap(),
            }],
            delivery_cost: Some(Decimal::from_str("4.00").unwrap()),
        };

        let details = client.invoice_details(&order);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].description, "Wooden spoon");
        assert_eq!(details[0].amount, "2");
        assert_eq!(details[0].price, "11.95");
        assert_eq!(details[1].description, "Shipping");
        assert_eq!(details[1].amount, "1");
        assert_eq!(details[1].price, "4.00");
        assert_eq!(details[1].tax_rate_id, "tr");
    }

    #[test]
    fn test_invoice_details_without_delivery_cost() {
        let client = MoneybirdClient::new(&config()).unwrap();
        let order = ParsedOrder::default();
        assert!(client.invoice_details(&order).is_empty());
    }
}
