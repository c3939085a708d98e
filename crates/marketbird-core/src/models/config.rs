//! Configuration structures for the import pipeline.
//!
//! All identifiers the accounting service needs (tax rate, ledger account,
//! project, document style) are opaque pass-through values configured here
//! and validated once at startup.

use serde::{Deserialize, Serialize};

use crate::error::MarketbirdError;

/// Main configuration for the marketbird pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketbirdConfig {
    /// Accounting API connection settings.
    pub api: ApiConfig,

    /// Fixed identifiers attached to every created invoice.
    pub invoice: InvoiceDefaults,

    /// PDF input settings.
    pub pdf: PdfConfig,
}

/// Accounting API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API bearer token.
    pub api_token: String,

    /// Administration id, part of every endpoint path.
    pub administration_id: String,

    /// Base URL of the API.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            administration_id: String::new(),
            base_url: "https://moneybird.com/api/v2".to_string(),
        }
    }
}

/// Fixed identifiers attached to every invoice line and document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceDefaults {
    /// Tax rate applied to every line.
    pub tax_rate_id: String,

    /// Ledger account for every line.
    pub ledger_account_id: String,

    /// Project every line is booked on.
    pub project_id: String,

    /// Document style for created invoices.
    pub document_style_id: String,
}

/// PDF input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum accepted input size in bytes.
    pub max_file_size: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            // 16 MiB upload limit.
            max_file_size: 16 * 1024 * 1024,
        }
    }
}

impl MarketbirdConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Build a configuration from environment variables.
    ///
    /// Reads `MONEYBIRD_API_TOKEN`, `MONEYBIRD_ADMIN_ID`, `TAX_RATE_ID`,
    /// `LEDGER_ACCOUNT_ID`, `PROJECT_ID` and `DOCUMENT_STYLE_ID`. Missing
    /// variables become empty strings; call [`validate`](Self::validate)
    /// afterwards.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            api: ApiConfig {
                api_token: var("MONEYBIRD_API_TOKEN"),
                administration_id: var("MONEYBIRD_ADMIN_ID"),
                ..ApiConfig::default()
            },
            invoice: InvoiceDefaults {
                tax_rate_id: var("TAX_RATE_ID"),
                ledger_account_id: var("LEDGER_ACCOUNT_ID"),
                project_id: var("PROJECT_ID"),
                document_style_id: var("DOCUMENT_STYLE_ID"),
            },
            pdf: PdfConfig::default(),
        }
    }

    /// Validate that every identifier the submission path needs is present.
    ///
    /// Runs once at startup; the pipeline assumes a validated config.
    pub fn validate(&self) -> Result<(), MarketbirdError> {
        let required = [
            ("api.api_token", &self.api.api_token),
            ("api.administration_id", &self.api.administration_id),
            ("api.base_url", &self.api.base_url),
            ("invoice.tax_rate_id", &self.invoice.tax_rate_id),
            ("invoice.ledger_account_id", &self.invoice.ledger_account_id),
            ("invoice.project_id", &self.invoice.project_id),
            ("invoice.document_style_id", &self.invoice.document_style_id),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(MarketbirdError::Config(format!(
                    "missing required setting: {name}"
                )));
            }
        }
        if self.pdf.max_file_size == 0 {
            return Err(MarketbirdError::Config(
                "pdf.max_file_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> MarketbirdConfig {
        MarketbirdConfig {
            api: ApiConfig {
                api_token: "token".to_string(),
                administration_id: "123".to_string(),
                ..ApiConfig::default()
            },
            invoice: InvoiceDefaults {
                tax_rate_id: "1".to_string(),
                ledger_account_id: "2".to_string(),
                project_id: "3".to_string(),
                document_style_id: "4".to_string(),
            },
            pdf: PdfConfig::default(),
        }
    }

    #[test]
    fn test_validate_complete_config() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_token() {
        let mut config = filled();
        config.api.api_token.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.api_token"));
    }

    #[test]
    fn test_validate_rejects_missing_invoice_ids() {
        let mut config = filled();
        config.invoice.project_id.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_max_file_size() {
        assert_eq!(PdfConfig::default().max_file_size, 16 * 1024 * 1024);
    }
}
