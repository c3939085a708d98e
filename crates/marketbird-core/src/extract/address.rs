//! Shipping address extraction from the "Deliver to" block.
//!
//! The layout is strictly positional: the four lines after the marker are
//! name, street, postal code + city, and country, in that order. The offsets
//! below are the single source of truth for that layout.

use tracing::debug;

use super::country::resolve_country_code;
use super::cursor::LineCursor;
use crate::error::ExtractionError;
use crate::models::order::ParsedAddress;

/// Marker line introducing the shipping address block.
const DELIVER_TO_MARKER: &str = "Deliver to";

/// Line offsets from the marker line.
const NAME_OFFSET: usize = 1;
const STREET_OFFSET: usize = 2;
const POSTAL_CITY_OFFSET: usize = 3;
const COUNTRY_OFFSET: usize = 4;

/// How many lines of the document header are scanned for the buyer email.
const EMAIL_SCAN_LINES: usize = 5;

/// Result type for address extraction.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Parse the shipping address out of the full text blob.
///
/// Fails with [`ExtractionError::MissingAddressSection`] when the marker is
/// absent and [`ExtractionError::TruncatedAddress`] when the text ends before
/// the four positional lines.
pub fn parse_address(text: &str) -> Result<ParsedAddress> {
    let cursor = LineCursor::new(text);

    let email = find_email(&cursor);

    let marker = cursor
        .find(DELIVER_TO_MARKER)
        .ok_or(ExtractionError::MissingAddressSection)?;
    debug!("Found '{}' marker at line {}", DELIVER_TO_MARKER, marker);

    let line_at = |offset: usize| {
        cursor
            .get_trimmed(marker + offset)
            .ok_or(ExtractionError::TruncatedAddress { missing: offset })
    };

    let full_name = line_at(NAME_OFFSET)?;
    let address_line1 = line_at(STREET_OFFSET)?;
    let postal_city_line = line_at(POSTAL_CITY_OFFSET)?;
    let country_line = line_at(COUNTRY_OFFSET)?;

    let (first_name, last_name) = split_name(full_name);
    let (postal_code, city) = split_postal_city(postal_city_line);
    let country_code = resolve_country_code(country_line);

    Ok(ParsedAddress {
        first_name: capitalize_first(&first_name),
        last_name,
        company_name: String::new(),
        address_line1: address_line1.to_string(),
        postal_code,
        city,
        country_code,
        email,
    })
}

/// Scan the first few header lines for a parenthesized email.
///
/// Stops at the first line containing `(`, `@` and `)`; the text strictly
/// between the first `(` and the first `)` is taken as the email. Returns an
/// empty string when nothing matches.
fn find_email(cursor: &LineCursor<'_>) -> String {
    for line in cursor.head(EMAIL_SCAN_LINES) {
        if line.contains('(') && line.contains('@') && line.contains(')') {
            if let (Some(open), Some(close)) = (line.find('('), line.find(')')) {
                if close > open + 1 {
                    return line[open + 1..close].trim().to_string();
                }
            }
            break;
        }
    }
    String::new()
}

/// Split a full name on single spaces: first token is the first name, the
/// rest rejoined is the last name (empty for single-token names).
fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split(' ');
    let first = parts.next().unwrap_or("").to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Split the postal-code/city line: first whitespace-delimited token is the
/// postal code, the remainder rejoined is the city.
fn split_postal_city(line: &str) -> (String, String) {
    let mut parts = line.split_whitespace();
    let postal = parts.next().unwrap_or("").to_string();
    let city = parts.collect::<Vec<_>>().join(" ");
    (postal, city)
}

/// Uppercase the first character, leaving the rest of the string unchanged.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
