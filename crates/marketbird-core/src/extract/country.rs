//! Country name resolution.
//!
//! Maps the free-text country line of the address block to an ISO-3166
//! alpha-2 code. The table is ordered and matched by substring containment:
//! the first entry whose name appears anywhere in the line wins, so a line
//! mentioning several names resolves to the earliest declared one.

/// Country names and their ISO alpha-2 codes, in match-priority order.
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("Germany", "DE"),
    ("Netherlands", "NL"),
    ("Austria", "AT"),
    ("Belgium", "BE"),
    ("France", "FR"),
    ("Italy", "IT"),
    ("Spain", "ES"),
    ("Portugal", "PT"),
    ("Switzerland", "CH"),
    ("Luxembourg", "LU"),
    ("Denmark", "DK"),
    ("Sweden", "SE"),
    ("Norway", "NO"),
    ("Finland", "FI"),
    ("Ireland", "IE"),
    ("Poland", "PL"),
    ("Czech Republic", "CZ"),
    ("Slovakia", "SK"),
    ("Hungary", "HU"),
    ("Slovenia", "SI"),
    ("Croatia", "HR"),
    ("Romania", "RO"),
    ("Bulgaria", "BG"),
    ("Greece", "GR"),
    ("Cyprus", "CY"),
    ("Malta", "MT"),
    ("Estonia", "EE"),
    ("Latvia", "LV"),
    ("Lithuania", "LT"),
    ("United Kingdom", "GB"),
    ("United States", "US"),
    ("Canada", "CA"),
    ("Australia", "AU"),
    ("New Zealand", "NZ"),
    ("Japan", "JP"),
    ("South Korea", "KR"),
    ("Singapore", "SG"),
    ("Hong Kong", "HK"),
    ("Taiwan", "TW"),
    ("Thailand", "TH"),
    ("Malaysia", "MY"),
    ("Philippines", "PH"),
    ("Indonesia", "ID"),
    ("Vietnam", "VN"),
    ("India", "IN"),
    ("Brazil", "BR"),
    ("Mexico", "MX"),
    ("Argentina", "AR"),
    ("Chile", "CL"),
    ("Colombia", "CO"),
    ("Peru", "PE"),
    ("South Africa", "ZA"),
    ("Israel", "IL"),
    ("Turkey", "TR"),
    ("Russia", "RU"),
    ("Ukraine", "UA"),
    ("China", "CN"),
];

/// Resolve a free-text country line to a two-letter code.
///
/// Falls back to the first two characters of the line, uppercased, when no
/// table entry matches. Never fails.
pub fn resolve_country_code(country_line: &str) -> String {
    for (name, code) in COUNTRY_CODES {
        if country_line.contains(name) {
            return (*code).to_string();
        }
    }

    country_line
        .chars()
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name() {
        assert_eq!(resolve_country_code("Netherlands"), "NL");
        assert_eq!(resolve_country_code("Germany"), "DE");
    }

    #[test]
    fn test_substring_match_with_extra_words() {
        assert_eq!(resolve_country_code("The United Kingdom of GB"), "GB");
        assert_eq!(resolve_country_code("Ships to France only"), "FR");
    }

    #[test]
    fn test_table_order_breaks_ties() {
        // Both names appear; "Germany" is declared before "Netherlands".
        assert_eq!(resolve_country_code("Germany / Netherlands"), "DE");
        // "India" is declared before "China" and both are substrings here.
        assert_eq!(resolve_country_code("India China"), "IN");
    }

    #[test]
    fn test_fallback_first_two_chars_uppercased() {
        assert_eq!(resolve_country_code("Zz Ruritania"), "ZZ");
        assert_eq!(resolve_country_code("xy"), "XY");
    }

    #[test]
    fn test_never_panics_on_short_input() {
        assert_eq!(resolve_country_code("a"), "A");
        assert_eq!(resolve_country_code(""), "");
    }
}
