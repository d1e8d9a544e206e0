//! Birth country to nationality code lookup.

/// Birth-country spellings seen in people payloads, mapped to the 3-letter
/// codes the client groups by. Several spellings can share a code.
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("USA", "USA"),
    ("United States", "USA"),
    ("Dominican Republic", "DOM"),
    ("Venezuela", "VEN"),
    ("Puerto Rico", "PUR"),
    ("Cuba", "CUB"),
    ("Mexico", "MEX"),
    ("Japan", "JPN"),
    ("Korea", "KOR"),
    ("Korea, Republic of", "KOR"),
    ("Canada", "CAN"),
    ("Panama", "PAN"),
    ("Colombia", "COL"),
    ("Curacao", "CUR"),
    ("Aruba", "ARU"),
    ("Netherlands", "NED"),
    ("Australia", "AUS"),
    ("Taiwan", "TWN"),
    ("Nicaragua", "NIC"),
];

/// Code for a birth country, `None` when the country is not in the table.
pub fn nationality_code(birth_country: &str) -> Option<&'static str> {
    let country = birth_country.trim();
    COUNTRY_CODES
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, code)| *code)
}

pub fn is_known_code(code: &str) -> bool {
    COUNTRY_CODES.iter().any(|(_, known)| *known == code)
}

/// Every distinct code, in table order.
pub fn known_codes() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = Vec::new();
    for (_, code) in COUNTRY_CODES {
        if !codes.contains(code) {
            codes.push(*code);
        }
    }
    codes
}
