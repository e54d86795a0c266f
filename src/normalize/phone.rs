// src/normalize/phone.rs - Canonical phone numbers for patients and providers
use log::debug;

use crate::utils::constants::NAMIBIA_COUNTRY_CODE;

/// Normalize free-form phone input to the canonical `264XXXXXXXXX` digit form.
///
/// Every non-digit is stripped first. Numbers already carrying the country
/// code are returned as-is; otherwise a single trunk `0` is dropped and the
/// country code is prepended. Length is never validated, so short or empty
/// input still yields a (short) best-effort result.
pub fn normalize_phone(phone: &str) -> String {
    let digits_only: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits_only.starts_with(NAMIBIA_COUNTRY_CODE) {
        return digits_only;
    }
    let subscriber = digits_only.strip_prefix('0').unwrap_or(&digits_only);
    let normalized = format!("{}{}", NAMIBIA_COUNTRY_CODE, subscriber);
    debug!("Phone number '{}' normalized to '{}'", phone, normalized);
    normalized
}

/// Render a phone number for display, e.g. `+264 81 123 4567`.
pub fn format_phone_display(phone: &str) -> String {
    let normalized = normalize_phone(phone);
    let subscriber = &normalized[NAMIBIA_COUNTRY_CODE.len()..];

    // Operator prefix, exchange, then whatever is left
    let mut groups = vec![format!("+{}", NAMIBIA_COUNTRY_CODE)];
    let mut rest = subscriber;
    for width in [2usize, 3] {
        if rest.is_empty() {
            break;
        }
        let (group, tail) = rest.split_at(width.min(rest.len()));
        groups.push(group.to_string());
        rest = tail;
    }
    if !rest.is_empty() {
        groups.push(rest.to_string());
    }
    groups.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_normalization() {
        assert_eq!(normalize_phone("+264811234567"), "264811234567");
        assert_eq!(normalize_phone("0811234567"), "264811234567");
        assert_eq!(normalize_phone("081 123-4567"), "264811234567");
        assert_eq!(normalize_phone("811234567"), "264811234567");
        assert_eq!(normalize_phone("(+264) 81 123 4567"), "264811234567");
    }

    #[test]
    fn test_country_code_is_kept_unchanged() {
        for digits in ["264", "264811234567", "2640000", "26481"] {
            assert_eq!(normalize_phone(digits), digits);
        }
    }

    #[test]
    fn test_only_one_leading_zero_is_dropped() {
        assert_eq!(normalize_phone("00811234567"), "2640811234567");
        assert_eq!(normalize_phone("0 0"), "2640");
    }

    #[test]
    fn test_short_numbers_are_not_validated() {
        assert_eq!(normalize_phone("081123"), "26481123");
        assert_eq!(normalize_phone(""), "264");
        assert_eq!(normalize_phone("not a number"), "264");
        assert_eq!(normalize_phone("0"), "264");
    }

    #[test]
    fn test_phone_display_format() {
        assert_eq!(format_phone_display("0811234567"), "+264 81 123 4567");
        assert_eq!(format_phone_display("+264 81 123 4567"), "+264 81 123 4567");
        assert_eq!(format_phone_display("081123"), "+264 81 123");
        assert_eq!(format_phone_display("0812"), "+264 81 2");
        assert_eq!(format_phone_display(""), "+264");
    }
}
