//! Order number formatting
//!
//! Numbers come from the single-row `order_sequence` counter and are shown
//! zero-padded to three digits. Wider values are never truncated.

/// `1 -> "001"`, `42 -> "042"`, `1234 -> "1234"`
pub fn format_order_number(value: i64) -> String {
    format!("{value:03}")
}

/// Read a displayed order number back to its sequence value
pub fn parse_order_number(number: &str) -> Option<u64> {
    let trimmed = number.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_to_three_digits() {
        assert_eq!(format_order_number(1), "001");
        assert_eq!(format_order_number(42), "042");
        assert_eq!(format_order_number(999), "999");
        assert_eq!(format_order_number(1234), "1234");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_order_number("001"), Some(1));
        assert_eq!(parse_order_number("1234"), Some(1234));
        assert_eq!(parse_order_number(""), None);
        assert_eq!(parse_order_number("-1"), None);
        assert_eq!(parse_order_number("12a"), None);
    }

    #[test]
    fn test_format_parse_preserves_order() {
        let numbers: Vec<String> = (1..=1200).map(format_order_number).collect();
        let parsed: Vec<u64> = numbers.iter().filter_map(|n| parse_order_number(n)).collect();
        assert_eq!(parsed.len(), numbers.len());
        assert!(parsed.windows(2).all(|w| w[0] < w[1]));
    }
}
