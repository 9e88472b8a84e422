//! Display formatting for amounts. Calculations never round; only these
//! helpers do.

/// Format with thousands separators and a fixed number of decimals:
/// `1234.5` with 2 decimals -> `1,234.50`
pub fn format_money(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut result = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let mut result: String = result.chars().rev().collect();

    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(frac);
    }

    // Avoid "-0.00"
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        result.insert(0, '-');
    }
    result
}

/// Payout as shown to the user: two decimals with separators
pub fn format_payout(value: f64) -> String {
    format_money(value, 2)
}

/// Amount as shown in the history table: whole units with separators
pub fn format_amount(value: f64) -> String {
    format_money(value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0, 2), "0.00");
        assert_eq!(format_money(100.0, 2), "100.00");
        assert_eq!(format_money(1234.5, 2), "1,234.50");
        assert_eq!(format_money(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_money(-9876.5, 2), "-9,876.50");
        assert_eq!(format_money(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_amount_and_payout() {
        assert_eq!(format_amount(2500.4), "2,500");
        assert_eq!(format_amount(12345.9), "12,346");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_payout(125.025), "125.03");
        assert_eq!(format_payout(1_000_000.0), "1,000,000.00");
    }
}
