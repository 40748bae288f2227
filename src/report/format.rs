//! Number formatting driven by an explicit `FormatConfig`

use crate::config::FormatConfig;

/// Placeholder for an undefined value
pub const UNDEFINED: &str = "n/a";

/// Plain number with the configured decimals and grouping
pub fn number(value: f64, config: &FormatConfig) -> String {
    fixed(value, config.decimals, config.thousands_separator)
}

/// `rate` as a percentage, e.g. 0.0993 -> "9.93%"
pub fn percent(rate: f64, config: &FormatConfig) -> String {
    if !rate.is_finite() {
        return UNDEFINED.to_string();
    }
    format!("{}%", number(rate * 100.0, config))
}

/// p-value with its own precision, never grouped
pub fn p_value(value: f64, config: &FormatConfig) -> String {
    fixed(value, config.p_value_decimals, false)
}

/// `number` over an optional value
pub fn optional(value: Option<f64>, config: &FormatConfig) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), |v| number(v, config))
}

/// `percent` over an optional rate
pub fn optional_percent(rate: Option<f64>, config: &FormatConfig) -> String {
    rate.map_or_else(|| UNDEFINED.to_string(), |r| percent(r, config))
}

fn fixed(value: f64, decimals: usize, grouped: bool) -> String {
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + 4);
    // "-0.00" reads as noise
    if value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    if grouped {
        out.push_str(&group_thousands(int_part));
    } else {
        out.push_str(int_part);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_comma_two_decimals() {
        let config = FormatConfig::default();
        assert_eq!(number(1234567.891, &config), "1,234,567.89");
        assert_eq!(number(999.0, &config), "999.00");
        assert_eq!(number(1000.0, &config), "1,000.00");
    }

    #[test]
    fn test_negative_numbers() {
        let config = FormatConfig::default();
        assert_eq!(number(-1234.5, &config), "-1,234.50");
        assert_eq!(number(-0.001, &config), "0.00");
    }

    #[test]
    fn test_percent() {
        let config = FormatConfig::default();
        assert_eq!(percent(0.0993, &config), "9.93%");
        assert_eq!(percent(f64::NAN, &config), "n/a");
        assert_eq!(optional_percent(None, &config), "n/a");
    }

    #[test]
    fn test_zero_decimals_and_no_grouping() {
        let config = FormatConfig {
            decimals: 0,
            thousands_separator: false,
            p_value_decimals: 4,
        };
        assert_eq!(number(12345.6, &config), "12346");
        assert_eq!(p_value(0.000123456, &config), "0.0001");
    }
}
