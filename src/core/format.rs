//! Number and currency formatting
//!
//! Amounts are shown rounded to whole units with Indian digit grouping
//! (`13,20,000`). Rounding happens here, at display time, never in the engine.

use chrono::NaiveDate;

/// Default currency symbol
pub const RUPEE: &str = "₹";

/// Currency formatter with a configurable symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    symbol: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new(RUPEE)
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Format an amount rounded to whole units, e.g. `₹7,92,000`
    pub fn format(&self, amount: f64) -> String {
        if amount.is_nan() {
            return format!("{}NaN", self.symbol);
        }
        let rounded = amount.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        if rounded.is_infinite() {
            return format!("{}{}∞", sign, self.symbol);
        }
        let digits = format!("{:.0}", rounded.abs());
        format!("{}{}{}", sign, self.symbol, group_indian(&digits))
    }

    /// Format a per-unit price without rounding away paise, e.g. `₹12.5/kg`
    pub fn format_rate(&self, amount: f64, unit: &str) -> String {
        format!("{}{}{}", self.symbol, format_number(amount), unit)
    }
}

/// Format with the default rupee symbol
pub fn format_currency(amount: f64) -> String {
    CurrencyFormat::default().format(amount)
}

/// Format a plain number with Indian grouping and at most three decimals
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let is_zero = int_part.chars().all(|c| c == '0') && frac.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac.is_empty() {
        format!("{}{}", sign, group_indian(int_part))
    } else {
        format!("{}{}.{}", sign, group_indian(int_part), frac)
    }
}

/// Long date as used on reports, e.g. `19 October 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Insert separators: last three digits, then groups of two
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("0"), "0");
        assert_eq!(group_indian("999"), "999");
        assert_eq!(group_indian("1000"), "1,000");
        assert_eq!(group_indian("66000"), "66,000");
        assert_eq!(group_indian("110000"), "1,10,000");
        assert_eq!(group_indian("3632000"), "36,32,000");
        assert_eq!(group_indian("123456789"), "12,34,56,789");
    }

    #[test]
    fn test_format_currency_default_figures() {
        assert_eq!(format_currency(792000.0), "₹7,92,000");
        assert_eq!(format_currency(1320000.0), "₹13,20,000");
        assert_eq!(format_currency(3632000.0), "₹36,32,000");
        assert_eq!(format_currency(75000.0 / 12.0), "₹6,250");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(4166.5), "₹4,167");
        assert_eq!(format_currency(4166.4), "₹4,166");
        assert_eq!(format_currency(-2.5), "-₹3");
    }

    #[test]
    fn test_format_currency_edge_values() {
        assert_eq!(format_currency(0.0), "₹0");
        assert_eq!(format_currency(-0.4), "₹0");
        assert_eq!(format_currency(f64::NAN), "₹NaN");
        assert_eq!(format_currency(f64::INFINITY), "₹∞");
        assert_eq!(format_currency(-1234567.0), "-₹12,34,567");
    }

    #[test]
    fn test_custom_symbol() {
        let fmt = CurrencyFormat::new("Rs. ");
        assert_eq!(fmt.format(50000.0), "Rs. 50,000");
        assert_eq!(fmt.format_rate(1.0, "/kg"), "Rs. 1/kg");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(200.0), "200");
        assert_eq!(format_number(25000.0), "25,000");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(1.0 / 3.0), "0.333");
        assert_eq!(format_number(-1500.75), "-1,500.75");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_long_date(date), "19 October 2026");
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(format_long_date(date), "5 March 2026");
    }
}
