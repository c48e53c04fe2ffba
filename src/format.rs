//! Indonesian (id-ID) display formatting for currency and figures

/// Insert `.` every three digits of an unsigned integer string
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn sign(value: f64, rendered_digits: &str) -> &'static str {
    if value < 0.0 && rendered_digits.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    }
}

/// Rupiah with no fraction digits, e.g. `Rp 1.500.000`
pub fn format_rupiah(value: f64) -> String {
    if !value.is_finite() {
        return "Rp -".to_string();
    }
    let digits = format!("{:.0}", value.abs());
    format!("{}Rp {}", sign(value, &digits), group_thousands(&digits))
}

/// Number with at most two fraction digits, e.g. `1.234,5`
pub fn format_num(value: f64) -> String {
    format_two_decimals(value, true)
}

/// Two fraction digits, trailing zeros dropped when `trim` is set
fn format_two_decimals(value: f64, trim: bool) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = if trim { frac_part.trim_end_matches('0') } else { frac_part };

    let mut out = String::from(sign(value, &fixed));
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Percentage with at most two fraction digits, e.g. `74,5%`
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_num(value))
}

/// Signed growth label with exactly two decimals, e.g. `+8,00%` or `-1,25%`
pub fn format_growth(pct: f64) -> String {
    let body = format_two_decimals(pct, false);
    if body.starts_with('-') {
        format!("{}%", body)
    } else {
        format!("+{}%", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1.234");
        assert_eq!(group_thousands("1500000"), "1.500.000");
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(1_500_000.0), "Rp 1.500.000");
        assert_eq!(format_rupiah(2_929_125_000.4), "Rp 2.929.125.000");
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(-2500.0), "-Rp 2.500");
        assert_eq!(format_rupiah(-0.2), "Rp 0");
        assert_eq!(format_rupiah(f64::NAN), "Rp -");
    }

    #[test]
    fn test_format_num() {
        assert_eq!(format_num(74.5), "74,5");
        assert_eq!(format_num(4.0), "4");
        assert_eq!(format_num(1234.567), "1.234,57");
        assert_eq!(format_num(-3.1), "-3,1");
        assert_eq!(format_num(f64::NAN), "NaN");
    }

    #[test]
    fn test_percent_and_growth() {
        assert_eq!(format_percent(74.5), "74,5%");
        assert_eq!(format_growth(8.0), "+8,00%");
        assert_eq!(format_growth(-1.25), "-1,25%");
        assert_eq!(format_growth(0.0), "+0,00%");
    }

    #[test]
    fn test_growth_keeps_two_decimals() {
        assert_eq!(format_growth(8.5), "+8,50%");
        assert_eq!(format_growth(12.345), "+12,35%");
        assert_eq!(format_growth(1234.0), "+1.234,00%");
        // rounds to zero: no minus sign
        assert_eq!(format_growth(-0.001), "+0,00%");
    }
}
