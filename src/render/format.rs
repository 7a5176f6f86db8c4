//! Number formatting for status line segments.

/// Compact token count: `950`, `10.5k`, `1.2M`.
pub fn format_tokens(count: u64) -> String {
    if count >= 1_000_000 {
        with_suffix(count as f64 / 1_000_000.0, "M")
    } else if count >= 1_000 {
        with_suffix(count as f64 / 1_000.0, "k")
    } else {
        count.to_string()
    }
}

fn with_suffix(value: f64, suffix: &str) -> String {
    let formatted = format!("{value:.1}");
    let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{trimmed}{suffix}")
}

/// Percentage with one decimal: `45.2%`.
pub fn format_pct(pct: f64) -> String {
    format!("{pct:.1}%")
}

/// Signed count with an explicit `+` for positive values.
pub fn format_signed(n: i64) -> String {
    if n > 0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        assert_eq!(format_tokens(0), "0");
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(1_000), "1k");
        assert_eq!(format_tokens(1_234), "1.2k");
        assert_eq!(format_tokens(10_500), "10.5k");
        assert_eq!(format_tokens(1_234_567), "1.2M");
        assert_eq!(format_tokens(3_000_000), "3M");
    }

    #[test]
    fn percentages() {
        assert_eq!(format_pct(45.23), "45.2%");
        assert_eq!(format_pct(0.0), "0.0%");
        assert_eq!(format_pct(100.0), "100.0%");
    }

    #[test]
    fn signed() {
        assert_eq!(format_signed(42), "+42");
        assert_eq!(format_signed(0), "0");
        assert_eq!(format_signed(-5), "-5");
    }
}
