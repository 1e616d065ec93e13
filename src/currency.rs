//! Currency Formatting
//!
//! Pure formatting of rupee amounts and spend ranges into the units readers
//! of the dashboard expect: plain rupees below 1 lakh, lakhs below 1 crore,
//! crores above. The unit boundaries (100,000 and 10,000,000) are exact and
//! covered bit-for-bit by tests.

/// One lakh in rupees.
pub const LAKH: f64 = 100_000.0;
/// One crore in rupees.
pub const CRORE: f64 = 10_000_000.0;

/// Format an amount with the coarsest readable unit.
///
/// Below 1 lakh the amount prints as whole rupees with Indian digit grouping;
/// below 1 crore in lakhs with 2 decimals; otherwise in crores with 2
/// decimals. Zero and non-finite amounts print as `"₹0"`.
pub fn format_currency(amount: f64) -> String {
    if amount == 0.0 || !amount.is_finite() {
        return "₹0".to_string();
    }

    let abs = amount.abs();
    if abs < LAKH {
        return format!("₹{}", group_indian(amount.round() as i64));
    }
    if abs < CRORE {
        return format!("₹{:.2} L", amount / LAKH);
    }
    format!("₹{:.2} Cr", amount / CRORE)
}

/// Format a lower/upper spend range, each bound independently.
///
/// Both bounds missing prints the fixed zero-range string.
pub fn format_spend_range(lower: Option<f64>, upper: Option<f64>) -> String {
    if lower.is_none() && upper.is_none() {
        return "₹0L - ₹0L".to_string();
    }
    format!(
        "{} - {}",
        format_currency(lower.unwrap_or(0.0)),
        format_currency(upper.unwrap_or(0.0))
    )
}

/// Compact formatting with an extra thousands tier, used in person reports.
pub fn format_compact_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0".to_string();
    }
    if amount >= CRORE {
        format!("₹{:.2} Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.2} L", amount / LAKH)
    } else if amount >= 1_000.0 {
        format!("₹{:.2} K", amount / 1_000.0)
    } else {
        format!("₹{:.2}", amount)
    }
}

/// Convert a minor-unit amount to lakhs, rounded to 2 decimal places.
pub fn to_lakhs(amount: f64) -> f64 {
    (amount / LAKH * 100.0).round() / 100.0
}

/// Convert a lakh-denominated value to crores.
pub fn lakhs_to_crores(lakhs: f64) -> f64 {
    lakhs / 100.0
}

/// Indian-style digit grouping: last three digits, then groups of two
/// (1234567 -> "12,34,567").
fn group_indian(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<&str> = Vec::new();
        let head_bytes = head.as_bytes();
        let mut start = head_bytes.len() % 2;
        if start == 1 {
            parts.push(&head[..1]);
        }
        while start < head.len() {
            parts.push(&head[start..start + 2]);
            start += 2;
        }
        parts.push(tail);
        parts.join(",")
    };

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
