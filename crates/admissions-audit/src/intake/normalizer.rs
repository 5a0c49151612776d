/// `yes`, `true`, and `1` (any case) are affirmative; anything else is not.
pub(crate) fn parse_yes_no(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "1"
    )
}

/// Strips currency formatting. Unparseable, negative, or non-finite values become 0.
pub(crate) fn parse_income(value: &str) -> f64 {
    let cleaned: String = value.chars().filter(|c| *c != '$' && *c != ',').collect();
    match cleaned.trim().parse::<f64>() {
        Ok(income) if income.is_finite() && income >= 0.0 => income,
        _ => 0.0,
    }
}

pub(crate) fn normalize_name(value: &str) -> Option<String> {
    let cleaned = value.replace(&['\u{feff}', '\u{200b}'][..], "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
