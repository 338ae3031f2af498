// Display formatting helpers

/// `0.8734` -> `"87.34%"`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Fixed-point with `places` decimals.
pub fn format_decimal(value: f64, places: usize) -> String {
    format!("{:.*}", places, value)
}

/// First character upper-cased, the rest lower-cased (`"HUMAN"` -> `"Human"`).
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
