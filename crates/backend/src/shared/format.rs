/// Formats a number with thousands separators (dots)
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Formats a money amount in pt-BR style, rounded to cents
///
/// # Examples
/// ```
/// use backend::shared::format::format_money;
/// assert_eq!(format_money(1234.56), "R$ 1.234,56");
/// ```
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    format!(
        "{}R$ {},{:02}",
        sign,
        format_number((cents / 100) as usize),
        cents % 100
    )
}

/// Percent with one decimal, e.g. `42.9%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
