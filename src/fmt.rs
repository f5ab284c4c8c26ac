/// Display symbol for a currency code; unknown codes print as `CODE `.
fn currency_prefix(currency: &str) -> String {
    match currency {
        "INR" => "\u{20b9}".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "\u{20ac}".to_string(),
        "GBP" => "\u{a3}".to_string(),
        "JPY" => "\u{a5}".to_string(),
        other => format!("{other} "),
    }
}

/// Indian digit grouping: the last three digits, then pairs (12,34,567).
fn group_indian(int_part: &str) -> String {
    let digits: Vec<char> = int_part.chars().collect();
    if digits.len() <= 3 {
        return int_part.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::new();
    for (i, c) in head.iter().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out.push(',');
    out.extend(tail);
    out
}

/// Format a whole-unit currency amount: ₹1,23,457 / -$500.
pub fn money(val: f64, currency: &str) -> String {
    let negative = val < 0.0 && val.abs().round() > 0.0;
    let whole = format!("{:.0}", val.abs());
    let grouped = group_indian(&whole);
    let prefix = currency_prefix(currency);
    if negative {
        format!("-{prefix}{grouped}")
    } else {
        format!("{prefix}{grouped}")
    }
}

/// Amount column for CSV export: grouped with exactly two decimals.
pub fn csv_amount(val: f64) -> String {
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if val < 0.0 { "-" } else { "" };
    format!("{sign}{}.{dec_part}", group_indian(int_part))
}

/// Short axis label: 1.5K, 2.0M, 3.1B, 1.0T.
pub fn compact(val: f64) -> String {
    let abs = val.abs();
    if abs >= 1e12 {
        format!("{:.1}T", val / 1e12)
    } else if abs >= 1e9 {
        format!("{:.1}B", val / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", val / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", val / 1e3)
    } else {
        format!("{val:.0}")
    }
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
