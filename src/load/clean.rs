// src/load/clean.rs

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Parse a count cell such as `"1,234"` or `"-"`.
///
/// Thousands separators are removed and every `-` placeholder becomes `0`.
/// Anything that still isn't an unsigned integer yields `0`; a single bad
/// cell never fails the load.
pub fn parse_count(raw: &str) -> u64 {
    let digits: String = clean_str(raw)
        .chars()
        .filter(|c| *c != ',')
        .map(|c| if c == '-' { '0' } else { c })
        .collect();
    digits.parse().unwrap_or(0)
}

/// Drop the `<code>_` prefix e-Stat puts on category labels.
/// `"13_東京都"` → `"東京都"`. Text without an underscore is returned as is.
pub fn strip_code(raw: &str) -> String {
    let s = clean_str(raw);
    match s.split_once('_') {
        Some((_, label)) => label.to_string(),
        None => s.to_string(),
    }
}
