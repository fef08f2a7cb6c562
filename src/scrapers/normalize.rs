/// Split a raw location string into (address, neighborhood).
///
/// Source addresses mix "Street, Neighborhood" and "Street, Number"
/// conventions, so the suffix after the LAST comma only counts as a
/// neighborhood when it is at least two characters long (trimmed) and not
/// purely numeric. Otherwise the full string stays as the address and the
/// neighborhood is empty.
pub fn split_neighborhood(raw: &str) -> (String, String) {
    if let Some((prefix, suffix)) = raw.rsplit_once(',') {
        let candidate = suffix.trim();
        if candidate.chars().count() >= 2 && !candidate.chars().all(char::is_numeric) {
            return (prefix.trim().to_string(), candidate.to_string());
        }
    }
    (raw.to_string(), String::new())
}

/// Reformat a `DD/MM/YYYY` date to `YYYY-MM-DD`.
///
/// Anything that is not exactly three slash-separated numeric parts passes
/// through unchanged.
pub fn reformat_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() == 3 && parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit())) {
        format!("{}-{}-{}", parts[2], parts[1], parts[0])
    } else {
        raw.to_string()
    }
}
