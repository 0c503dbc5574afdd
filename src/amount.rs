use std::sync::OnceLock;

use regex::Regex;

fn amount_parts() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-|\d[\d,.]*").expect("amount pattern is valid"))
}

/// Strip currency symbols, letters and whitespace from an amount, keeping
/// digits, `,`/`.` separators and minus signs in their original order.
/// Separators are passed through as-is; `"1.234,56 EUR"` stays `"1.234,56"`.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    amount_parts()
        .find_iter(raw)
        .map(|m| m.as_str())
        .collect()
}

/// Flip the sign of a normalized amount. Empty amounts stay empty.
pub fn reverse_sign(amount: &str) -> String {
    if amount.is_empty() {
        return String::new();
    }
    match amount.strip_prefix('-') {
        Some(positive) => positive.to_string(),
        None => format!("-{amount}"),
    }
}
