use chrono::format::{parse, ParseResult, Parsed, StrftimeItems};

// Longest token first within each letter, so `DD` is never read as two `D`s.
const TOKENS: &[(&str, &str)] = &[
    ("DD", "%d"),
    ("D", "%-d"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("Y", "%y"),
];

/// Translate a user-facing pattern like `DD/MM/YYYY` into a chrono format
/// string. Letters are case-insensitive; anything that is not a token is
/// kept as a literal.
pub fn translate(pattern: &str) -> String {
    if pattern.is_empty() {
        return String::new();
    }
    let upper = pattern.to_uppercase();
    let mut res = String::with_capacity(upper.len() * 2);
    let mut rest = upper.as_str();
    // Single left-to-right pass: `%Y` must not be rescanned as a `Y` token.
    while let Some(c) = rest.chars().next() {
        if let Some((token, spec)) = TOKENS.iter().find(|(t, _)| rest.starts_with(t)) {
            res.push_str(spec);
            rest = &rest[token.len()..];
        } else {
            if c == '%' {
                res.push('%');
            }
            res.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    res
}

/// Re-render `raw` from one user-facing date pattern into another.
/// Parts the source pattern lacks default to year 0, January and day 1, so
/// `MM/YYYY` and `DD.MM` inputs still convert.
pub fn reformat(raw: &str, from: &str, to: &str) -> ParseResult<String> {
    let from = translate(from);
    let mut parsed = Parsed::new();
    parse(&mut parsed, raw, StrftimeItems::new(&from))?;
    if parsed.year().is_none() && parsed.year_div_100().is_none() && parsed.year_mod_100().is_none() {
        parsed.set_year(0)?;
    }
    if parsed.month().is_none() {
        parsed.set_month(1)?;
    }
    if parsed.day().is_none() {
        parsed.set_day(1)?;
    }
    let date = parsed.to_naive_date()?;
    Ok(date.format(&translate(to)).to_string())
}
