use crate::normalize::NOT_AVAILABLE;

/// Render a USD price, e.g., `"1234.5"` -> `"$1,234.500000"`.
///
/// Missing values show as `N/A`; anything that does not parse to a finite
/// number is shown exactly as received.
pub fn format_price(value: Option<&str>) -> String {
    match present(value) {
        None => NOT_AVAILABLE.to_string(),
        Some(raw) => match parse_finite(raw) {
            Some(price) => format!("${}", group_thousands(&format!("{price:.6}"))),
            None => raw.to_string(),
        },
    }
}

/// Render a percentage change, e.g., `"12.345%"` -> `"12.35%"`.
///
/// Same fallback rules as [`format_price`].
pub fn format_pct(value: Option<&str>) -> String {
    match present(value) {
        None => NOT_AVAILABLE.to_string(),
        Some(raw) => match parse_finite(&raw.replace('%', "")) {
            Some(pct) => format!("{pct:.2}%"),
            None => raw.to_string(),
        },
    }
}

/// The sign of a percentage change, if it has one; used to colour output.
pub fn pct_sign(value: Option<&str>) -> Option<f64> {
    present(value)
        .and_then(|raw| parse_finite(&raw.replace('%', "")))
        .map(|v| v.signum())
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != NOT_AVAILABLE)
}

// `f64::from_str` happily accepts "NaN" and "inf"; neither is a price
fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, digit) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}
