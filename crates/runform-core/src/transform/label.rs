use serde_json::Value;

/// Label used when a field name humanizes to nothing.
pub const UNNAMED_LABEL: &str = "Unnamed";

/// Turn a field name into a display label.
///
/// Underscores become spaces and every word character (`[A-Za-z0-9_]`) that
/// starts a word is uppercased:
/// - `user_name` → `User Name`
/// - `limit` → `Limit`
/// - `userId` → `UserId`
/// - `x-request-id` → `X-Request-Id`
pub fn humanize(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut prev_is_word = false;

    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric();
        if is_word && !prev_is_word {
            label.push(ch.to_ascii_uppercase());
        } else {
            label.push(ch);
        }
        prev_is_word = is_word;
    }

    if label.trim().is_empty() {
        return UNNAMED_LABEL.to_string();
    }
    label
}

/// String form of an enum value as a browser would render it in a `<select>`.
///
/// Floats print the way browsers do (no fraction when integral, exponent form
/// at the extremes), `null` prints as `null`, arrays join their elements with
/// commas and objects print as `[object Object]`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_f64() {
                n.as_f64().map_or_else(|| n.to_string(), format_float)
            } else {
                n.to_string()
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Shortest round-trip digits, switching to exponent form outside
/// `[1e-6, 1e21)` the way browsers print numbers. Zero has no sign.
fn format_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&f.abs()) {
        return f.to_string();
    }
    let exponent = format!("{f:e}");
    match exponent.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => exponent,
    }
}
