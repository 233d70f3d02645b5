use serde_json::Value as JsonValue;

/// Render child keys as one anchor line per key, in the order given.
///
/// Keys are embedded verbatim, without HTML escaping.
pub fn render_listing(keys: &[JsonValue]) -> String {
    let mut body = String::new();
    for key in keys {
        let key = display_value(key);
        body.push_str(&format!("<a href=\"{}\">{}</a><br>\n", key, key));
    }
    body
}

/// Render the `value` field of a read result.
///
/// Strings pass through untouched; they are expected to already hold JSON.
/// Anything else is emitted in compact form and a missing field renders empty.
pub fn render_value(value: Option<&JsonValue>) -> String {
    value.map(display_value).unwrap_or_default()
}

/// Indent a JSON document with two spaces. Used for debug logging only.
pub fn pretty_print(body: &str) -> Result<String, serde_json::Error> {
    let parsed: JsonValue = serde_json::from_str(body)?;
    serde_json::to_string_pretty(&parsed)
}

fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
