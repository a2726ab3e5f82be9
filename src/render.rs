//! ==============================================================================
//! render.rs - html view of the current reading
//! ==============================================================================
//!
//! purpose:
//!     turns the stored reading into the fixed monitoring page served on `/`.
//!     pure functions only, the handler in server.rs owns the locking.
//!
//! relationships:
//!     - used by: server.rs (dashboard handler), store.rs (update log lines)
//!     - reads: domain.rs (CurrentReading)
//!
//! ==============================================================================

use crate::domain::CurrentReading;

use serde_json::Value;
use std::borrow::Cow;

/// placeholder for a field that has never been set (or was set to null)
pub const NOT_AVAILABLE: &str = "N/A";

/// render the monitoring page
pub fn view(reading: &CurrentReading) -> String {
    format!(
        r#"<!doctype html>
<html>
<head><title>Plant Monitoring Data</title></head>
<body>
    <h1>Plant Monitoring Data</h1>
    <h2>Sensor Data</h2>
    <p>Temperature: {}</p>
    <p>Moisture: {}</p>
    <h2>Disease Data</h2>
    <p>Disease Name: {}</p>
    <p>Probability: {}</p>
</body>
</html>
"#,
        field(&reading.temperature),
        field(&reading.moisture),
        field(&reading.disease),
        field(&reading.probability),
    )
}

fn field(value: &Option<Value>) -> String {
    match value {
        Some(value) => html_escape(&display_value(value)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// page text for a stored json value
///
/// strings lose their quotes, null reads as N/A, everything else is
/// printed in compact json form.
pub fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(NOT_AVAILABLE),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// escape html special characters to prevent xss
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}
