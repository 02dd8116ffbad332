//! Extraction of the consumer configuration from launch configuration
//! user data.
//!
//! User data arrives base64-encoded from the AWS API. Somewhere in the
//! decoded boot script is a line of the form
//! `export CONSUMERS_CONFIGURATION="<value>"`; the value names the queue
//! workload the booted instance should service.

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Marker identifying the consumer configuration line in user data.
pub const CONSUMER_CONFIG_MARKER: &str = "CONSUMERS_CONFIGURATION";

/// Decode a base64 user data payload and pull out the consumer
/// configuration string.
///
/// Returns `Ok(None)` when no line contains the marker; callers render
/// that as an empty placeholder. A base64 decode failure is an error,
/// but only for the record that carried the payload.
pub fn consumer_config(user_data: &str) -> Result<Option<String>> {
    // The API wraps encoded payloads with newlines; strip all ASCII
    // whitespace before decoding.
    let cleaned: String = user_data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let decoded = STANDARD
        .decode(cleaned)
        .context("Failed to decode user data as base64")?;
    let text = String::from_utf8_lossy(&decoded);

    for line in text.lines() {
        if let Some(marker_start) = line.find(CONSUMER_CONFIG_MARKER) {
            return Ok(Some(extract_value(line, marker_start)));
        }
    }

    Ok(None)
}

/// The value sits between the marker's `="` and a closing quote at the
/// end of the line. Offsets are fixed relative to the marker.
fn extract_value(line: &str, marker_start: usize) -> String {
    let value_start = marker_start + CONSUMER_CONFIG_MARKER.len() + 2;
    let value_end = line.len().saturating_sub(1);

    line.get(value_start..value_end)
        .unwrap_or_default()
        .to_string()
}
